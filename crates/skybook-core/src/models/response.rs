use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Envelope every backend endpoint wraps its payload in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload, turning `success: false` into [`ApiError::Rejected`]
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            let message = self
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "request failed".to_string());
            return Err(ApiError::Rejected(message));
        }
        self.data
            .ok_or_else(|| ApiError::InvalidResponse("response envelope has no data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_data() {
        let json = r#"{"success": true, "data": {"answer": 42}}"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(resp.into_data().unwrap()["answer"], 42);
    }

    #[test]
    fn test_failure_envelope_is_rejected_with_message() {
        let json = r#"{"success": false, "message": "订单不存在"}"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(matches!(resp.into_data(), Err(ApiError::Rejected(m)) if m == "订单不存在"));
    }

    #[test]
    fn test_failure_envelope_without_message() {
        let resp: ApiResponse<()> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(matches!(resp.into_data(), Err(ApiError::Rejected(m)) if m == "request failed"));
    }

    #[test]
    fn test_success_without_data_is_invalid() {
        let resp: ApiResponse<i64> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(matches!(resp.into_data(), Err(ApiError::InvalidResponse(_))));
    }
}
