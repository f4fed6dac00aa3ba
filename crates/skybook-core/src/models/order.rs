use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Option<i64>,
    pub order_number: String,
    pub user_id: Option<i64>,
    pub flight_number: Option<String>,
    pub seat_number: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub current_page: i32,
    #[serde(default)]
    pub page_size: i32,
    #[serde(default)]
    pub total_pages: i32,
}

impl OrderPage {
    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }
}

/// Body of `POST /orders/with-seat-allocation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAllocationRequest {
    pub flight_number: String,
}

impl SeatAllocationRequest {
    pub fn new(flight_number: impl Into<String>) -> Self {
        Self {
            flight_number: flight_number.into(),
        }
    }
}

/// Body of `POST /orders`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub user_id: i64,
    pub flight_number: String,
    pub seat_number: String,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_page() {
        let json = r#"{"orders": [{"id": 1, "orderNumber": "ORD20250101000001", "userId": 42,
            "flightNumber": "CA123", "seatNumber": "12A", "amount": 880.00}],
            "total": 11, "currentPage": 0, "pageSize": 10, "totalPages": 2}"#;

        let page: OrderPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.orders.len(), 1);
        assert_eq!(page.orders[0].order_number, "ORD20250101000001");
        assert_eq!(page.orders[0].seat_number.as_deref(), Some("12A"));
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page: OrderPage =
            serde_json::from_str(r#"{"orders": [], "total": 3, "currentPage": 0, "totalPages": 1}"#)
                .unwrap();
        assert!(!page.has_next());
    }

    #[test]
    fn test_seat_allocation_request_shape() {
        let body = serde_json::to_value(SeatAllocationRequest::new("CA123")).unwrap();
        assert_eq!(body, serde_json::json!({"flightNumber": "CA123"}));
    }
}
