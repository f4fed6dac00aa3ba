//! API client for communicating with the booking gateway.
//!
//! Every request passes through the same pipeline:
//!
//! 1. the stored bearer token, if any, is attached as `Authorization`
//! 2. the request is sent with the client-wide timeout
//! 3. success responses are logged and decoded untouched
//! 4. a 401 evicts the stored session and, unless the host is already on
//!    the login or root route, navigates it to the login route
//!
//! Failures are always returned to the caller after step 4 runs.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{MemoryStore, Session, SessionStore};
use crate::nav::{self, Navigator, LOGIN_ROUTE};

use super::ApiError;

/// Default HTTP request timeout in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    store: Option<Arc<dyn SessionStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            store: None,
            navigator: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Where the session token and user live. Defaults to a [`MemoryStore`].
    pub fn store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Host navigation used after a 401. Without one the session is still
    /// evicted but nothing is navigated.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let parsed = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Validation(format!("invalid base URL {}: {}", self.base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::Validation(format!(
                "base URL {} cannot carry resource paths",
                self.base_url
            )));
        }

        let client = Client::builder().timeout(self.timeout).build()?;
        let store: Arc<dyn SessionStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new()),
        };

        Ok(ApiClient {
            client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            session: Session::new(store),
            navigator: self.navigator,
        })
    }
}

/// The single client every domain module routes requests through.
/// Clone is cheap - reqwest::Client and the session store are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url.into())
    }

    /// Create a client with an in-memory session and no navigator
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::builder(base_url).build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue `method` against `path`. For GET the payload becomes query
    /// parameters, for every other verb it is sent as the JSON body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<T, ApiError> {
        let mut builder = self.client.request(method.clone(), self.url(path));
        if let Some(payload) = payload {
            builder = if method == Method::GET {
                builder.query(payload)
            } else {
                builder.json(payload)
            };
        }
        self.dispatch(builder, &method, path).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.client.get(self.url(path));
        self.dispatch(builder, &Method::GET, path).await
    }

    pub async fn get_with<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let builder = self.client.get(self.url(path)).query(query);
        self.dispatch(builder, &Method::GET, path).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self.client.post(self.url(path)).json(body);
        self.dispatch(builder, &Method::POST, path).await
    }

    /// Attach the stored bearer token, leaving the request alone without one
    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let Some(token) = self.session.token()? else {
            return Ok(builder);
        };
        let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::Validation("stored token is not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok(builder.header(header::AUTHORIZATION, value))
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<T, ApiError> {
        let builder = self.authorize(builder)?;

        let checked = match builder.send().await {
            Ok(response) => Self::check_response(response).await,
            // never left the process: the payload could not be encoded
            Err(e) if e.is_builder() => {
                return Err(ApiError::Validation(format!("Invalid request to {}: {}", path, e)));
            }
            Err(e) => Err(ApiError::NetworkError(e)),
        };

        match checked {
            Ok(response) => {
                debug!(%method, path, status = %response.status(), "API response");
                let body = response.bytes().await?;
                Self::decode(&body).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
                })
            }
            Err(err) => {
                warn!(%method, path, error = %err, "API request failed");
                self.handle_failure(&err);
                Err(err)
            }
        }
    }

    /// Decode a success body. An empty body (204 and friends) reads as JSON `null`.
    fn decode<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
        if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(body)
        }
    }

    /// Side effects of a failed request. Only 401 has any.
    fn handle_failure(&self, err: &ApiError) {
        if !err.is_unauthorized() {
            return;
        }

        match self.session.clear() {
            Ok(()) => warn!("Session evicted after 401"),
            Err(e) => warn!(error = %e, "Failed to evict session after 401"),
        }

        if let Some(ref navigator) = self.navigator {
            let location = navigator.location();
            if nav::should_redirect_to_login(&location) {
                info!(from = %location, "Redirecting to login");
                navigator.navigate(LOGIN_ROUTE);
            }
        }
    }
}
