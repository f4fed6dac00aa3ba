//! Flight inventory endpoints.

use serde::{de::DeserializeOwned, Serialize};

use super::{ApiClient, ApiError};

/// Unified flight query. `params` is forwarded as the query string as-is;
/// [`crate::models::FlightQuery`] is the typed option.
pub async fn query_flights<T, Q>(client: &ApiClient, params: &Q) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    client.get_with("/flights", params).await
}
