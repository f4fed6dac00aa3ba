//! Order endpoints. The backend resolves the current user from the token.

use serde::{de::DeserializeOwned, Serialize};

use super::{ApiClient, ApiError};

/// Page of the session user's orders. `page` is zero-based.
pub async fn fetch_user_orders<T: DeserializeOwned>(
    client: &ApiClient,
    page: u32,
    size: u32,
) -> Result<T, ApiError> {
    client
        .get_with("/orders/user", &[("page", page), ("size", size)])
        .await
}

pub async fn fetch_order_detail<T: DeserializeOwned>(
    client: &ApiClient,
    order_number: &str,
) -> Result<T, ApiError> {
    client.get(&format!("/orders/{}", order_number)).await
}

/// Create an order and let the backend pick a seat
pub async fn create_order_with_seat_allocation<T, B>(
    client: &ApiClient,
    body: &B,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    client.post("/orders/with-seat-allocation", body).await
}

/// Create an order for an explicitly chosen seat
pub async fn create_order<T, B>(client: &ApiClient, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    client.post("/orders", body).await
}
