use serde::{de::DeserializeOwned, Serialize};

use super::{ApiClient, ApiError};

pub async fn register<T, B>(client: &ApiClient, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    client.post("/users/register", body).await
}

pub async fn login<T, B>(client: &ApiClient, body: &B) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    client.post("/users/login", body).await
}

pub async fn get_user_info<T: DeserializeOwned>(
    client: &ApiClient,
    user_id: i64,
) -> Result<T, ApiError> {
    client.get(&format!("/users/{}", user_id)).await
}
