use tracing::{info, warn};

use crate::api::{users, ApiClient, ApiError};
use crate::models::{ApiResponse, Credentials, LoginResult, RegisterResult};
use crate::utils::validate;

/// Log in and store the issued token and user record in the client's session
pub async fn sign_in(client: &ApiClient, credentials: &Credentials) -> Result<LoginResult, ApiError> {
    let response: ApiResponse<LoginResult> = users::login(client, credentials).await?;
    let result = response.into_data()?;

    client.session().establish(&result.token, &result.user_info)?;
    info!(user_id = result.user_info.id, username = %result.user_info.username, "Signed in");
    Ok(result)
}

/// Forget the stored token and user record
pub fn sign_out(client: &ApiClient) -> Result<(), ApiError> {
    client.session().clear()?;
    info!("Signed out");
    Ok(())
}

/// Register a new account after checking the input locally
pub async fn sign_up(client: &ApiClient, credentials: &Credentials) -> Result<RegisterResult, ApiError> {
    if !validate::is_username(&credentials.username) {
        return Err(ApiError::Validation(
            "username must be 3-20 letters, digits or underscores".to_string(),
        ));
    }
    if !validate::is_password(&credentials.password) {
        return Err(ApiError::Validation(
            "password must be at least 6 characters".to_string(),
        ));
    }

    let response: ApiResponse<RegisterResult> = users::register(client, credentials).await?;
    let result = response.into_data();
    if let Err(ref e) = result {
        warn!(username = %credentials.username, error = %e, "Registration rejected");
    }
    result
}
