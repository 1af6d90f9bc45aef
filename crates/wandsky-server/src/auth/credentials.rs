use wandsky_backend::{auth::INVALID_CREDENTIALS, AuthenticatedUser, BackendClient, BackendError};

use crate::api::ApiError;

/// Email/password provider. Backend refusals surface as 401 with the
/// backend's own message so the login form can show it.
pub async fn authorize_credentials(
    backend: &BackendClient,
    email: &str,
    password: &str,
) -> Result<AuthenticatedUser, ApiError> {
    backend
        .login(email, password)
        .await
        .map_err(|e| match e {
            BackendError::Rejected(message) | BackendError::Upstream { message, .. } => {
                tracing::info!(reason = %message, "credentials sign-in refused");
                ApiError::unauthorized_with(if message.is_empty() {
                    INVALID_CREDENTIALS.to_owned()
                } else {
                    message
                })
            }
            other => ApiError::from(other),
        })
}
