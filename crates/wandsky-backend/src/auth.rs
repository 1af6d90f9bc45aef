//! Sign-in and registration endpoints.

use reqwest::Method;
use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::{AuthEnvelope, AuthenticatedUser, GoogleProfile, LoginRequest, RegisterRequest};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const GOOGLE_SIGN_IN_FAILED: &str = "Google sign-in was not accepted";

impl BackendClient {
    /// Verifies email/password against `/api/auth/login`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Upstream`] when the backend answers non-2xx; the
    ///   message is the backend's own.
    /// - [`BackendError::Rejected`] when it answers 2xx with `success: false`
    ///   or without a token.
    /// - [`BackendError::Http`] on network failure.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, BackendError> {
        let body = LoginRequest { email, password };
        let raw = self
            .send_json(Method::POST, &["api", "auth", "login"], None, Some(&body))
            .await?;
        AuthEnvelope::into_user(&raw, "POST /api/auth/login", INVALID_CREDENTIALS)
    }

    /// Exchanges a verified Google profile for a backend token.
    ///
    /// # Errors
    ///
    /// Any non-2xx answer surfaces as [`BackendError::Upstream`]; callers
    /// treat every error from this call as a refused sign-in.
    pub async fn google_sign_in(
        &self,
        profile: &GoogleProfile,
    ) -> Result<AuthenticatedUser, BackendError> {
        let raw = self
            .send_json(Method::POST, &["api", "auth", "google"], None, Some(profile))
            .await?;
        AuthEnvelope::into_user(&raw, "POST /api/auth/google", GOOGLE_SIGN_IN_FAILED)
    }

    /// Creates an account. The backend's body is returned as-is.
    ///
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx (e.g. 409 for a taken email),
    /// [`BackendError::Http`] on network failure.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, BackendError> {
        self.send_json(Method::POST, &["api", "auth", "register"], None, Some(request))
            .await
    }
}
