use reqwest::Method;
use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::{ChangePasswordRequest, ProfileUpdate};

impl BackendClient {
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn get_profile(&self, token: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "user", "profile"], Some(token))
            .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::PATCH,
            &["api", "user", "profile"],
            Some(token),
            Some(update),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx (400 when the current password
    /// is wrong), [`BackendError::Http`] on network failure.
    pub async fn change_password(
        &self,
        token: &str,
        request: &ChangePasswordRequest,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::POST,
            &["api", "user", "change-password"],
            Some(token),
            Some(request),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn get_preferences(&self, token: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "user", "preferences"], Some(token))
            .await
    }

    /// Preferences are an opaque JSON object owned by the backend.
    ///
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn update_preferences(
        &self,
        token: &str,
        preferences: &serde_json::Map<String, Value>,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::PATCH,
            &["api", "user", "preferences"],
            Some(token),
            Some(preferences),
        )
        .await
    }
}
