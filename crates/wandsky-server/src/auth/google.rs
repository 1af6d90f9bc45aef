//! Google OAuth code exchange and the backend sign-in callback.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use wandsky_backend::{AuthenticatedUser, BackendClient, GoogleProfile};
use wandsky_core::GoogleOAuthConfig;

#[derive(Debug, Error)]
pub enum GoogleAuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("google {step} failed with status {status}")]
    Rejected { step: &'static str, status: u16 },

    #[error("google profile has no email address")]
    MissingEmail,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Subset of the OpenID Connect userinfo document.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl GoogleUserInfo {
    /// Profile body for `/api/auth/google`. The display name is split at the
    /// first space; Google's own given/family names are only used when there
    /// is no display name.
    ///
    /// # Errors
    ///
    /// Returns [`GoogleAuthError::MissingEmail`] when the profile carries no
    /// email, since the backend keys accounts on it.
    pub fn to_profile(&self) -> Result<GoogleProfile, GoogleAuthError> {
        let email = self
            .email
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or(GoogleAuthError::MissingEmail)?;
        let (first_name, last_name) = match self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            Some(name) => GoogleProfile::split_name(name),
            None => (
                self.given_name.clone().unwrap_or_default(),
                self.family_name.clone().unwrap_or_default(),
            ),
        };
        Ok(GoogleProfile {
            email,
            first_name,
            last_name,
            avatar: self.picture.clone(),
            google_id: self.sub.clone(),
        })
    }
}

#[derive(Clone)]
pub struct GoogleOAuthClient {
    client: reqwest::Client,
    config: GoogleOAuthConfig,
}

impl std::fmt::Debug for GoogleOAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuthClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GoogleOAuthClient {
    /// # Errors
    ///
    /// Returns [`GoogleAuthError::Http`] if the HTTP client cannot be built.
    pub fn new(config: GoogleOAuthConfig, timeout_secs: u64) -> Result<Self, GoogleAuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Trades an authorization code for a Google access token.
    ///
    /// # Errors
    ///
    /// [`GoogleAuthError::Rejected`] on non-2xx, [`GoogleAuthError::Http`] on
    /// network or parse failure.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> Result<String, GoogleAuthError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "google token exchange rejected");
            return Err(GoogleAuthError::Rejected {
                step: "token exchange",
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// # Errors
    ///
    /// [`GoogleAuthError::Rejected`] on non-2xx, [`GoogleAuthError::Http`] on
    /// network or parse failure.
    pub async fn user_info(&self, access_token: &str) -> Result<GoogleUserInfo, GoogleAuthError> {
        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "google userinfo rejected");
            return Err(GoogleAuthError::Rejected {
                step: "userinfo",
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Sign-in callback for Google: the backend must accept the profile.
///
/// Returns `None`, refusing the sign-in, on any backend failure whatever the
/// response looks like.
pub async fn google_sign_in_callback(
    backend: &BackendClient,
    profile: &GoogleProfile,
) -> Option<AuthenticatedUser> {
    match backend.google_sign_in(profile).await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!(
                error = %e,
                status = e.upstream_status(),
                "backend refused google sign-in"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: Option<&str>) -> GoogleUserInfo {
        GoogleUserInfo {
            sub: "1098".to_string(),
            email: Some("mere@example.nz".to_string()),
            name: name.map(str::to_string),
            given_name: Some("Mere".to_string()),
            family_name: Some("Parata".to_string()),
            picture: Some("https://lh3.example/p.png".to_string()),
        }
    }

    #[test]
    fn display_name_is_split_at_first_space() {
        let profile = info(Some("Mere Te Parata")).to_profile().expect("profile");
        assert_eq!(profile.first_name, "Mere");
        assert_eq!(profile.last_name, "Te Parata");
        assert_eq!(profile.google_id, "1098");
        assert_eq!(profile.avatar.as_deref(), Some("https://lh3.example/p.png"));
    }

    #[test]
    fn given_and_family_names_fill_in_without_display_name() {
        let profile = info(None).to_profile().expect("profile");
        assert_eq!(profile.first_name, "Mere");
        assert_eq!(profile.last_name, "Parata");
    }

    #[test]
    fn missing_email_is_an_error() {
        let mut no_email = info(Some("Mere"));
        no_email.email = None;
        assert!(matches!(
            no_email.to_profile(),
            Err(GoogleAuthError::MissingEmail)
        ));
    }
}
