//! Signed session carrier and the sign-in/session callbacks.
//!
//! The session lives in an HS256 JWT stored in the `wandsky.session-token`
//! cookie. The JWT is signed, not encrypted: it must never carry anything the
//! browser may not read. The backend access token is already held by the
//! browser-side client, so carrying it here exposes nothing new.

use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use wandsky_backend::AuthenticatedUser;
use wandsky_core::AppConfig;

pub const SESSION_COOKIE: &str = "wandsky.session-token";

/// Provider name stored for email/password sign-ins.
pub const CREDENTIALS_PROVIDER: &str = "credentials";
pub const GOOGLE_PROVIDER: &str = "google";

/// JWT payload. Everything the exposed [`Session`] needs is copied in at
/// sign-in so reads never call the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub provider: String,
    pub iat: i64,
    pub exp: i64,
}

/// The user handed to [`jwt_callback`] by a sign-in provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedInUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub access_token: Option<String>,
}

impl From<AuthenticatedUser> for SignedInUser {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            image: user.image,
            access_token: Some(user.access_token).filter(|t| !t.is_empty()),
        }
    }
}

/// The OAuth account a sign-in came through, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthAccount {
    pub provider: &'static str,
    pub provider_account_id: String,
    pub access_token: Option<String>,
}

/// Builds the token payload at sign-in.
///
/// The access token is the backend's, else the OAuth provider's. The user id
/// is the backend's, else the provider subject.
#[must_use]
pub fn jwt_callback(
    user: SignedInUser,
    account: Option<&OAuthAccount>,
    issued_at: i64,
    max_age_secs: i64,
) -> SessionClaims {
    let access_token = user
        .access_token
        .or_else(|| account.and_then(|a| a.access_token.clone()));
    let user_id = user
        .id
        .or_else(|| account.map(|a| a.provider_account_id.clone()));
    let sub = user_id
        .clone()
        .or_else(|| user.email.clone())
        .unwrap_or_default();

    SessionClaims {
        sub,
        email: user.email,
        name: user.name,
        picture: user.image,
        access_token,
        user_id,
        provider: account.map_or(CREDENTIALS_PROVIDER, |a| a.provider).to_owned(),
        iat: issued_at,
        exp: issued_at.saturating_add(max_age_secs),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// The session exposed to clients at `/api/auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: SessionUser,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Session callback: copies token fields from the JWT on every read.
    #[must_use]
    pub fn from_claims(claims: &SessionClaims) -> Self {
        Self {
            user: SessionUser {
                id: claims.user_id.clone(),
                email: claims.email.clone(),
                name: claims.name.clone(),
                image: claims.picture.clone(),
            },
            access_token: claims.access_token.clone(),
            user_id: claims.user_id.clone(),
            expires: DateTime::from_timestamp(claims.exp, 0).unwrap_or_default(),
        }
    }
}

/// Signing material plus cookie settings.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    max_age_secs: i64,
    secure: bool,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("secret", &"[redacted]")
            .field("max_age_secs", &self.max_age_secs)
            .field("secure", &self.secure)
            .finish()
    }
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &str, max_age_secs: u64, secure: bool) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            max_age_secs: i64::try_from(max_age_secs).unwrap_or(i64::MAX),
            secure,
        }
    }

    /// Cookies are `Secure` everywhere except development.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.session_secret,
            config.session_max_age_secs,
            !config.is_development(),
        )
    }

    /// Runs [`jwt_callback`] and signs the result.
    ///
    /// # Errors
    ///
    /// Returns the signing error from `jsonwebtoken`.
    pub fn issue(
        &self,
        user: SignedInUser,
        account: Option<&OAuthAccount>,
    ) -> Result<(SessionClaims, String), jsonwebtoken::errors::Error> {
        let claims = jwt_callback(user, account, Utc::now().timestamp(), self.max_age_secs);
        let token = self.sign(&claims)?;
        Ok((claims, token))
    }

    /// Re-signs existing claims with a fresh expiry (sliding session).
    ///
    /// # Errors
    ///
    /// Returns the signing error from `jsonwebtoken`.
    pub fn refresh(
        &self,
        mut claims: SessionClaims,
    ) -> Result<(SessionClaims, String), jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        claims.iat = now;
        claims.exp = now.saturating_add(self.max_age_secs);
        let token = self.sign(&claims)?;
        Ok((claims, token))
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }

    /// Expired, tampered or foreign tokens all read as "no session".
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid session token");
                None
            }
        }
    }

    #[must_use]
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::seconds(self.max_age_secs))
            .build()
    }

    #[must_use]
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::ZERO)
            .build()
    }
}
