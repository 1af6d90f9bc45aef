//! Request bodies sent to the backend and the auth envelopes read back.
//!
//! The backend speaks camelCase JSON. Auth responses have drifted over time
//! (token at the top level or under `data`, `token` or `accessToken`), so
//! [`AuthEnvelope`] accepts every shape seen in the wild.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::message_from_json;
use crate::error::BackendError;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Profile forwarded to `/api/auth/google` after the OAuth exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub google_id: String,
}

impl GoogleProfile {
    /// Splits a display name at the first space: `"Aroha Te Ngaru"` becomes
    /// first `"Aroha"`, last `"Te Ngaru"`.
    #[must_use]
    pub fn split_name(full_name: &str) -> (String, String) {
        let trimmed = full_name.trim();
        match trimmed.split_once(char::is_whitespace) {
            Some((first, rest)) => (first.to_owned(), rest.trim().to_owned()),
            None => (trimmed.to_owned(), String::new()),
        }
    }
}

/// A user the backend has authenticated, with the token it issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub access_token: String,
}

/// User record inside an auth reply. Read field by field because replies may
/// carry the same value under several keys (`id` and `userId`).
#[derive(Debug, Default)]
pub(crate) struct BackendUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<String>,
}

impl BackendUser {
    fn from_json(raw: &Value) -> Self {
        Self {
            id: first_of(raw, &["id", "userId"], string_or_number),
            email: first_of(raw, &["email"], non_empty_str),
            name: first_of(raw, &["name"], non_empty_str),
            first_name: first_of(raw, &["firstName"], non_empty_str),
            last_name: first_of(raw, &["lastName"], non_empty_str),
            avatar: first_of(raw, &["avatar", "avatarUrl", "image"], non_empty_str),
        }
    }

    fn display_name(&self) -> Option<String> {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return Some(name.to_owned());
        }
        let joined = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    }
}

/// Namespace for reading auth replies; see [`AuthEnvelope::into_user`].
pub(crate) struct AuthEnvelope;

impl AuthEnvelope {
    /// Converts a 2xx auth body into an [`AuthenticatedUser`].
    ///
    /// The token is taken from `token`, then `accessToken`, then the same keys
    /// under `data`. The user comes from `user`, then `data.user`.
    /// `fallback_message` is used when the backend refuses without saying why.
    pub(crate) fn into_user(
        raw: &Value,
        context: &str,
        fallback_message: &str,
    ) -> Result<AuthenticatedUser, BackendError> {
        if !raw.is_object() {
            return Err(BackendError::Deserialize {
                context: context.to_owned(),
                source: serde::de::Error::custom("auth reply is not a JSON object"),
            });
        }
        if raw.get("success").and_then(Value::as_bool) == Some(false) {
            let message = message_from_json(raw).unwrap_or_else(|| fallback_message.to_owned());
            return Err(BackendError::Rejected(message));
        }

        let data = raw.get("data").filter(|d| d.is_object());
        let access_token = first_of(raw, &["token", "accessToken"], non_empty_str)
            .or_else(|| data.and_then(|d| first_of(d, &["token", "accessToken"], non_empty_str)))
            .ok_or_else(|| BackendError::Rejected(fallback_message.to_owned()))?;
        let user = raw
            .get("user")
            .filter(|u| u.is_object())
            .or_else(|| data.and_then(|d| d.get("user")).filter(|u| u.is_object()))
            .map(BackendUser::from_json)
            .unwrap_or_default();

        Ok(AuthenticatedUser {
            name: user.display_name(),
            id: user.id,
            email: user.email,
            image: user.avatar,
            access_token,
        })
    }
}

/// First key in `keys` whose value `pick` accepts.
fn first_of(raw: &Value, keys: &[&str], pick: fn(&Value) -> Option<String>) -> Option<String> {
    keys.iter().find_map(|key| raw.get(*key).and_then(pick))
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

fn string_or_number(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        other => non_empty_str(other),
    }
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

/// Listing filters forwarded verbatim as query parameters.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BlogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Bookings & payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct CancelBooking {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub booking_id: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    pub payment_intent_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.avatar.is_none()
            && self.bio.is_none()
            && self.nationality.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddWishlistItem<'a> {
    pub destination_id: &'a str,
}
