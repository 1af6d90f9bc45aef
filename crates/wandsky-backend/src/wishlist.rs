//! Wishlist endpoints. Callers pass backend GUIDs, not slugs.

use reqwest::Method;
use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::AddWishlistItem;

impl BackendClient {
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn list_wishlist(&self, token: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "wishlist"], Some(token)).await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx (409 when already saved),
    /// [`BackendError::Http`] on network failure.
    pub async fn add_to_wishlist(
        &self,
        token: &str,
        destination_guid: &str,
    ) -> Result<Value, BackendError> {
        let body = AddWishlistItem {
            destination_id: destination_guid,
        };
        self.send_json(Method::POST, &["api", "wishlist"], Some(token), Some(&body))
            .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn remove_from_wishlist(
        &self,
        token: &str,
        destination_guid: &str,
    ) -> Result<Value, BackendError> {
        self.send_json::<()>(
            Method::DELETE,
            &["api", "wishlist", destination_guid],
            Some(token),
            None,
        )
        .await
    }

    /// Whether the destination is on the user's wishlist.
    ///
    /// Reads `isInWishlist` at the top level or under `data`; a body without
    /// either reads as `false`.
    ///
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn check_wishlist(
        &self,
        token: &str,
        destination_guid: &str,
    ) -> Result<bool, BackendError> {
        let body = self
            .get_json(&["api", "wishlist", "check", destination_guid], Some(token))
            .await?;
        Ok(in_wishlist_flag(&body))
    }
}

fn in_wishlist_flag(body: &Value) -> bool {
    body.get("isInWishlist")
        .or_else(|| body.get("data").and_then(|d| d.get("isInWishlist")))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
