use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;

impl BackendClient {
    /// Public reviews for a destination, keyed by backend GUID.
    ///
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn destination_reviews(&self, destination_guid: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "reviews", "destination", destination_guid], None)
            .await
    }
}
