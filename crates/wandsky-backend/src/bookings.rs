use reqwest::Method;
use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::CancelBooking;

impl BackendClient {
    /// Bookings belonging to the token's user.
    ///
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn list_bookings(&self, token: &str) -> Result<Value, BackendError> {
        self.get_json(&["api", "bookings"], Some(token)).await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx (e.g. 400 when the booking is
    /// already cancelled), [`BackendError::Http`] on network failure.
    pub async fn cancel_booking(
        &self,
        token: &str,
        booking_id: &str,
        request: &CancelBooking,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::POST,
            &["api", "bookings", booking_id, "cancel"],
            Some(token),
            Some(request),
        )
        .await
    }
}
