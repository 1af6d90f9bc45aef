//! Stripe payment intents, brokered by the backend.
//!
//! The gateway never talks to Stripe directly; the backend holds the secret
//! key and returns the `clientSecret` the browser hands to Stripe Elements.

use reqwest::Method;
use serde_json::Value;

use crate::client::BackendClient;
use crate::error::BackendError;
use crate::types::{PaymentIntentRequest, PaymentStatusUpdate};

impl BackendClient {
    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn create_payment_intent(
        &self,
        token: &str,
        request: &PaymentIntentRequest,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::POST,
            &["api", "payments", "create-payment-intent"],
            Some(token),
            Some(request),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn stripe_status(
        &self,
        token: &str,
        payment_intent_id: &str,
    ) -> Result<Value, BackendError> {
        self.get_json(
            &["api", "payments", "stripe-status", payment_intent_id],
            Some(token),
        )
        .await
    }

    /// # Errors
    ///
    /// [`BackendError::Upstream`] on non-2xx, [`BackendError::Http`] on network failure.
    pub async fn update_payment_status(
        &self,
        token: &str,
        update: &PaymentStatusUpdate,
    ) -> Result<Value, BackendError> {
        self.send_json(
            Method::POST,
            &["api", "payments", "update-status"],
            Some(token),
            Some(update),
        )
        .await
    }
}
