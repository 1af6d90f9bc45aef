use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use wandsky_backend::{PaymentIntentRequest, PaymentStatusUpdate};
use wandsky_core::{validation::require, ValidationError};

use super::extract::{ApiJson, ApiPath};
use super::{ApiError, AppState};
use crate::auth::RequireSession;

const DEFAULT_CURRENCY: &str = "nzd";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PaymentIntentBody {
    booking_id: Option<String>,
    amount: Option<f64>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateStatusBody {
    payment_intent_id: Option<String>,
    status: Option<String>,
    booking_id: Option<String>,
}

fn positive_amount(amount: Option<f64>) -> Result<f64, ValidationError> {
    match amount {
        None => Err(ValidationError::Missing { field: "amount" }),
        Some(a) if a.is_finite() && a > 0.0 => Ok(a),
        Some(_) => Err(ValidationError::Invalid {
            field: "amount",
            reason: "must be a positive number".to_owned(),
        }),
    }
}

/// POST /api/payments/create-payment-intent
pub(super) async fn create_payment_intent(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(body): ApiJson<PaymentIntentBody>,
) -> Result<Json<Value>, ApiError> {
    let booking_id = require("bookingId", body.booking_id.as_deref())?.to_owned();
    let amount = positive_amount(body.amount)?;
    let currency = body
        .currency
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned());

    let request = PaymentIntentRequest {
        booking_id,
        amount,
        currency,
    };
    let intent = state
        .backend
        .create_payment_intent(&session.access_token, &request)
        .await?;
    Ok(Json(intent))
}

/// GET /api/payments/stripe-status/{id}
pub(super) async fn stripe_status(
    State(state): State<AppState>,
    session: RequireSession,
    ApiPath(intent_id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(
        state
            .backend
            .stripe_status(&session.access_token, &intent_id)
            .await?,
    ))
}

/// POST /api/payments/update-status
pub(super) async fn update_status(
    State(state): State<AppState>,
    session: RequireSession,
    ApiJson(body): ApiJson<UpdateStatusBody>,
) -> Result<Json<Value>, ApiError> {
    let update = PaymentStatusUpdate {
        payment_intent_id: require("paymentIntentId", body.payment_intent_id.as_deref())?
            .to_owned(),
        status: require("status", body.status.as_deref())?.to_owned(),
        booking_id: body.booking_id.filter(|b| !b.trim().is_empty()),
    };
    Ok(Json(
        state
            .backend
            .update_payment_status(&session.access_token, &update)
            .await?,
    ))
}
