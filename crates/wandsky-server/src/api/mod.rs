mod auth;
mod blog;
mod bookings;
mod destinations;
mod extract;
mod payments;
mod user;
mod weather;
mod wishlist;


use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, Method, Request, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use wandsky_backend::{BackendClient, BackendError};
use wandsky_core::{AppConfig, ValidationError};
use wandsky_weather::{WeatherClient, WeatherError, WeatherService};

use crate::auth::{GoogleOAuthClient, SessionKeys};
use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shown for transport and parsing failures; details go to the log only.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: BackendClient,
    /// `None` when `WEATHER_API_KEY` is unset.
    pub weather: Option<WeatherService>,
    /// `None` when Google sign-in is not configured.
    pub google: Option<GoogleOAuthClient>,
    pub sessions: SessionKeys,
}

impl AppState {
    /// Builds every outbound client from configuration.
    ///
    /// # Errors
    ///
    /// Fails when a configured base URL is unusable or an HTTP client cannot
    /// be built.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let backend = BackendClient::new(&config.backend_api_url, config.http_timeout_secs)?;

        let weather = match config.weather_api_key.as_deref() {
            Some(key) => {
                let client =
                    WeatherClient::new(key, &config.weather_api_base_url, config.http_timeout_secs)?;
                Some(WeatherService::new(
                    client,
                    config.weather_fallback_city.clone(),
                ))
            }
            None => {
                tracing::warn!("WEATHER_API_KEY not set; /api/weather will answer 503");
                None
            }
        };

        let google = config
            .google
            .clone()
            .map(|g| GoogleOAuthClient::new(g, config.http_timeout_secs))
            .transpose()?;

        Ok(Self {
            sessions: SessionKeys::from_config(&config),
            config,
            backend,
            weather,
            google,
        })
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `{ "success": true, "data": ... }` envelope used by write routes.
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub success: bool,
    pub data: T,
}

pub(super) fn success<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        data,
    })
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    field: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
        }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self::unauthorized_with("Unauthorized")
    }

    pub fn unauthorized_with(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "bad_request", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    /// Sign-in refused by the backend.
    #[must_use]
    pub fn access_denied() -> Self {
        Self::new(StatusCode::FORBIDDEN, "access_denied", "AccessDenied")
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", message)
    }

    #[must_use]
    pub fn rate_limited() -> Self {
        Self::new(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "Too many requests",
        )
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            GENERIC_FAILURE,
        )
    }

    /// Passes an upstream status through. Anything that is not an error
    /// status becomes 502.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        Self::new(status, "upstream_error", message)
    }

    #[must_use]
    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            error: &self.message,
            code: self.code,
            field: self.field,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::Upstream { status, message } => Self::upstream(status, message),
            BackendError::Rejected(message) => Self::bad_request(message),
            other => {
                tracing::error!(error = %other, "backend request failed");
                Self::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        let field = error.field();
        Self::new(StatusCode::BAD_REQUEST, "validation_error", error.to_string()).with_field(field)
    }
}

impl From<WeatherError> for ApiError {
    fn from(error: WeatherError) -> Self {
        match error {
            WeatherError::CityNotFound { city, message, .. } => {
                Self::not_found(format!("No weather data for {city}: {message}"))
            }
            WeatherError::Upstream { status, message } => Self::upstream(status, message),
            other => {
                tracing::error!(error = %other, "weather request failed");
                Self::internal()
            }
        }
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        tracing::error!(error = %error, "failed to sign session token");
        Self::internal()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn gateway_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/public-config", get(public_config))
        .route("/api/auth/register", post(auth::register))
        .route(
            "/api/auth/callback/credentials",
            post(auth::credentials_callback),
        )
        .route("/api/auth/callback/google", post(auth::google_callback))
        .route("/api/auth/session", get(auth::session))
        .route("/api/auth/signout", post(auth::signout))
        .route("/api/auth/providers", get(auth::providers))
        .route("/api/destinations", get(destinations::list_destinations))
        .route(
            "/api/destinations/{id}/reviews",
            get(destinations::destination_reviews),
        )
        .route("/api/blog", get(blog::list_posts).post(blog::create_post))
        .route("/api/blog/comments", post(blog::create_comment_for_post))
        .route("/api/blog/{id}", get(blog::get_post))
        .route(
            "/api/blog/{id}/comments",
            get(blog::list_comments).post(blog::create_comment),
        )
        .route("/api/bookings", get(bookings::list_bookings))
        .route("/api/bookings/{id}/cancel", post(bookings::cancel_booking))
        .route(
            "/api/payments/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route(
            "/api/payments/stripe-status/{id}",
            get(payments::stripe_status),
        )
        .route(
            "/api/payments/update-status",
            post(payments::update_status),
        )
        .route(
            "/api/user/profile",
            get(user::get_profile).patch(user::update_profile),
        )
        .route("/api/user/change-password", post(user::change_password))
        .route(
            "/api/user/preferences",
            get(user::get_preferences).patch(user::update_preferences),
        )
        .route("/api/weather/{city}", get(weather::get_weather))
        .route(
            "/api/wishlist",
            get(wishlist::list_wishlist).post(wishlist::add_to_wishlist),
        )
        .route(
            "/api/wishlist/{destination_id}",
            delete(wishlist::remove_from_wishlist),
        )
        .route(
            "/api/wishlist/check/{destination_id}",
            get(wishlist::check_wishlist),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let rate_limit = rate_limit.with_sessions(state.sessions.clone());
    let public_routes = Router::new().route("/api/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(gateway_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                        let request_id = req
                            .extensions()
                            .get::<RequestId>()
                            .map_or("-", |id| id.0.as_str());
                        tracing::info_span!(
                            "request",
                            method = %req.method(),
                            path = %req.uri().path(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(build_cors()),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Health & public config
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Features {
    google: bool,
    weather: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    request_id: String,
    features: Features,
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        request_id: req_id.0,
        features: Features {
            google: state.google.is_some(),
            weather: state.weather.is_some(),
        },
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PublicConfig {
    stripe_publishable_key: Option<String>,
    google_maps_api_key: Option<String>,
}

/// Browser-safe keys only.
async fn public_config(State(state): State<AppState>) -> Json<PublicConfig> {
    Json(PublicConfig {
        stripe_publishable_key: state.config.stripe_publishable_key.clone(),
        google_maps_api_key: state.config.google_maps_api_key.clone(),
    })
}
