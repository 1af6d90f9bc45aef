use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderValue,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::ApiError;
use crate::auth::{extract::decode_session, SessionKeys};

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

#[derive(Debug)]
struct ClientWindows {
    clients: HashMap<String, RateLimitWindow>,
    last_sweep: Instant,
}

/// Fixed-window limiter with one window per client.
///
/// A client is the signed-in session subject when the request carries a
/// valid session, else the first `x-forwarded-for` hop, else the peer
/// address. Windows idle for a full period are swept out.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    sessions: Option<SessionKeys>,
    state: Arc<Mutex<ClientWindows>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            sessions: None,
            state: Arc::new(Mutex::new(ClientWindows {
                clients: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    #[must_use]
    pub fn per_minute(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Keys signed-in callers by their session subject.
    #[must_use]
    pub fn with_sessions(mut self, sessions: SessionKeys) -> Self {
        self.sessions = Some(sessions);
        self
    }

    fn client_key(&self, req: &Request) -> String {
        if let Some(claims) = self
            .sessions
            .as_ref()
            .and_then(|keys| decode_session(req.headers(), keys))
            .filter(|c| !c.sub.is_empty())
        {
            return format!("session:{}", claims.sub);
        }
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return format!("ip:{ip}");
        }
        req.extensions().get::<ConnectInfo<SocketAddr>>().map_or_else(
            || "anonymous".to_owned(),
            |ConnectInfo(addr)| format!("ip:{}", addr.ip()),
        )
    }

    /// Counts one request for `client`; `false` once its window is full.
    async fn try_acquire(&self, client: String) -> bool {
        let mut windows = self.state.lock().await;
        let now = Instant::now();

        if now.duration_since(windows.last_sweep) >= self.window {
            let period = self.window;
            windows
                .clients
                .retain(|_, w| now.duration_since(w.started_at) < period);
            windows.last_sweep = now;
        }

        let window = windows.clients.entry(client).or_insert(RateLimitWindow {
            started_at: now,
            count: 0,
        });
        if now.duration_since(window.started_at) >= self.window {
            window.started_at = now;
            window.count = 0;
        }
        if window.count >= self.max_requests {
            return false;
        }
        window.count += 1;
        true
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.state.lock().await.clients.len()
    }
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing a fixed request-per-window limit per client.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let client = rate_limit.client_key(&req);
    if !rate_limit.try_acquire(client.clone()).await {
        tracing::debug!(client = %client, "rate limit exceeded");
        return ApiError::rate_limited().into_response();
    }
    next.run(req).await
}

pub(crate) fn extract_bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
