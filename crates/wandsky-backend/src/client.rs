//! HTTP plumbing shared by every backend resource.
//!
//! Resource-specific calls live in sibling modules as further `impl
//! BackendClient` blocks. Everything funnels through [`BackendClient::execute`],
//! which turns non-2xx answers into [`BackendError::Upstream`] with a message
//! pulled out of whatever body the backend sent.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::BackendError;

const MAX_RAW_ERROR_LEN: usize = 500;

/// Client for the external backend REST API.
///
/// Cheap to clone; the inner `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Creates a client rooted at `base_url` (the `BACKEND_API_URL`).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL, or [`BackendError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("wandsky-gateway/0.1")
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| BackendError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(BackendError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so caller-supplied ids cannot introduce extra path components.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn get_json(
        &self,
        segments: &[&str],
        token: Option<&str>,
    ) -> Result<Value, BackendError> {
        self.send_json::<()>(Method::GET, segments, token, None).await
    }

    pub(crate) async fn get_json_with_query<Q>(
        &self,
        segments: &[&str],
        query: &Q,
        token: Option<&str>,
    ) -> Result<Value, BackendError>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        let context = format!("GET {}", url.path());
        let request = self.authorized(self.client.get(url), token).query(query);
        self.execute(request, &context).await
    }

    pub(crate) async fn send_json<B>(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<Value, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        let context = format!("{method} {}", url.path());
        let mut request = self.authorized(self.client.request(method, url), token);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, &context).await
    }

    fn authorized(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and returns the decoded JSON body.
    ///
    /// A 2xx response with an empty body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Http`] on network failure.
    /// - [`BackendError::Upstream`] on any non-2xx status.
    /// - [`BackendError::Deserialize`] if a 2xx body is not JSON.
    async fn execute(&self, request: RequestBuilder, context: &str) -> Result<Value, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &body);
            tracing::warn!(
                status = status.as_u16(),
                context,
                message = %message,
                "backend returned non-success status"
            );
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Pulls a human-readable message out of a backend error body.
///
/// Looks at `error` (string, or object with `message`), then `message`, then
/// `title`. A body that is not JSON is returned as raw text. An empty body
/// yields a generic message carrying the status.
pub(crate) fn extract_error_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("Request failed with status {status}");
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => message_from_json(&json)
            .unwrap_or_else(|| format!("Request failed with status {status}")),
        Err(_) => truncate(trimmed, MAX_RAW_ERROR_LEN),
    }
}

pub(crate) fn message_from_json(json: &Value) -> Option<String> {
    let non_empty = |v: &Value| {
        v.as_str()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };

    json.get("error")
        .and_then(|e| non_empty(e).or_else(|| e.get("message").and_then(non_empty)))
        .or_else(|| json.get("message").and_then(non_empty))
        .or_else(|| json.get("title").and_then(non_empty))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_owned()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> BackendClient {
        BackendClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_segments_onto_root() {
        let client = test_client("http://backend.local:5000");
        let url = client.endpoint(&["api", "auth", "login"]);
        assert_eq!(url.as_str(), "http://backend.local:5000/api/auth/login");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client = test_client("https://example.com/v2/");
        let url = client.endpoint(&["api", "wishlist"]);
        assert_eq!(url.as_str(), "https://example.com/v2/api/wishlist");
    }

    #[test]
    fn endpoint_encodes_segment_content() {
        let client = test_client("http://backend.local");
        let url = client.endpoint(&["api", "bookings", "../admin", "cancel"]);
        assert_eq!(
            url.as_str(),
            "http://backend.local/api/bookings/..%2Fadmin/cancel"
        );
    }

    #[test]
    fn new_rejects_non_http_urls() {
        assert!(matches!(
            BackendClient::new("not a url", 5),
            Err(BackendError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            BackendClient::new("mailto:ops@example.com", 5),
            Err(BackendError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn error_message_prefers_error_string() {
        let body = r#"{"success":false,"error":"bad creds","message":"ignored"}"#;
        assert_eq!(extract_error_message(401, body), "bad creds");
    }

    #[test]
    fn error_message_reads_nested_error_object() {
        let body = r#"{"error":{"code":"NOT_FOUND","message":"Booking not found"}}"#;
        assert_eq!(extract_error_message(404, body), "Booking not found");
    }

    #[test]
    fn error_message_falls_back_to_message_then_title() {
        assert_eq!(
            extract_error_message(400, r#"{"message":"Amount too small"}"#),
            "Amount too small"
        );
        assert_eq!(
            extract_error_message(400, r#"{"title":"One or more validation errors occurred."}"#),
            "One or more validation errors occurred."
        );
    }

    #[test]
    fn error_message_uses_raw_text_for_non_json() {
        assert_eq!(
            extract_error_message(502, "Bad Gateway from upstream"),
            "Bad Gateway from upstream"
        );
    }

    #[test]
    fn error_message_generic_for_empty_or_shapeless_body() {
        assert_eq!(extract_error_message(503, "  "), "Request failed with status 503");
        assert_eq!(extract_error_message(500, "{}"), "Request failed with status 500");
    }

    #[test]
    fn raw_error_text_is_truncated() {
        let long = "x".repeat(MAX_RAW_ERROR_LEN + 20);
        let message = extract_error_message(500, &long);
        assert_eq!(message.chars().count(), MAX_RAW_ERROR_LEN + 1);
        assert!(message.ends_with('…'));
    }
}
