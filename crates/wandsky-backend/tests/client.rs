//! Integration tests for `BackendClient` using wiremock HTTP mocks.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wandsky_backend::{
    BackendClient, BackendError, BlogQuery, CancelBooking, GoogleProfile, PaymentIntentRequest,
};

fn test_client(base_url: &str) -> BackendClient {
    BackendClient::new(base_url, 5).expect("client construction should not fail")
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_returns_user_with_backend_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "kiri@example.nz", "password": "Kiwi2024" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "token": "backend-jwt",
                "user": { "id": "u-1", "email": "kiri@example.nz", "firstName": "Kiri", "lastName": "Tane" }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = test_client(&server.uri())
        .login("kiri@example.nz", "Kiwi2024")
        .await
        .expect("login should succeed");

    assert_eq!(user.access_token, "backend-jwt");
    assert_eq!(user.id.as_deref(), Some("u-1"));
    assert_eq!(user.name.as_deref(), Some("Kiri Tane"));
}

#[tokio::test]
async fn login_accepts_reply_repeating_token_and_id_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "tok-1",
            "accessToken": "tok-1",
            "user": { "id": "u-1", "userId": "u-1", "email": "kiri@example.nz" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = test_client(&server.uri())
        .login("kiri@example.nz", "Kiwi2024")
        .await
        .expect("login should succeed");

    assert_eq!(user.access_token, "tok-1");
    assert_eq!(user.id.as_deref(), Some("u-1"));
    assert_eq!(user.email.as_deref(), Some("kiri@example.nz"));
}

#[tokio::test]
async fn login_success_false_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "error": "bad creds" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .login("kiri@example.nz", "wrong")
        .await
        .unwrap_err();

    assert!(
        matches!(err, BackendError::Rejected(ref m) if m == "bad creds"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn login_unauthorized_status_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "success": false, "error": "bad creds" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .login("kiri@example.nz", "wrong")
        .await
        .unwrap_err();

    assert!(
        matches!(err, BackendError::Upstream { status: 401, ref message } if message == "bad creds"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn google_sign_in_posts_split_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .and(body_json(json!({
            "email": "aroha@example.nz",
            "firstName": "Aroha",
            "lastName": "Te Ngaru",
            "avatar": "https://lh3.googleusercontent.com/a/x",
            "googleId": "109876"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "backend-google-jwt",
            "user": { "id": 77, "email": "aroha@example.nz" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (first_name, last_name) = GoogleProfile::split_name("Aroha Te Ngaru");
    let profile = GoogleProfile {
        email: "aroha@example.nz".into(),
        first_name,
        last_name,
        avatar: Some("https://lh3.googleusercontent.com/a/x".into()),
        google_id: "109876".into(),
    };

    let user = test_client(&server.uri())
        .google_sign_in(&profile)
        .await
        .expect("google sign-in should succeed");
    assert_eq!(user.access_token, "backend-google-jwt");
    assert_eq!(user.id.as_deref(), Some("77"));
}

#[tokio::test]
async fn google_sign_in_non_ok_is_an_error_even_with_html_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/google"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let profile = GoogleProfile {
        email: "aroha@example.nz".into(),
        first_name: "Aroha".into(),
        last_name: String::new(),
        avatar: None,
        google_id: "1".into(),
    };
    let err = test_client(&server.uri())
        .google_sign_in(&profile)
        .await
        .unwrap_err();
    assert!(
        matches!(err, BackendError::Upstream { status: 500, ref message } if message == "<html>oops</html>"),
        "got: {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_blog_posts_forwards_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/blog"))
        .and(query_param("page", "2"))
        .and(query_param("category", "hiking"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "posts": [], "total": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_client(&server.uri())
        .list_blog_posts(&BlogQuery {
            page: Some(2),
            category: Some("hiking".into()),
            ..BlogQuery::default()
        })
        .await
        .expect("list posts");
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn cancel_booking_attaches_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings/bk-9/cancel"))
        .and(header("authorization", "Bearer user-token"))
        .and(body_json(json!({ "reason": "weather" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "cancelled" })))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_client(&server.uri())
        .cancel_booking(
            "user-token",
            "bk-9",
            &CancelBooking {
                reason: Some("weather".into()),
            },
        )
        .await
        .expect("cancel");
    assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn payment_intent_error_passes_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payments/create-payment-intent"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Booking already paid" })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .create_payment_intent(
            "user-token",
            &PaymentIntentRequest {
                booking_id: "bk-1".into(),
                amount: 1299.0,
                currency: "nzd".into(),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.upstream_status(), Some(422));
    assert!(err.to_string().contains("Booking already paid"));
}

#[tokio::test]
async fn remove_from_wishlist_empty_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/wishlist/f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let body = test_client(&server.uri())
        .remove_from_wishlist("user-token", "f8a7b3c1-2d4e-4f6a-9b8c-1e2d3f4a5b6c")
        .await
        .expect("delete");
    assert!(body.is_null());
}

#[tokio::test]
async fn check_wishlist_reads_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/wishlist/check/a1b2c3d4-e5f6-4789-a0b1-c2d3e4f5a6b7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isInWishlist": true })))
        .mount(&server)
        .await;

    let flag = test_client(&server.uri())
        .check_wishlist("user-token", "a1b2c3d4-e5f6-4789-a0b1-c2d3e4f5a6b7")
        .await
        .expect("check");
    assert!(flag);
}

#[tokio::test]
async fn non_json_success_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .get_profile("user-token")
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn connection_failure_is_http_error() {
    let client = test_client("http://127.0.0.1:1");
    let err = client.destination_reviews("x").await.unwrap_err();
    assert!(matches!(err, BackendError::Http(_)), "got: {err:?}");
    assert_eq!(err.upstream_status(), None);
}
