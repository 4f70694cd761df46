use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use keypanel::application::context::AppContext;
use keypanel::domain::services::clock::ManualClock;
use keypanel::domain::value_objects::timestamps::Timestamp;
use keypanel::infrastructure::db::repositories::Repositories;
use keypanel::interface::http;
use keypanel::interface::http::auth::SharedSecretAuthenticator;
use keypanel::interface::http::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;
use time::Duration;
use time::macros::datetime;
use tower::util::ServiceExt;

const ADMIN_TOKEN: &str = "test-admin-token";

fn setup() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Timestamp::from(datetime!(
        2024-01-01 00:00:00 UTC
    ))));
    let ctx = AppContext::new(Repositories::in_memory(), clock.clone(), "URAZ");
    let state = AppState {
        ctx: Arc::new(ctx),
        admin: Arc::new(SharedSecretAuthenticator::from_token(ADMIN_TOKEN)),
        metrics: None,
    };
    (http::app(state), clock)
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn issue_random(app: &Router, key_type: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/keys")
        .header(header::AUTHORIZATION, format!("Bearer {ADMIN_TOKEN}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "type": key_type, "mode": "random" }).to_string(),
        ))
        .unwrap();
    let (status, body) = call(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    body["key"].as_str().unwrap().to_string()
}

async fn validate(app: &Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/mobile/validate-key")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    call(app, request).await
}

#[tokio::test]
async fn given_hourly_key_when_validated_before_and_after_expiry_should_flip_to_invalid() {
    let (app, clock) = setup();
    let key = issue_random(&app, "hourly").await;
    let payload = json!({ "key": key }).to_string();

    let (status, body) = validate(&app, &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "valid": true, "expiresAt": "2024-01-01T01:00:00Z", "type": "hourly" })
    );

    clock.advance(Duration::minutes(61));
    let (status, body) = validate(&app, &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": false }));
}

#[tokio::test]
async fn given_key_at_exact_expiry_instant_when_validated_should_be_invalid() {
    let (app, clock) = setup();
    let key = issue_random(&app, "daily").await;
    clock.advance(Duration::days(1));

    let (_, body) = validate(&app, &json!({ "key": key }).to_string()).await;

    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn given_padded_key_when_validated_should_trim_before_lookup() {
    let (app, _clock) = setup();
    let key = issue_random(&app, "weekly").await;

    let (_, body) = validate(&app, &json!({ "key": format!("  {key}\n") }).to_string()).await;

    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn given_missing_blank_or_unknown_key_when_validated_should_be_invalid() {
    let (app, _clock) = setup();

    for payload in [r#"{}"#, r#"{"key":null}"#, r#"{"key":"   "}"#, r#"{"key":"URAZ-NOPE"}"#] {
        let (status, body) = validate(&app, payload).await;
        assert_eq!(status, StatusCode::OK, "payload {payload}");
        assert_eq!(body, json!({ "valid": false }), "payload {payload}");
    }
}

#[tokio::test]
async fn given_malformed_json_when_validated_should_return_malformed_problem() {
    let (app, _clock) = setup();

    let (status, body) = validate(&app, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "KP_REQUEST_MALFORMED");
}
