use crate::interface::http::state::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Liveness only; the key store is checked by `/ready`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::health;

    #[tokio::test]
    async fn given_running_process_when_probed_should_report_ok() {
        let body = health().await.0;
        assert_eq!(body["status"], "ok");
    }
}
