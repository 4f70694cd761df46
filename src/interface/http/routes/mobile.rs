// HTTP routes: public key validation for the mobile client.

use crate::application::usecases::validate_license_key::ValidateLicenseKeyUseCase;
use crate::interface::http::dto::license_key::{
    ValidateLicenseKeyRequest, ValidateLicenseKeyResponse,
};
use crate::interface::http::problem::{KP_REQUEST_MALFORMED, problem, use_case_problem};
use crate::interface::http::state::AppState;
use crate::interface::http::trace::TraceId;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;

const VALIDATE_PATH: &str = "/mobile/validate-key";

pub fn router() -> axum::Router<AppState> {
    axum::Router::new().route(VALIDATE_PATH, post(validate_key))
}

/// Answers whether a key is currently usable. Refusals carry no reason.
async fn validate_key(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    payload: Result<Json<ValidateLicenseKeyRequest>, JsonRejection>,
) -> Response {
    let trace_id = Some(trace_id.0);
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return problem(
                StatusCode::BAD_REQUEST,
                KP_REQUEST_MALFORMED,
                Some(rejection.body_text()),
                Some(VALIDATE_PATH.to_string()),
                trace_id,
            );
        }
    };

    let candidate = payload.key.unwrap_or_default();
    match ValidateLicenseKeyUseCase::execute(&state.ctx, &candidate).await {
        Ok(verdict) => Json(ValidateLicenseKeyResponse {
            valid: verdict.is_valid(),
            expires_at: verdict.expires_at.map(|at| at.to_rfc3339()),
            key_type: verdict.key_type.map(|kind| kind.as_str().to_string()),
        })
        .into_response(),
        Err(err) => use_case_problem(err, Some(VALIDATE_PATH.to_string()), trace_id),
    }
}
