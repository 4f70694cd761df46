// HTTP routes: admin key management.

use crate::application::usecases::delete_license_key::DeleteLicenseKeyUseCase;
use crate::application::usecases::get_license_key::GetLicenseKeyUseCase;
use crate::application::usecases::issue_license_key::{
    IssueLicenseKeyCommand, IssueLicenseKeyUseCase,
};
use crate::application::usecases::list_license_keys::{
    ListLicenseKeysQuery, ListLicenseKeysUseCase,
};
use crate::interface::http::dto::license_key::{
    CreateLicenseKeyRequest, DeleteLicenseKeyResponse, LicenseKeyCreatedResponse,
    LicenseKeyDetailsResponse, LicenseKeyListItem, LicenseKeyListResponse, ListLicenseKeysParams,
};
use crate::interface::http::problem::{KP_REQUEST_MALFORMED, problem, use_case_problem};
use crate::interface::http::state::AppState;
use crate::interface::http::trace::TraceId;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

const KEYS_PATH: &str = "/keys";

/// Builds the admin key routes.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route(KEYS_PATH, post(create_key).get(list_keys))
        .route("/keys/:key", get(get_key).delete(delete_key))
}

/// Issues a new key and returns it with its expiry.
async fn create_key(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    payload: Result<Json<CreateLicenseKeyRequest>, JsonRejection>,
) -> Response {
    let trace_id = Some(trace_id.0);
    // Step 1: Reject bodies that are not the expected JSON shape.
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return problem(
                StatusCode::BAD_REQUEST,
                KP_REQUEST_MALFORMED,
                Some(rejection.body_text()),
                Some(KEYS_PATH.to_string()),
                trace_id,
            );
        }
    };

    // Step 2: Run the issue use case.
    let result = IssueLicenseKeyUseCase::execute(
        &state.ctx,
        IssueLicenseKeyCommand {
            key_type: payload.key_type,
            mode: payload.mode,
            custom_name: payload.custom_name,
            days: payload.days,
        },
    )
    .await;

    // Step 3: Map the outcome.
    match result {
        Ok(license) => (
            StatusCode::CREATED,
            Json(LicenseKeyCreatedResponse::from(&license)),
        )
            .into_response(),
        Err(err) => use_case_problem(err, Some(KEYS_PATH.to_string()), trace_id),
    }
}

/// Lists keys newest first, ten per page.
async fn list_keys(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    params: Result<Query<ListLicenseKeysParams>, QueryRejection>,
) -> Response {
    let trace_id = Some(trace_id.0);
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return problem(
                StatusCode::BAD_REQUEST,
                KP_REQUEST_MALFORMED,
                Some(rejection.body_text()),
                Some(KEYS_PATH.to_string()),
                trace_id,
            );
        }
    };

    let page = params.page_number();
    let query = ListLicenseKeysQuery {
        key_type: params.key_type,
        query: params.q,
        page,
    };
    match ListLicenseKeysUseCase::execute(&state.ctx, query).await {
        Ok(listing) => Json(LicenseKeyListResponse {
            items: listing.items.iter().map(LicenseKeyListItem::from).collect(),
            page: listing.page,
            total_pages: listing.total_pages,
        })
        .into_response(),
        Err(err) => use_case_problem(err, Some(KEYS_PATH.to_string()), trace_id),
    }
}

/// Returns one key with its current status.
async fn get_key(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    Path(key): Path<String>,
) -> Response {
    let instance = Some(format!("{KEYS_PATH}/{key}"));
    match GetLicenseKeyUseCase::execute(&state.ctx, &key).await {
        Ok(details) => {
            Json(LicenseKeyDetailsResponse::new(&details.license, details.status)).into_response()
        }
        Err(err) => use_case_problem(err, instance, Some(trace_id.0)),
    }
}

/// Deletes a key. Unknown keys still answer `{"ok": true}`.
async fn delete_key(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    Path(key): Path<String>,
) -> Response {
    let instance = Some(format!("{KEYS_PATH}/{key}"));
    match DeleteLicenseKeyUseCase::execute(&state.ctx, &key).await {
        Ok(_) => Json(DeleteLicenseKeyResponse { ok: true }).into_response(),
        Err(err) => use_case_problem(err, instance, Some(trace_id.0)),
    }
}
