use crate::application::shared::license_key_types::LicenseKeyUseCaseError;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::error;

/// RFC 7807 Problem Details payload.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub r#type: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The HTTP status code for this occurrence.
    pub status: u16,
    /// A human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies this specific occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// A stable, machine-readable application error code (KP_...).
    pub code: String,
    /// Request trace id, mirrored from the `x-request-id` header.
    #[serde(rename = "traceId", skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Build a Problem Details response with the correct content-type.
pub fn problem(
    status: StatusCode,
    code: &str,
    detail: Option<String>,
    instance: Option<String>,
    trace_id: Option<String>,
) -> Response {
    // Step 1: Build the problem payload.
    let payload = ProblemDetails {
        r#type: "about:blank".to_string(),
        title: status.canonical_reason().unwrap_or("Error").to_string(),
        status: status.as_u16(),
        detail,
        instance,
        code: code.to_string(),
        trace_id,
    };

    // Step 2: Convert to an HTTP response with JSON body.
    let mut response = (status, Json(payload)).into_response();

    // Step 3: Ensure RFC 7807 content type.
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/problem+json"),
    );

    response
}

/// Map a use case failure onto its problem response. Storage details are logged, not returned.
pub fn use_case_problem(
    err: LicenseKeyUseCaseError,
    instance: Option<String>,
    trace_id: Option<String>,
) -> Response {
    match err {
        LicenseKeyUseCaseError::Validation(detail) => problem(
            StatusCode::BAD_REQUEST,
            KP_KEY_VALIDATION_FAILED,
            Some(detail),
            instance,
            trace_id,
        ),
        LicenseKeyUseCaseError::Conflict => problem(
            StatusCode::CONFLICT,
            KP_KEY_CONFLICT,
            Some("key already exists".to_string()),
            instance,
            trace_id,
        ),
        LicenseKeyUseCaseError::NotFound => problem(
            StatusCode::NOT_FOUND,
            KP_KEY_NOT_FOUND,
            Some("key not found".to_string()),
            instance,
            trace_id,
        ),
        LicenseKeyUseCaseError::Storage(reason) => {
            error!(
                trace_id = trace_id.as_deref().unwrap_or(""),
                reason = %reason,
                "license key storage failure"
            );
            problem(
                StatusCode::INTERNAL_SERVER_ERROR,
                KP_INTERNAL,
                Some("internal error".to_string()),
                instance,
                trace_id,
            )
        }
    }
}

pub const KP_REQUEST_MALFORMED: &str = "KP_REQUEST_MALFORMED";
pub const KP_AUTH_INVALID_CREDENTIALS: &str = "KP_AUTH_INVALID_CREDENTIALS";
pub const KP_AUTH_FORBIDDEN: &str = "KP_AUTH_FORBIDDEN";
pub const KP_KEY_VALIDATION_FAILED: &str = "KP_KEY_VALIDATION_FAILED";
pub const KP_KEY_NOT_FOUND: &str = "KP_KEY_NOT_FOUND";
pub const KP_KEY_CONFLICT: &str = "KP_KEY_CONFLICT";
pub const KP_INTERNAL: &str = "KP_INTERNAL";
