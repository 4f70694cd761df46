use crate::interface::http::problem::{KP_AUTH_FORBIDDEN, KP_AUTH_INVALID_CREDENTIALS, problem};
use crate::interface::http::state::AppState;
use crate::interface::http::trace::TraceId;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::warn;

/// Outcome of an admin capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDecision {
    Granted,
    /// No usable credential was presented.
    Missing,
    /// A credential was presented but does not grant admin rights.
    Rejected,
}

/// Decides whether a bearer credential carries admin rights.
pub trait AdminAuthenticator: Send + Sync {
    fn authorize(&self, bearer: Option<&str>) -> AdminDecision;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminTokenConfigError {
    #[error("admin token digest must be 64 hex characters")]
    InvalidDigest,
}

/// Shared-secret admin check. Only the SHA-256 digest of the token is held.
pub struct SharedSecretAuthenticator {
    digest: [u8; 32],
}

impl SharedSecretAuthenticator {
    /// Build from a hex SHA-256 digest as stored in configuration.
    pub fn from_hex_digest(hex_digest: &str) -> Result<Self, AdminTokenConfigError> {
        let bytes =
            hex::decode(hex_digest.trim()).map_err(|_| AdminTokenConfigError::InvalidDigest)?;
        let digest: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AdminTokenConfigError::InvalidDigest)?;
        Ok(Self { digest })
    }

    /// Build from the plaintext token.
    pub fn from_token(token: &str) -> Self {
        Self {
            digest: hash_token(token),
        }
    }
}

fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

impl AdminAuthenticator for SharedSecretAuthenticator {
    fn authorize(&self, bearer: Option<&str>) -> AdminDecision {
        match bearer {
            None => AdminDecision::Missing,
            Some(token) if constant_time_eq(&hash_token(token), &self.digest) => {
                AdminDecision::Granted
            }
            Some(_) => AdminDecision::Rejected,
        }
    }
}

/// Endpoints reachable without an admin credential.
fn is_public(method: &Method, path: &str) -> bool {
    if path == "/health" || path == "/ready" || path == "/metrics" {
        return true;
    }
    method == Method::POST && path == "/mobile/validate-key"
}

/// Extract a non-empty bearer token from the Authorization header.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Requires admin rights on every non-public route.
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    // Step 1: allow unauthenticated public endpoints.
    let path = req.uri().path().to_string();
    if is_public(req.method(), &path) {
        return Ok(next.run(req).await);
    }
    let trace_id = req.extensions().get::<TraceId>().map(|t| t.0.clone());

    // Step 2: ask the injected authenticator.
    let decision = state.admin.authorize(bearer_token(&req));
    match decision {
        AdminDecision::Granted => Ok(next.run(req).await),
        AdminDecision::Missing => Err(problem(
            StatusCode::UNAUTHORIZED,
            KP_AUTH_INVALID_CREDENTIALS,
            Some("missing bearer token".to_string()),
            Some(path),
            trace_id,
        )),
        AdminDecision::Rejected => {
            warn!(
                trace_id = trace_id.as_deref().unwrap_or(""),
                path = %path,
                "admin credential rejected"
            );
            Err(problem(
                StatusCode::FORBIDDEN,
                KP_AUTH_FORBIDDEN,
                Some("admin credential rejected".to_string()),
                Some(path),
                trace_id,
            ))
        }
    }
}
