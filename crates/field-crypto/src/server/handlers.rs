//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, FieldsRequest, FieldsResponse, HealthResponse};
use common::ServiceError;
use tracing::{debug, warn};

use super::state::AppState;
use crate::error::{CryptoError, ErrorKind, SecurityError};
use crate::fields::{decrypt_fields, encrypt_fields, parse_paths};

/// Which way a request transforms its fields.
#[derive(Debug, Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

/// `POST /encrypt` — encrypt the listed fields of the request payload.
///
/// Each addressed string leaf is replaced with a base64 envelope. Empty
/// strings are left as they are.
pub async fn encrypt(
    State(state): State<AppState>,
    body: Result<Json<FieldsRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(req)) => transform(&state, req, Direction::Encrypt),
        Err(rejection) => error_response(&rejection_to_service_error(&rejection)),
    }
}

/// `POST /decrypt` — decrypt the listed fields of the request payload.
///
/// Returns `400` for a malformed body or envelope and `422` only when an
/// envelope fails authentication. The whole request fails if any single field fails.
pub async fn decrypt(
    State(state): State<AppState>,
    body: Result<Json<FieldsRequest>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(req)) => transform(&state, req, Direction::Decrypt),
        Err(rejection) => error_response(&rejection_to_service_error(&rejection)),
    }
}

/// `GET /health` — liveness check.
///
/// A running sidecar always holds a validated key, so this returns `200 OK`.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        algorithm: state.key.algorithm().to_string(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

fn transform(state: &AppState, req: FieldsRequest, direction: Direction) -> Response {
    let paths = match parse_paths(&req.fields) {
        Ok(p) => p,
        Err(e) => return error_response(&ServiceError::BadRequest(e.to_string())),
    };

    let mut payload = req.payload;
    let result = match direction {
        Direction::Encrypt => encrypt_fields(state.engine.as_ref(), &mut payload, &paths, &state.key),
        Direction::Decrypt => decrypt_fields(state.engine.as_ref(), &mut payload, &paths, &state.key),
    };

    match result {
        Ok(transformed) => {
            debug!(?direction, fields = paths.len(), transformed, "fields transformed");
            (StatusCode::OK, Json(FieldsResponse { payload, transformed })).into_response()
        }
        Err(e) => {
            // `payload` may be half-transformed here; it is dropped, never returned.
            warn!(?direction, kind = ?e.kind(), error = %e, "field transformation failed");
            error_response(&to_service_error(&e))
        }
    }
}

/// Map a body extraction failure onto the HTTP error taxonomy.
///
/// Messages are fixed; serde's detail can quote field values from the body.
fn rejection_to_service_error(rejection: &JsonRejection) -> ServiceError {
    debug!(status = %rejection.status(), "request body rejected");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ServiceError::PayloadTooLarge("request body exceeds the size limit".into());
    }
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => "expected `Content-Type: application/json`",
        JsonRejection::JsonSyntaxError(_) => "request body is not valid JSON",
        JsonRejection::JsonDataError(_) => "request body must be an object with `payload` and `fields`",
        _ => "failed to read request body",
    };
    ServiceError::BadRequest(message.into())
}

/// Map a crypto failure onto the HTTP error taxonomy.
///
/// Authentication failures get the bare generic message so callers cannot
/// tell a wrong key from tampered data. An authenticated payload that is not
/// UTF-8 gets the same message.
fn to_service_error(err: &SecurityError) -> ServiceError {
    if err.cause() == &CryptoError::InvalidUtf8 {
        return ServiceError::DecryptionFailure(err.to_string());
    }
    match err.kind() {
        ErrorKind::InvalidEncoding => ServiceError::BadRequest(format!("{err}: {}", err.cause())),
        ErrorKind::AuthenticationFailure => ServiceError::DecryptionFailure(err.to_string()),
        ErrorKind::EntropyFailure => ServiceError::EncryptionFailure(err.to_string()),
    }
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}
