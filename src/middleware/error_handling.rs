use crate::error::AppError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// Map domain errors to HTTP responses.
///
/// Internal failure classes (crypto, storage, config) return a generic body;
/// their detail is logged server-side only.
pub fn map_error(err: &AppError) -> (StatusCode, ErrorBody) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let (code, message) = match err {
        AppError::BadRequest(_) => ("INVALID_REQUEST", err.to_string()),
        AppError::NotFound => ("NOT_FOUND", err.to_string()),
        AppError::Encryption(_)
        | AppError::Database(_)
        | AppError::Internal
        | AppError::Config(_)
        | AppError::StartServer(_) => ("INTERNAL_SERVER_ERROR", "internal server error".into()),
    };
    (status, ErrorBody {
        error: message,
        code,
    })
}

pub fn into_response(err: AppError) -> impl IntoResponse {
    if err.status_code() >= 500 {
        tracing::error!(error = %err, "request failed");
    }
    let (status, body) = map_error(&err);
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_detail_is_not_exposed() {
        let (status, body) = map_error(&AppError::Encryption("tag mismatch at byte 7".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal server error");
        assert!(!format!("{body:?}").contains("tag mismatch"));
    }

    #[test]
    fn bad_request_keeps_its_message() {
        let (status, body) = map_error(&AppError::BadRequest("message is required".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("message is required"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, body) = map_error(&AppError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "NOT_FOUND");
    }
}
