//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: submitted form data is unusable (e.g. a CPF
///   that does not reduce to 11 digits)
/// - **Session Errors**: the scan token is unknown or inactive
/// - **Infrastructure Errors**: database, templates, QR and CSV rendering
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed, including constraint violations.
    ///
    /// Returns HTTP 500 without exposing details.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Submitted data failed validation. The String is shown to the user.
    ///
    /// Returns HTTP 400 Bad Request when it escapes a form handler.
    #[error("{0}")]
    InvalidInput(String),

    /// The scan token does not match an active session.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Session not found or inactive")]
    SessionInvalid,

    /// Generic missing resource.
    #[error("Not found")]
    NotFound,

    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("QR code error: {0}")]
    QrCode(#[from] qrcode::types::QrError),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A URL built by the server failed to parse.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Convert AppError into an HTTP response.
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidInput` → 400 Bad Request
/// - `SessionInvalid`, `NotFound` → 404 Not Found
/// - everything else → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidInput(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", msg.clone())
            }
            AppError::SessionInvalid => {
                (StatusCode::NOT_FOUND, "session_invalid", self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Database(_)
            | AppError::Template(_)
            | AppError::QrCode(_)
            | AppError::Image(_)
            | AppError::Csv(_)
            | AppError::Url(_) => {
                tracing::error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
