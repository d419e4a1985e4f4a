//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and `{"error": "..."}` bodies so
//! every endpoint reports failures the same way.
//!
//! | error                     | status |
//! |---------------------------|--------|
//! | `BadRequest`, bad body/id | 400    |
//! | `NotFound`                | 404    |
//! | `Conflict`                | 409    |
//! | `Storage`                 | 500    |

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coachbook_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that yields
/// a [`BookingError`] or an extractor rejection.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            BookingError::BadRequest(_) => StatusCode::BAD_REQUEST,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::Conflict(_) => StatusCode::CONFLICT,
            BookingError::Storage(report) => {
                tracing::error!("Storage failure: {report:#}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.0.to_string() }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Storage(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(BookingError::BadRequest(format!(
            "Invalid request payload: {}",
            rejection.body_text()
        )))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(BookingError::BadRequest(format!(
            "Invalid query parameters: {}",
            rejection.body_text()
        )))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(BookingError::BadRequest(format!(
            "Invalid booking id: {}",
            rejection.body_text()
        )))
    }
}
