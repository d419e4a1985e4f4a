use axum::{http::StatusCode, response::IntoResponse};
use coachbook_api::middleware::error_handling::AppError;
use coachbook_core::errors::BookingError;
use rstest::rstest;

#[rstest]
#[case(BookingError::BadRequest("Invalid date format".to_string()), StatusCode::BAD_REQUEST)]
#[case(BookingError::NotFound("Booking not found".to_string()), StatusCode::NOT_FOUND)]
#[case(BookingError::Conflict("09:00-10:00 taken".to_string()), StatusCode::CONFLICT)]
#[case(BookingError::Storage(eyre::eyre!("commit failed")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: BookingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_report_converts_to_storage_error() {
    let app_error = AppError::from(eyre::eyre!("pool closed"));
    assert!(matches!(app_error.0, BookingError::Storage(_)));
    assert_eq!(app_error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}
