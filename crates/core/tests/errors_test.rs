use std::error::Error;
use coachbook_core::errors::{BookingError, BookingResult};

#[test]
fn test_booking_error_display() {
    let bad_request = BookingError::BadRequest("Invalid date format".to_string());
    let conflict = BookingError::Conflict("09:30-10:30 is taken".to_string());
    let not_found = BookingError::NotFound("Booking not found".to_string());
    let storage = BookingError::Storage(eyre::eyre!("connection reset"));

    assert_eq!(bad_request.to_string(), "Bad request: Invalid date format");
    assert_eq!(conflict.to_string(), "Booking conflict: 09:30-10:30 is taken");
    assert_eq!(not_found.to_string(), "Resource not found: Booking not found");
    assert!(storage.to_string().starts_with("Storage error:"));
    assert!(storage.to_string().contains("connection reset"));
}

#[test]
fn test_storage_error_from_report() {
    fn failing() -> BookingResult<()> {
        let report: eyre::Result<()> = Err(eyre::eyre!("commit failed"));
        report?;
        Ok(())
    }

    match failing() {
        Err(BookingError::Storage(report)) => assert_eq!(report.to_string(), "commit failed"),
        other => panic!("Expected Storage error, got: {:?}", other),
    }
}

#[test]
fn test_domain_errors_have_no_source() {
    let conflict = BookingError::Conflict("taken".to_string());
    assert!(conflict.source().is_none());
}
