use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type BookingResult<T> = Result<T, BookingError>;
