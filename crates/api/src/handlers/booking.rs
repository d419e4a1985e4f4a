//! # Booking Handlers
//!
//! Thin adapters between HTTP and the booking operations. Creation goes
//! through conflict-checked admission; list, update and delete act on the
//! store directly.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use coachbook_core::{
    admission, bookings,
    models::booking::{
        BookingResponse, CreateBookingRequest, ListBookingsQuery, MessageResponse,
        UpdateBookingRequest,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Creates a booking if none of its ranges overlap an existing booking for
/// the same coach and day.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// {"student_name": "Alice", "coach_id": 5, "date": "2024-06-01", "time_slots": "09:00-10:00"}
/// ```
///
/// # Errors
///
/// * 400 - malformed body, missing field or date not `YYYY-MM-DD`
/// * 409 - a requested range is already booked
/// * 500 - the admission transaction failed and was rolled back
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload?;

    admission::admit(state.store.as_ref(), payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Booking created successfully")),
    ))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<ListBookingsQuery>, QueryRejection>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let Query(query) = query?;

    let found = bookings::list(state.store.as_ref(), &query).await?;

    Ok(Json(found.into_iter().map(BookingResponse::from).collect()))
}

/// Overwrites the supplied fields. Overlaps are not re-checked.
#[axum::debug_handler]
pub async fn update_booking(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateBookingRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    bookings::update(state.store.as_ref(), id, &payload).await?;

    Ok(Json(MessageResponse::new("Booking updated successfully")))
}

#[axum::debug_handler]
pub async fn delete_booking(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;

    bookings::delete(state.store.as_ref(), id).await?;

    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}
