//! # Conflict-checked admission
//!
//! The only way a booking is created. For a (coach, date) key the store lock
//! is taken first, the existing bookings are read under it, every incoming
//! range is tested against every booked range, and the new booking is
//! inserted and committed in the same transaction. Two overlapping requests
//! racing for one key therefore produce exactly one booking: the second
//! transaction waits on the lock and then sees the first one's insert.
//!
//! Keys are independent; admissions for different coaches or days never
//! wait on each other.
//!
//! Any failure after `begin` rolls the transaction back before the error is
//! returned, so a rejected or failed admission leaves nothing behind.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::{
    errors::{BookingError, BookingResult},
    models::booking::{Booking, CreateBookingRequest, NewBooking, parse_date},
    store::{BookingStore, BookingTransaction},
    time_range::{find_conflict, parse_slots},
};

/// Validates and admits a new booking.
///
/// # Errors
///
/// * `BookingError::BadRequest` - a required field is empty or zero, or the
///   date is not `YYYY-MM-DD`
/// * `BookingError::Conflict` - a requested range overlaps a booked one
/// * `BookingError::Storage` - the transaction could not be completed
pub async fn admit(
    store: &dyn BookingStore,
    request: CreateBookingRequest,
) -> BookingResult<Booking> {
    let date = validate(&request)?;

    let mut tx = store.begin().await?;

    match check_and_insert(tx.as_mut(), date, request).await {
        Ok(booking) => {
            tx.commit().await?;
            info!(
                booking_id = %booking.id,
                coach_id = booking.coach_id,
                date = %booking.booking_date,
                slots = %booking.time_slots,
                "Booking admitted"
            );
            Ok(booking)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Rollback after failed admission also failed: {rollback_err:#}");
            }
            Err(err)
        }
    }
}

fn validate(request: &CreateBookingRequest) -> BookingResult<NaiveDate> {
    if request.student_name.is_empty() {
        return Err(BookingError::BadRequest(
            "student_name is required".to_string(),
        ));
    }
    if request.coach_id <= 0 {
        return Err(BookingError::BadRequest(
            "coach_id must be a positive integer".to_string(),
        ));
    }
    if request.time_slots.is_empty() {
        return Err(BookingError::BadRequest(
            "time_slots is required".to_string(),
        ));
    }

    parse_date(&request.date)
        .ok_or_else(|| BookingError::BadRequest("Invalid date format".to_string()))
}

async fn check_and_insert(
    tx: &mut dyn BookingTransaction,
    date: NaiveDate,
    request: CreateBookingRequest,
) -> BookingResult<Booking> {
    let existing = tx.lock_existing_for_update(request.coach_id, date).await?;
    debug!(
        coach_id = request.coach_id,
        %date,
        existing = existing.len(),
        "Key locked"
    );

    let candidates = parse_slots(&request.time_slots);

    for booked in &existing {
        let taken = parse_slots(&booked.time_slots);
        if let Some((wanted, held)) = find_conflict(&candidates, &taken) {
            warn!(
                coach_id = request.coach_id,
                %date,
                requested = %wanted,
                booked = %held,
                existing_booking = %booked.id,
                "Booking rejected: time slot already taken"
            );
            return Err(BookingError::Conflict(format!(
                "Time slot {wanted} is already booked ({held}), please choose another time slot"
            )));
        }
    }

    let booking = tx
        .insert(NewBooking {
            coach_id: request.coach_id,
            booking_date: date,
            time_slots: request.time_slots,
            client_info: request.student_name,
        })
        .await?;

    Ok(booking)
}
