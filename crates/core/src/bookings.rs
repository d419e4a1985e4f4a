//! Direct record operations: list, update and delete.
//!
//! None of these go through admission. In particular an update may move a
//! booking onto a range that overlaps another booking of the same coach and
//! day; the no-overlap guarantee only holds at creation time.

use tracing::debug;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::booking::{Booking, BookingFilter, ListBookingsQuery, UpdateBookingRequest, parse_date},
    store::BookingStore,
};

/// Lists bookings, optionally narrowed by coach and/or day.
///
/// A `date` that is not `YYYY-MM-DD` is ignored rather than rejected.
pub async fn list(store: &dyn BookingStore, query: &ListBookingsQuery) -> BookingResult<Vec<Booking>> {
    let date = match query.date.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                debug!("Ignoring unparseable date filter: {raw}");
            }
            parsed
        }
        None => None,
    };

    let filter = BookingFilter {
        coach_id: query.coach_id,
        date,
    };

    Ok(store.list(&filter).await?)
}

/// Applies a partial update and saves it without re-checking overlaps.
pub async fn update(
    store: &dyn BookingStore,
    id: Uuid,
    request: &UpdateBookingRequest,
) -> BookingResult<Booking> {
    let mut booking = store
        .get(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Booking with ID {id} not found")))?;

    request.apply_to(&mut booking);

    let saved = store.save(&booking).await?;
    debug!(booking_id = %saved.id, "Booking updated");
    Ok(saved)
}

pub async fn delete(store: &dyn BookingStore, id: Uuid) -> BookingResult<()> {
    store.delete(id).await?;
    debug!(booking_id = %id, "Booking deleted");
    Ok(())
}
