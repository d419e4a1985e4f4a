//! # Booking store interface
//!
//! Persistence is injected into admission and the request handlers through
//! these traits. An implementation must make
//! [`BookingTransaction::lock_existing_for_update`] exclusive per
//! (coach, date) key for the lifetime of the transaction, including against
//! concurrent inserts into a key that has no bookings yet. That lock is the
//! only thing preventing two admissions from both seeing a free slot.
//!
//! Dropping a transaction without committing must behave like a rollback.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingFilter, NewBooking};

#[async_trait]
pub trait BookingTransaction: Send {
    /// Returns every booking for the key and holds the key lock until the
    /// transaction ends. Blocks while another transaction holds it.
    async fn lock_existing_for_update(
        &mut self,
        coach_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Booking>>;

    async fn insert(&mut self, booking: NewBooking) -> Result<Booking>;

    /// Makes the inserts visible and releases the key locks. The transaction
    /// cannot be used afterwards.
    async fn commit(&mut self) -> Result<()>;

    /// Discards the inserts and releases the key locks. A no-op once the
    /// transaction has finished.
    async fn rollback(&mut self) -> Result<()>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn BookingTransaction>>;

    async fn get(&self, id: Uuid) -> Result<Option<Booking>>;

    /// Overwrites the mutable fields of an existing booking.
    async fn save(&self, booking: &Booking) -> Result<Booking>;

    /// Removes a booking. Removing an unknown id is not an error.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Bookings matching the filter, in storage (creation) order.
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
