use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_core::{
    models::booking::{Booking, BookingFilter, NewBooking},
    store::{BookingStore, BookingTransaction},
};
use eyre::{eyre, Result};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{DbPool, repositories::booking};

/// PostgreSQL-backed store. Safe to share between server processes: the key
/// lock lives in the database, not in this process.
#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Open transaction. Dropped without `commit`, sqlx rolls it back and the
/// key locks are released.
pub struct PgBookingTransaction {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgBookingTransaction {
    fn open(&mut self) -> Result<&mut Transaction<'static, Postgres>> {
        self.tx
            .as_mut()
            .ok_or_else(|| eyre!("Transaction already finished"))
    }
}

#[async_trait]
impl BookingTransaction for PgBookingTransaction {
    async fn lock_existing_for_update(
        &mut self,
        coach_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        let tx = self.open()?;
        let rows = booking::lock_bookings_for_update(&mut **tx, coach_id, date).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn insert(&mut self, new_booking: NewBooking) -> Result<Booking> {
        let tx = self.open()?;
        let row = booking::insert_booking(&mut **tx, &new_booking).await?;
        Ok(row.into())
    }

    async fn commit(&mut self) -> Result<()> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| eyre!("Transaction already finished"))?;
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgBookingTransaction { tx: Some(tx) }))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = booking::get_booking_by_id(&self.pool, id).await?;
        Ok(row.map(Booking::from))
    }

    async fn save(&self, updated: &Booking) -> Result<Booking> {
        let row = booking::update_booking(&self.pool, updated).await?;
        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        booking::delete_booking(&self.pool, id).await
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let rows = booking::list_bookings(&self.pool, filter).await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
