//! # In-memory booking store
//!
//! A process-local [`BookingStore`] for tests and database-less runs. Each
//! (coach, date) key has its own async mutex; a transaction acquires it in
//! `lock_existing_for_update` and keeps the owned guard until it commits,
//! rolls back or is dropped. Inserts are staged inside the transaction and
//! only become visible on commit. A key's mutex is dropped from the map once
//! no transaction holds or waits on it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex as SyncMutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use coachbook_core::{
    models::booking::{Booking, BookingFilter, BookingKey, NewBooking},
    store::{BookingStore, BookingTransaction},
};
use eyre::{eyre, Result};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    bookings: Mutex<Vec<Booking>>,
    key_locks: SyncMutex<HashMap<BookingKey, Arc<Mutex<()>>>>,
}

#[derive(Clone, Default)]
pub struct MemoryBookingStore {
    tables: Arc<Tables>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_locks(&self) -> MutexGuard<'_, HashMap<BookingKey, Arc<Mutex<()>>>> {
        self.tables
            .key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn key_lock(&self, key: BookingKey) -> Arc<Mutex<()>> {
        self.key_locks().entry(key).or_default().clone()
    }

    // Callers must have dropped their guards for `keys` first. New clones are
    // only handed out under the map lock, so a count of one cannot race.
    fn prune_key_locks(&self, keys: impl IntoIterator<Item = BookingKey>) {
        let mut locks = self.key_locks();
        for key in keys {
            if locks.get(&key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                locks.remove(&key);
            }
        }
    }
}

pub struct MemoryTransaction {
    store: MemoryBookingStore,
    held: HashMap<BookingKey, OwnedMutexGuard<()>>,
    pending: Vec<Booking>,
    finished: bool,
}

impl MemoryTransaction {
    fn ensure_open(&self) -> Result<()> {
        if self.finished {
            return Err(eyre!("Transaction already finished"));
        }
        Ok(())
    }

    fn release(&mut self) {
        self.finished = true;
        self.pending.clear();
        if self.held.is_empty() {
            return;
        }
        let keys: Vec<BookingKey> = self.held.drain().map(|(key, _guard)| key).collect();
        self.store.prune_key_locks(keys);
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        self.release();
    }
}

#[async_trait]
impl BookingTransaction for MemoryTransaction {
    async fn lock_existing_for_update(
        &mut self,
        coach_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Booking>> {
        self.ensure_open()?;

        let key = BookingKey { coach_id, date };
        if !self.held.contains_key(&key) {
            let lock = self.store.key_lock(key);
            let guard = lock.lock_owned().await;
            self.held.insert(key, guard);
        }

        // Read only after the key lock is held so a competing commit is seen.
        let committed = self.store.tables.bookings.lock().await;
        let existing = committed
            .iter()
            .chain(self.pending.iter())
            .filter(|booking| booking.key() == key)
            .cloned()
            .collect();

        Ok(existing)
    }

    async fn insert(&mut self, booking: NewBooking) -> Result<Booking> {
        self.ensure_open()?;

        let booking = Booking {
            id: Uuid::new_v4(),
            coach_id: booking.coach_id,
            booking_date: booking.booking_date,
            time_slots: booking.time_slots,
            client_info: booking.client_info,
            created_at: Utc::now(),
        };
        self.pending.push(booking.clone());

        Ok(booking)
    }

    async fn commit(&mut self) -> Result<()> {
        self.ensure_open()?;

        {
            let mut committed = self.store.tables.bookings.lock().await;
            committed.append(&mut self.pending);
        }
        self.release();

        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.release();
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTransaction>> {
        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            held: HashMap::new(),
            pending: Vec::new(),
            finished: false,
        }))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Booking>> {
        let committed = self.tables.bookings.lock().await;
        Ok(committed.iter().find(|booking| booking.id == id).cloned())
    }

    async fn save(&self, updated: &Booking) -> Result<Booking> {
        let mut committed = self.tables.bookings.lock().await;
        let stored = committed
            .iter_mut()
            .find(|booking| booking.id == updated.id)
            .ok_or_else(|| eyre!("Booking {} no longer exists", updated.id))?;

        stored.coach_id = updated.coach_id;
        stored.booking_date = updated.booking_date;
        stored.time_slots = updated.time_slots.clone();
        stored.client_info = updated.client_info.clone();

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut committed = self.tables.bookings.lock().await;
        committed.retain(|booking| booking.id != id);
        Ok(())
    }

    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let committed = self.tables.bookings.lock().await;
        Ok(committed
            .iter()
            .filter(|booking| filter.matches(booking))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
