use async_trait::async_trait;
use chrono::NaiveDate;
use coachbook_core::{
    models::booking::{Booking, BookingFilter, NewBooking},
    store::{BookingStore, BookingTransaction},
};
use mockall::mock;
use uuid::Uuid;

// Mock store and transaction for exercising failure paths
mock! {
    pub BookingStore {}

    #[async_trait]
    impl BookingStore for BookingStore {
        async fn begin(&self) -> eyre::Result<Box<dyn BookingTransaction>>;

        async fn get(&self, id: Uuid) -> eyre::Result<Option<Booking>>;

        async fn save(&self, booking: &Booking) -> eyre::Result<Booking>;

        async fn delete(&self, id: Uuid) -> eyre::Result<()>;

        async fn list(&self, filter: &BookingFilter) -> eyre::Result<Vec<Booking>>;

        async fn ping(&self) -> eyre::Result<()>;
    }
}

mock! {
    pub BookingTransaction {}

    #[async_trait]
    impl BookingTransaction for BookingTransaction {
        async fn lock_existing_for_update(
            &mut self,
            coach_id: i64,
            date: NaiveDate,
        ) -> eyre::Result<Vec<Booking>>;

        async fn insert(&mut self, booking: NewBooking) -> eyre::Result<Booking>;

        async fn commit(&mut self) -> eyre::Result<()>;

        async fn rollback(&mut self) -> eyre::Result<()>;
    }
}
