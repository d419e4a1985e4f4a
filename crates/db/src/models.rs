use chrono::{DateTime, NaiveDate, Utc};
use coachbook_core::models::booking::Booking;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub coach_id: i64,
    pub booking_date: NaiveDate,
    pub time_slots: String,
    pub client_info: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbBooking> for Booking {
    fn from(row: DbBooking) -> Self {
        Self {
            id: row.id,
            coach_id: row.coach_id,
            booking_date: row.booking_date,
            time_slots: row.time_slots,
            client_info: row.client_info,
            created_at: row.created_at,
        }
    }
}
