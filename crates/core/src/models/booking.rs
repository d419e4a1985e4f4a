use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar day format accepted on the wire (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub coach_id: i64,
    pub booking_date: NaiveDate,
    pub time_slots: String,
    pub client_info: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The (coach, date) partition this booking belongs to.
    pub fn key(&self) -> BookingKey {
        BookingKey {
            coach_id: self.coach_id,
            date: self.booking_date,
        }
    }
}

/// Partition within which the no-overlap invariant is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingKey {
    pub coach_id: i64,
    pub date: NaiveDate,
}

/// A booking that passed admission and is about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub coach_id: i64,
    pub booking_date: NaiveDate,
    pub time_slots: String,
    pub client_info: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub coach_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.coach_id.is_none_or(|coach_id| booking.coach_id == coach_id)
            && self.date.is_none_or(|date| booking.booking_date == date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub student_name: String,
    pub coach_id: i64,
    pub date: String,
    pub time_slots: String,
}

/// Partial update. Missing, empty and zero fields all mean "leave unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub coach_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time_slots: Option<String>,
}

impl UpdateBookingRequest {
    /// Copies every supplied field onto `booking`. A date that does not
    /// parse leaves the stored date unchanged.
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(name) = self.student_name.as_deref().filter(|s| !s.is_empty()) {
            booking.client_info = name.to_string();
        }
        if let Some(coach_id) = self.coach_id.filter(|id| *id != 0) {
            booking.coach_id = coach_id;
        }
        if let Some(date) = self.date.as_deref().and_then(parse_date) {
            booking.booking_date = date;
        }
        if let Some(slots) = self.time_slots.as_deref().filter(|s| !s.is_empty()) {
            booking.time_slots = slots.to_string();
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBookingsQuery {
    pub coach_id: Option<i64>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub coach_id: i64,
    pub date: String,
    pub time_slots: String,
    pub student_name: String,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            coach_id: booking.coach_id,
            date: booking.booking_date.format(DATE_FORMAT).to_string(),
            time_slots: booking.time_slots,
            student_name: booking.client_info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses a wire date, returning `None` for anything but `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    // chrono also accepts unpadded fields and a leading sign or space.
    let canonical = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !canonical {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
