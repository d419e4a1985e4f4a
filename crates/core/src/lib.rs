//! # CoachBook core
//!
//! Domain types and the booking rules shared by the storage and API crates:
//! time-range parsing and overlap, the store interface, conflict-checked
//! admission and the direct record operations.

pub mod admission;
pub mod bookings;
pub mod errors;
pub mod models;
pub mod store;
pub mod time_range;
