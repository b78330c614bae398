//! Booking module
//!
//! The confirmation flow an attendee goes through to reserve a table.

mod flow;

pub use flow::{BookingFlow, BookingOutcome, BookingState};
