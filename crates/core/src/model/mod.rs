//! Seating data model
//!
//! All three entities are owned by the seating API. The client only holds
//! transient copies for rendering and filtering.

mod booking;
mod person;
pub mod serde_helpers;
mod table;

pub use booking::{Booking, PersonSummary, TableSummary};
pub use person::{Person, Role};
pub use table::{Table, DEFAULT_TABLE_CAPACITY};
