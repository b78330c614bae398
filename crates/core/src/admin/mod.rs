//! Admin module
//!
//! Reservation and table management. Each action is one request against
//! the seating API; local lists change only once the API accepted it.

mod reservations;
mod tables;

pub use reservations::{reassign_candidates, ReservationBoard, ReservationFilter};
pub use tables::TableBoard;

/// How a board brings its local list in line after a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPolicy {
    /// Apply the confirmed change to the local list, no extra request
    PatchLocal,
    /// Reload the list from the API
    Refetch,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self::PatchLocal
    }
}
