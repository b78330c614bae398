//! Table model definitions

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Capacity assumed when the API does not report one
pub const DEFAULT_TABLE_CAPACITY: u32 = 10;

fn default_capacity() -> u32 {
    DEFAULT_TABLE_CAPACITY
}

/// Capacity where null falls back to the default
fn capacity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_helpers::option_id(deserializer)? {
        Some(value) => u32::try_from(value)
            .map_err(|_| de::Error::custom(format!("invalid capacity: {}", value))),
        None => Ok(DEFAULT_TABLE_CAPACITY),
    }
}

/// A table of the event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: i64,
    #[serde(deserialize_with = "serde_helpers::count")]
    pub number: u32,
    #[serde(default)]
    pub name: String,
    /// Total seat capacity
    #[serde(default = "default_capacity", deserialize_with = "capacity")]
    pub seats_number: u32,
    /// Seats already committed against this table
    #[serde(
        rename = "totalSeatsBooked",
        default,
        deserialize_with = "serde_helpers::count_or_zero"
    )]
    pub total_seats_booked: u32,
}

impl Table {
    /// Create an empty table with the default capacity
    pub fn new(id: i64, number: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            number,
            name: name.into(),
            seats_number: DEFAULT_TABLE_CAPACITY,
            total_seats_booked: 0,
        }
    }

    /// Set the capacity
    pub fn with_capacity(mut self, seats_number: u32) -> Self {
        self.seats_number = seats_number;
        self
    }

    /// Set the booked total
    pub fn with_booked(mut self, total_seats_booked: u32) -> Self {
        self.total_seats_booked = total_seats_booked;
        self
    }

    /// Seats still free; zero when the API reports an overbooked table
    pub fn free_seats(&self) -> u32 {
        self.seats_number.saturating_sub(self.total_seats_booked)
    }

    /// `capacity - booked >= seats`, with an overbooked table never qualifying
    pub fn has_room_for(&self, seats: u32) -> bool {
        i64::from(self.seats_number) - i64::from(self.total_seats_booked) >= i64::from(seats)
    }

    pub fn is_full(&self) -> bool {
        self.total_seats_booked >= self.seats_number
    }
}
