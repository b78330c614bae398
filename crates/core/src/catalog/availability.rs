//! Seat-availability filter

use crate::model::Table;

/// Tables whose free capacity covers `required` seats, in API order
pub fn available_tables(tables: &[Table], required: u32) -> Vec<Table> {
    tables
        .iter()
        .filter(|t| t.has_room_for(required))
        .cloned()
        .collect()
}
