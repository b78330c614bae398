//! Table catalog with live text filtering

use tracing::debug;

use crate::api::SeatingApi;
use crate::model::Table;
use crate::Result;

use super::available_tables;

/// Queries shorter than this (but not empty) leave the list untouched
pub const MIN_QUERY_LEN: usize = 2;

/// What the text filter shows when a query matches nothing
///
/// `ShowAll` makes an empty search indistinguishable from no search at all.
/// It stays the default until the product owners decide otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyMatch {
    /// Fall back to the unfiltered list
    ShowAll,
    /// Show an empty list
    ShowNone,
}

impl Default for EmptyMatch {
    fn default() -> Self {
        Self::ShowAll
    }
}

fn matches(table: &Table, query: &str) -> bool {
    table.name.contains(query) || table.number.to_string() == query
}

/// Apply the text filter to `tables`
///
/// Returns `None` when the query is a single character, meaning the caller
/// keeps whatever it currently shows.
pub fn filter_tables(tables: &[Table], query: &str, empty_match: EmptyMatch) -> Option<Vec<Table>> {
    match query.chars().count() {
        0 => Some(tables.to_vec()),
        n if n < MIN_QUERY_LEN => None,
        _ => {
            let filtered: Vec<Table> = tables
                .iter()
                .filter(|t| matches(t, query))
                .cloned()
                .collect();
            if filtered.is_empty() && empty_match == EmptyMatch::ShowAll {
                Some(tables.to_vec())
            } else {
                Some(filtered)
            }
        }
    }
}

/// Tables a person can pick from, plus the subset currently displayed
#[derive(Debug, Clone)]
pub struct TableCatalog {
    fetched: Vec<Table>,
    required_seats: u32,
    available: Vec<Table>,
    visible: Vec<Table>,
    empty_match: EmptyMatch,
}

impl TableCatalog {
    /// Build a catalog from a fetched table list
    pub fn new(fetched: Vec<Table>, required_seats: u32) -> Self {
        let available = available_tables(&fetched, required_seats);
        Self {
            fetched,
            required_seats,
            visible: available.clone(),
            available,
            empty_match: EmptyMatch::default(),
        }
    }

    /// Fetch the table list and keep the tables with room for `required_seats`
    pub async fn load(api: &dyn SeatingApi, required_seats: u32) -> Result<Self> {
        let fetched = api.load_tables().await?;
        let catalog = Self::new(fetched, required_seats);
        debug!(
            "Loaded {} tables, {} with room for {} seat(s)",
            catalog.fetched.len(),
            catalog.available.len(),
            required_seats
        );
        Ok(catalog)
    }

    /// Set the empty-match policy
    pub fn with_empty_match(mut self, empty_match: EmptyMatch) -> Self {
        self.empty_match = empty_match;
        self
    }

    /// Reapply the availability filter for a new seat count; resets the text filter
    pub fn set_required_seats(&mut self, required_seats: u32) {
        self.required_seats = required_seats;
        self.available = available_tables(&self.fetched, required_seats);
        self.visible = self.available.clone();
    }

    /// Apply a live text query
    pub fn apply_query(&mut self, query: &str) {
        if let Some(visible) = filter_tables(&self.available, query, self.empty_match) {
            self.visible = visible;
        }
    }

    pub fn required_seats(&self) -> u32 {
        self.required_seats
    }

    /// Tables with enough room, unfiltered by text
    pub fn available(&self) -> &[Table] {
        &self.available
    }

    /// Tables currently displayed
    pub fn visible(&self) -> &[Table] {
        &self.visible
    }

    /// Look up an available table by its display number
    pub fn find_by_number(&self, number: u32) -> Option<&Table> {
        self.available.iter().find(|t| t.number == number)
    }
}
