//! Booking model definitions

use serde::{Deserialize, Serialize};

use super::{serde_helpers, Table};

/// Person fields embedded in booking query results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Table fields embedded in booking query results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::count_or_zero")]
    pub number: u32,
    #[serde(default)]
    pub name: String,
}

/// Association of a person with a table for a number of seats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub person_id: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub table_id: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::count_or_zero")]
    pub seats_booked: u32,
    #[serde(default)]
    pub person: Option<PersonSummary>,
    #[serde(default)]
    pub table: Option<TableSummary>,
}

impl Booking {
    pub fn new(id: i64, person_id: i64, table_id: i64, seats_booked: u32) -> Self {
        Self {
            id,
            person_id: Some(person_id),
            table_id: Some(table_id),
            seats_booked,
            person: None,
            table: None,
        }
    }

    /// Attach the embedded person summary
    pub fn with_person(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.person = Some(PersonSummary {
            id: self.person_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        });
        self
    }

    /// Attach the embedded table summary
    pub fn with_table(mut self, number: u32, name: impl Into<String>) -> Self {
        self.table = Some(TableSummary {
            id: self.table_id,
            number,
            name: name.into(),
        });
        self
    }

    /// Person id, from the flat field or the embedded summary
    pub fn person_id(&self) -> Option<i64> {
        self.person_id
            .or_else(|| self.person.as_ref().and_then(|p| p.id))
    }

    /// Table id, from the flat field or the embedded summary
    pub fn table_id(&self) -> Option<i64> {
        self.table_id.or_else(|| self.table.as_ref().and_then(|t| t.id))
    }

    /// Whether the booking currently sits at `table`, by id or else by number
    pub fn is_at(&self, table: &Table) -> bool {
        match self.table_id() {
            Some(id) => id == table.id,
            None => self
                .table
                .as_ref()
                .is_some_and(|t| t.number == table.number),
        }
    }

    pub fn last_name(&self) -> &str {
        self.person.as_ref().map(|p| p.last_name.as_str()).unwrap_or("")
    }

    pub fn table_name(&self) -> &str {
        self.table.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }
}
