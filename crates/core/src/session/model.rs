//! Session model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Person;

/// The logged-in person and the bearer token the API issued for them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub person: Person,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session for the given person
    pub fn new(person: Person) -> Self {
        Self {
            person,
            token: None,
            logged_in_at: Utc::now(),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the person record, keeping the token
    pub fn with_person(mut self, person: Person) -> Self {
        self.person = person;
        self
    }
}
