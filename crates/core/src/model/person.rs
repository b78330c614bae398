//! Person model definitions

use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Role granted to a person by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

/// A logged-in attendee or admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mail: String,
    /// Seats this person may still reserve. Only ever goes down to zero.
    #[serde(default, deserialize_with = "serde_helpers::count_or_zero")]
    pub seats_remaining: u32,
    #[serde(default)]
    pub role: Role,
}

impl Person {
    /// Create a new person with the given id and role
    pub fn new(id: i64, role: Role) -> Self {
        Self {
            id,
            first_name: String::new(),
            last_name: String::new(),
            mail: String::new(),
            seats_remaining: 0,
            role,
        }
    }

    /// Set the first and last name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Set the contact address
    pub fn with_mail(mut self, mail: impl Into<String>) -> Self {
        self.mail = mail.into();
        self
    }

    /// Set the seats remaining counter
    pub fn with_seats_remaining(mut self, seats: u32) -> Self {
        self.seats_remaining = seats;
        self
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether the booking flow is open to this person
    pub fn can_book(&self) -> bool {
        self.role == Role::User && self.seats_remaining > 0
    }

    /// Copy of this person after a successful booking
    pub fn after_booking(&self) -> Self {
        Self {
            seats_remaining: 0,
            ..self.clone()
        }
    }
}
