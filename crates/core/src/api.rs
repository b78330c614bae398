//! Seating API interface
//!
//! Defines the operations the external seating API offers. Every call is a
//! single request with no timeout, retry or de-duplication.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{serde_helpers, Booking, Person, Role, Table};
use crate::Result;

/// Login form body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub id: String,
    pub pswd: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, pswd: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pswd: pswd.into(),
        }
    }
}

/// Body of `POST /person/log-in`
///
/// A rejected login comes back as `{error}` with no identity fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::count_or_zero")]
    pub seats_remaining: u32,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LoginResponse {
    /// The person described by this response, if it carries an id
    pub fn person(&self) -> Option<Person> {
        self.id.map(|id| Person {
            id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            mail: self.mail.clone(),
            seats_remaining: self.seats_remaining,
            role: self.role.unwrap_or_default(),
        })
    }
}

/// Body of `POST /table/new`
#[derive(Debug, Clone, Serialize)]
pub struct NewTable {
    pub number: u32,
    pub name: String,
}

/// Body of a `POST /table/new` response
///
/// The API may omit the id and the seat totals of the created table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedTable {
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub number: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::option_id")]
    pub seats_number: Option<i64>,
}

/// Body of `POST /booking/new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub table_id: i64,
    pub person_id: i64,
}

/// Body of `POST /booking/update/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingUpdate {
    pub table_id: i64,
}

/// Body of `POST /booking/mail`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub name: String,
    pub mail: String,
    pub text: String,
}

impl MailMessage {
    /// Notification sent after a booking, worded with the pre-booking seat count
    pub fn booking_notice(person: &Person, table: &Table) -> Self {
        Self {
            name: person.display_name(),
            mail: person.mail.clone(),
            text: format!(
                "Vous avez demandé {} place(s) à la table numéro {} : {}",
                person.seats_remaining, table.number, table.name
            ),
        }
    }
}

/// Operations of the external seating API
#[async_trait]
pub trait SeatingApi: Send + Sync {
    /// Bearer token attached to every later request
    fn set_token(&self, _token: Option<String>) {}

    /// `POST /person/log-in`
    async fn log_in(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `GET /table/load`
    async fn load_tables(&self) -> Result<Vec<Table>>;

    /// `POST /table/new`
    async fn create_table(&self, table: &NewTable) -> Result<CreatedTable>;

    /// `GET /table/delete/{id}`
    async fn delete_table(&self, table_id: i64) -> Result<()>;

    /// `GET /booking/load`
    async fn load_bookings(&self) -> Result<Vec<Booking>>;

    /// `GET /booking/by-person/{id}`
    async fn bookings_by_person(&self, person_id: i64) -> Result<Vec<Booking>>;

    /// `GET /booking/by-table/{id}`
    async fn bookings_by_table(&self, table_id: i64) -> Result<Vec<Booking>>;

    /// `POST /booking/new`
    async fn create_booking(&self, request: &BookingRequest) -> Result<()>;

    /// `POST /booking/update/{id}`
    async fn update_booking(&self, booking_id: i64, update: &BookingUpdate) -> Result<()>;

    /// `GET /booking/delete/{person_id}`
    async fn delete_bookings_for_person(&self, person_id: i64) -> Result<()>;

    /// `GET /booking/mail-recap`
    async fn send_recap_mail(&self) -> Result<()>;

    /// `POST /booking/mail`
    async fn send_mail(&self, message: &MailMessage) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_with_error() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"error": "Identifiant inconnu"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("Identifiant inconnu"));
        assert!(response.person().is_none());
    }

    #[test]
    fn test_login_response_person() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"id": 7, "seats_remaining": 3, "role": "USER", "first_name": "Jeanne",
                "last_name": "Dupont", "mail": "jeanne@example.com", "token": "abc"}"#,
        )
        .unwrap();

        let person = response.person().unwrap();
        assert_eq!(person.id, 7);
        assert_eq!(person.seats_remaining, 3);
        assert_eq!(person.role, Role::User);
        assert_eq!(response.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_booking_notice_text() {
        let person = Person::new(7, Role::User)
            .with_name("Jeanne", "Dupont")
            .with_mail("jeanne@example.com")
            .with_seats_remaining(2);
        let table = Table::new(1, 4, "Lilas");

        let notice = MailMessage::booking_notice(&person, &table);
        assert_eq!(notice.name, "Jeanne Dupont");
        assert_eq!(notice.mail, "jeanne@example.com");
        assert_eq!(
            notice.text,
            "Vous avez demandé 2 place(s) à la table numéro 4 : Lilas"
        );
    }
}
