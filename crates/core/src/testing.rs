//! In-memory seating API used by the unit tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    BookingRequest, BookingUpdate, CreatedTable, Credentials, LoginResponse, MailMessage,
    NewTable, SeatingApi,
};
use crate::model::{Booking, Person, Role, Table};
use crate::{Error, Result};

#[derive(Default)]
pub(crate) struct FakeApi {
    pub tables: Mutex<Vec<Table>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub login: Mutex<LoginResponse>,
    pub mails: Mutex<Vec<MailMessage>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    next_id: AtomicI64,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            ..Default::default()
        }
    }

    pub fn with_tables(self, tables: Vec<Table>) -> Self {
        *self.tables.lock().unwrap() = tables;
        self
    }

    pub fn with_bookings(self, bookings: Vec<Booking>) -> Self {
        *self.bookings.lock().unwrap() = bookings;
        self
    }

    pub fn with_login(self, response: LoginResponse) -> Self {
        *self.login.lock().unwrap() = response;
        self
    }

    /// Make every call to the named operation fail with a transport error
    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    fn record(&self, operation: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(operation.to_string());
        if self.failing.lock().unwrap().contains(operation) {
            return Err(Error::Transport(format!("{} failed", operation)));
        }
        Ok(())
    }
}

pub(crate) fn user(id: i64, seats: u32) -> Person {
    Person::new(id, Role::User)
        .with_name("Jeanne", "Dupont")
        .with_mail("jeanne@example.com")
        .with_seats_remaining(seats)
}

pub(crate) fn admin(id: i64) -> Person {
    Person::new(id, Role::Admin)
        .with_name("Alice", "Martin")
        .with_mail("alice@example.com")
}

#[async_trait]
impl SeatingApi for FakeApi {
    async fn log_in(&self, _credentials: &Credentials) -> Result<LoginResponse> {
        self.record("log_in")?;
        Ok(self.login.lock().unwrap().clone())
    }

    async fn load_tables(&self) -> Result<Vec<Table>> {
        self.record("load_tables")?;
        Ok(self.tables.lock().unwrap().clone())
    }

    async fn create_table(&self, table: &NewTable) -> Result<CreatedTable> {
        self.record("create_table")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tables
            .lock()
            .unwrap()
            .push(Table::new(id, table.number, table.name.clone()));
        Ok(CreatedTable {
            id: Some(id),
            number: Some(table.number as i64),
            name: Some(table.name.clone()),
            seats_number: None,
        })
    }

    async fn delete_table(&self, table_id: i64) -> Result<()> {
        self.record("delete_table")?;
        self.tables.lock().unwrap().retain(|t| t.id != table_id);
        Ok(())
    }

    async fn load_bookings(&self) -> Result<Vec<Booking>> {
        self.record("load_bookings")?;
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn bookings_by_person(&self, person_id: i64) -> Result<Vec<Booking>> {
        self.record("bookings_by_person")?;
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.person_id() == Some(person_id))
            .cloned()
            .collect())
    }

    async fn bookings_by_table(&self, table_id: i64) -> Result<Vec<Booking>> {
        self.record("bookings_by_table")?;
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.table_id() == Some(table_id))
            .cloned()
            .collect())
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<()> {
        self.record("create_booking")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.bookings
            .lock()
            .unwrap()
            .push(Booking::new(id, request.person_id, request.table_id, 0));
        Ok(())
    }

    async fn update_booking(&self, booking_id: i64, update: &BookingUpdate) -> Result<()> {
        self.record("update_booking")?;
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| Error::NotFound(format!("booking {}", booking_id)))?;
        booking.table_id = Some(update.table_id);
        Ok(())
    }

    async fn delete_bookings_for_person(&self, person_id: i64) -> Result<()> {
        self.record("delete_bookings_for_person")?;
        self.bookings
            .lock()
            .unwrap()
            .retain(|b| b.person_id() != Some(person_id));
        Ok(())
    }

    async fn send_recap_mail(&self) -> Result<()> {
        self.record("send_recap_mail")
    }

    async fn send_mail(&self, message: &MailMessage) -> Result<()> {
        self.record("send_mail")?;
        self.mails.lock().unwrap().push(message.clone());
        Ok(())
    }
}
