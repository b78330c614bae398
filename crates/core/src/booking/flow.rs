//! Booking confirmation state machine
//!
//! `Idle -> TableSelected -> ConfirmationShown -> Booked`. Cancelling from
//! any state before `Booked` returns to `Idle` without touching the API.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::api::{BookingRequest, MailMessage, SeatingApi};
use crate::model::Table;
use crate::session::{Session, SessionStore};
use crate::{Error, Result};

/// State of the booking flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    /// Nothing selected
    Idle,
    /// A table was picked from the catalog
    TableSelected(Table),
    /// The confirmation step is showing the chosen table
    ConfirmationShown(Table),
    /// The API accepted the reservation
    Booked(Table),
}

impl BookingState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TableSelected(_) => "table selected",
            Self::ConfirmationShown(_) => "confirmation shown",
            Self::Booked(_) => "booked",
        }
    }

    /// The table this state refers to, if any
    pub fn table(&self) -> Option<&Table> {
        match self {
            Self::TableSelected(t) | Self::ConfirmationShown(t) | Self::Booked(t) => Some(t),
            Self::Idle => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Booked(_))
    }
}

/// Result of a confirmed booking
#[derive(Debug)]
pub struct BookingOutcome {
    pub request: BookingRequest,
    pub table: Table,
    /// Session after the seat counter was zeroed
    pub session: Session,
    /// Whether `session` reached the session store
    pub persisted: bool,
    /// Background notification mail; its failure never undoes the booking
    pub notification: JoinHandle<()>,
}

/// Drives one person through selecting and confirming a table
pub struct BookingFlow {
    api: Arc<dyn SeatingApi>,
    sessions: Arc<dyn SessionStore>,
    state: BookingState,
}

impl BookingFlow {
    pub fn new(api: Arc<dyn SeatingApi>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            sessions,
            state: BookingState::Idle,
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Pick a table; picking again replaces the previous choice
    pub fn select(&mut self, table: Table) -> Result<()> {
        match self.state {
            BookingState::Idle | BookingState::TableSelected(_) => {
                self.state = BookingState::TableSelected(table);
                Ok(())
            }
            ref other => Err(Error::invalid_transition("select a table", other.name())),
        }
    }

    /// Open the confirmation step for the selected table
    pub fn show_confirmation(&mut self) -> Result<Table> {
        let table = match &self.state {
            BookingState::TableSelected(table) => table.clone(),
            other => {
                return Err(Error::invalid_transition(
                    "show the confirmation",
                    other.name(),
                ))
            }
        };
        self.state = BookingState::ConfirmationShown(table.clone());
        Ok(table)
    }

    /// Dismiss the selection; never sends a request
    pub fn cancel(&mut self) -> Result<()> {
        match self.state {
            BookingState::Booked(_) => Err(Error::invalid_transition("cancel", "booked")),
            _ => {
                self.state = BookingState::Idle;
                Ok(())
            }
        }
    }

    /// Send the reservation for the table being confirmed
    ///
    /// On failure the flow stays on the confirmation step and nothing is
    /// retried.
    pub async fn confirm(&mut self) -> Result<BookingOutcome> {
        let table = match &self.state {
            BookingState::ConfirmationShown(table) => table.clone(),
            other => return Err(Error::invalid_transition("confirm", other.name())),
        };

        let session = self.sessions.require().await?;
        let person = session.person.clone();
        if person.seats_remaining == 0 {
            return Err(Error::NoSeatsRemaining(person.id));
        }

        let request = BookingRequest {
            table_id: table.id,
            person_id: person.id,
        };

        if let Err(e) = self.api.create_booking(&request).await {
            error!(
                "Booking table {} for person {} failed: {}",
                table.number, person.id, e
            );
            return Err(e);
        }

        self.state = BookingState::Booked(table.clone());
        info!(
            "Person {} booked {} seat(s) at table {}",
            person.id, person.seats_remaining, table.number
        );

        // The server holds the booking now; a failed local write must not hide it
        let session = session.with_person(person.after_booking());
        let persisted = match self.sessions.save(&session).await {
            Ok(()) => true,
            Err(e) => {
                error!("Saving session of person {} failed: {}", person.id, e);
                false
            }
        };

        let notification = spawn_notification(
            Arc::clone(&self.api),
            MailMessage::booking_notice(&person, &table),
        );

        Ok(BookingOutcome {
            request,
            table,
            session,
            persisted,
            notification,
        })
    }
}

fn spawn_notification(api: Arc<dyn SeatingApi>, message: MailMessage) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = api.send_mail(&message).await {
            warn!("Booking notification to {} failed: {}", message.mail, e);
        }
    })
}
