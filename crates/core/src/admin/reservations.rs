//! Reservation management board

use tracing::{error, info};

use crate::api::{BookingUpdate, MailMessage, SeatingApi};
use crate::catalog::EmptyMatch;
use crate::model::{Booking, Table, TableSummary};
use crate::{Error, Result};

use super::SyncPolicy;

/// Text filters offered on the reservation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationFilter {
    /// Case-insensitive substring of the person's last name
    Family(String),
    /// Case-insensitive substring of the table name
    Table(String),
}

impl ReservationFilter {
    fn query(&self) -> &str {
        match self {
            Self::Family(q) | Self::Table(q) => q,
        }
    }

    fn matches(&self, booking: &Booking) -> bool {
        match self {
            Self::Family(q) => booking.last_name().to_uppercase().contains(&q.to_uppercase()),
            Self::Table(q) => {
                !q.is_empty() && booking.table_name().to_uppercase().contains(&q.to_uppercase())
            }
        }
    }
}

/// Tables a booking can move to: enough room for its seats, not its current table
pub fn reassign_candidates(booking: &Booking, tables: &[Table]) -> Vec<Table> {
    tables
        .iter()
        .filter(|t| !booking.is_at(t) && t.has_room_for(booking.seats_booked))
        .cloned()
        .collect()
}

/// All reservations plus the filtered subset on display
#[derive(Debug, Clone)]
pub struct ReservationBoard {
    all: Vec<Booking>,
    visible: Vec<Booking>,
    empty_match: EmptyMatch,
    sync: SyncPolicy,
}

impl ReservationBoard {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            visible: bookings.clone(),
            all: bookings,
            empty_match: EmptyMatch::default(),
            sync: SyncPolicy::default(),
        }
    }

    /// Fetch every reservation
    pub async fn load(api: &dyn SeatingApi) -> Result<Self> {
        let bookings = api.load_bookings().await.map_err(|e| {
            error!("Loading reservations failed: {}", e);
            e
        })?;
        Ok(Self::new(bookings))
    }

    /// Set the empty-match policy
    pub fn with_empty_match(mut self, empty_match: EmptyMatch) -> Self {
        self.empty_match = empty_match;
        self
    }

    /// Set the sync policy
    pub fn with_sync(mut self, sync: SyncPolicy) -> Self {
        self.sync = sync;
        self
    }

    pub fn all(&self) -> &[Booking] {
        &self.all
    }

    pub fn visible(&self) -> &[Booking] {
        &self.visible
    }

    pub fn find(&self, booking_id: i64) -> Option<&Booking> {
        self.all.iter().find(|b| b.id == booking_id)
    }

    /// Filter the displayed list; an empty query shows everything
    pub fn apply_filter(&mut self, filter: &ReservationFilter) {
        if filter.query().is_empty() {
            self.visible = self.all.clone();
            return;
        }

        let filtered: Vec<Booking> = self
            .all
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect();

        self.visible = if filtered.is_empty() && self.empty_match == EmptyMatch::ShowAll {
            self.all.clone()
        } else {
            filtered
        };
    }

    /// Delete every reservation of a person; returns how many entries left the list
    pub async fn delete_for_person(&mut self, api: &dyn SeatingApi, person_id: i64) -> Result<usize> {
        if let Err(e) = api.delete_bookings_for_person(person_id).await {
            error!("Deleting reservations of person {} failed: {}", person_id, e);
            return Err(e);
        }

        let before = self.all.len();
        match self.sync {
            SyncPolicy::PatchLocal => {
                self.all.retain(|b| b.person_id() != Some(person_id));
                self.visible.retain(|b| b.person_id() != Some(person_id));
            }
            SyncPolicy::Refetch => self.refresh(api).await?,
        }
        let removed = before.saturating_sub(self.all.len());
        info!("Deleted {} reservation(s) of person {}", removed, person_id);
        Ok(removed)
    }

    /// Move a reservation to another table
    pub async fn reassign(
        &mut self,
        api: &dyn SeatingApi,
        booking_id: i64,
        table: &Table,
        tables: &[Table],
    ) -> Result<()> {
        let booking = self
            .find(booking_id)
            .ok_or_else(|| Error::NotFound(format!("reservation {}", booking_id)))?;

        if !reassign_candidates(booking, tables)
            .iter()
            .any(|t| t.id == table.id)
        {
            return Err(Error::InvalidInput(format!(
                "table {} cannot take {} more seat(s)",
                table.number, booking.seats_booked
            )));
        }

        let update = BookingUpdate { table_id: table.id };
        if let Err(e) = api.update_booking(booking_id, &update).await {
            error!(
                "Moving reservation {} to table {} failed: {}",
                booking_id, table.number, e
            );
            return Err(e);
        }

        match self.sync {
            SyncPolicy::PatchLocal => {
                let summary = TableSummary {
                    id: Some(table.id),
                    number: table.number,
                    name: table.name.clone(),
                };
                for booking in self
                    .all
                    .iter_mut()
                    .chain(self.visible.iter_mut())
                    .filter(|b| b.id == booking_id)
                {
                    booking.table_id = Some(table.id);
                    booking.table = Some(summary.clone());
                }
            }
            SyncPolicy::Refetch => self.refresh(api).await?,
        }
        info!("Moved reservation {} to table {}", booking_id, table.number);
        Ok(())
    }

    /// Send the confirmation recap to every attendee
    pub async fn bulk_confirm(api: &dyn SeatingApi) -> Result<()> {
        api.send_recap_mail().await.map_err(|e| {
            error!("Sending the booking recap failed: {}", e);
            e
        })?;
        info!("Booking recap sent");
        Ok(())
    }

    /// Send an ad hoc message
    pub async fn notify(api: &dyn SeatingApi, message: &MailMessage) -> Result<()> {
        if message.mail.trim().is_empty() || message.text.trim().is_empty() {
            return Err(Error::InvalidInput(
                "a recipient and a text are required".to_string(),
            ));
        }
        api.send_mail(message).await.map_err(|e| {
            error!("Sending mail to {} failed: {}", message.mail, e);
            e
        })
    }

    async fn refresh(&mut self, api: &dyn SeatingApi) -> Result<()> {
        let bookings = api.load_bookings().await?;
        self.visible = bookings.clone();
        self.all = bookings;
        Ok(())
    }
}
