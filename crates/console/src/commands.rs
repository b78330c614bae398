//! Command handlers
//!
//! Each command returns the screen it produced; `main` prints it.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use gala_core::admin::{reassign_candidates, ReservationBoard, TableBoard};
use gala_core::api::{Credentials, MailMessage, SeatingApi};
use gala_core::auth::{self, REQUIRED_FIELD};
use gala_core::booking::BookingFlow;
use gala_core::catalog::TableCatalog;
use gala_core::session::{Session, SessionStore};
use gala_core::Error;
use tracing::{info, warn};

use crate::cli::{AdminCommand, Command, ReservationQuery};
use crate::config::Config;
use crate::views;

/// Yes/no question shown before a write
pub type Prompt = fn(&str) -> anyhow::Result<bool>;

pub struct App {
    api: Arc<dyn SeatingApi>,
    sessions: Arc<dyn SessionStore>,
    config: Config,
    prompt: Prompt,
}

impl App {
    /// Build the app and put the stored token back on the client
    pub async fn new(
        api: Arc<dyn SeatingApi>,
        sessions: Arc<dyn SessionStore>,
        config: Config,
    ) -> anyhow::Result<Self> {
        if let Some(session) = sessions.load().await? {
            api.set_token(session.token.clone());
        }
        Ok(Self {
            api,
            sessions,
            config,
            prompt: ask,
        })
    }

    /// Replace the terminal question
    pub fn with_prompt(mut self, prompt: Prompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Login { id, password } => self.login(id, password).await,
            Command::Logout => {
                auth::logout(self.api.as_ref(), self.sessions.as_ref()).await?;
                Ok("Déconnexion".to_string())
            }
            Command::Home => self.home().await,
            Command::Tables { query } => self.tables(query).await,
            Command::Book { number, yes } => self.book(number, yes).await,
            Command::Admin(command) => self.admin(command).await,
        }
    }

    async fn session(&self) -> anyhow::Result<Session> {
        self.sessions
            .require()
            .await
            .context("Connexion requise: gala login --id <identifiant>")
    }

    async fn login(&self, id: String, password: String) -> anyhow::Result<String> {
        let credentials = Credentials::new(id, password);
        match auth::login(self.api.as_ref(), self.sessions.as_ref(), &credentials).await {
            Ok(outcome) => Ok(views::home(
                &outcome.session.person,
                outcome.existing_booking.as_ref(),
            )),
            Err(Error::LoginRejected(message)) => bail!("Identifiant: {}", message),
            Err(Error::InvalidInput(message)) if message == REQUIRED_FIELD => {
                bail!("Identifiant / Mot de passe: {}", message)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn home(&self) -> anyhow::Result<String> {
        let session = self.session().await?;
        let person = &session.person;

        let booking = if !person.is_admin() && person.seats_remaining == 0 {
            match self.api.bookings_by_person(person.id).await {
                Ok(bookings) => bookings.into_iter().next(),
                Err(e) => {
                    warn!("Could not load booking of person {}: {}", person.id, e);
                    None
                }
            }
        } else {
            None
        };

        Ok(views::home(person, booking.as_ref()))
    }

    async fn catalog(&self, session: &Session) -> anyhow::Result<TableCatalog> {
        let catalog = TableCatalog::load(self.api.as_ref(), session.person.seats_remaining)
            .await?
            .with_empty_match(self.config.empty_match);
        Ok(catalog)
    }

    async fn tables(&self, query: Option<String>) -> anyhow::Result<String> {
        let session = self.session().await?;
        let mut catalog = self.catalog(&session).await?;
        if let Some(query) = query {
            catalog.apply_query(&query);
        }
        Ok(views::table_list(catalog.visible()))
    }

    async fn book(&self, number: u32, yes: bool) -> anyhow::Result<String> {
        let session = self.session().await?;
        if !session.person.can_book() {
            bail!("Vous avez déjà réservé.");
        }

        let catalog = self.catalog(&session).await?;
        let table = catalog
            .find_by_number(number)
            .cloned()
            .ok_or_else(|| anyhow!("{} (table numéro {})", views::NO_TABLE, number))?;

        let mut flow = BookingFlow::new(Arc::clone(&self.api), Arc::clone(&self.sessions));
        flow.select(table)?;
        let table = flow.show_confirmation()?;

        if !yes && !(self.prompt)(&views::booking_question(&table))? {
            flow.cancel()?;
            return Ok("Retour".to_string());
        }

        let seats = session.person.seats_remaining;
        let outcome = flow.confirm().await?;
        if !outcome.persisted {
            warn!("Booking made but the local session still shows the old seat count");
        }

        // Let the notification mail finish before the process exits
        if let Err(e) = outcome.notification.await {
            warn!("Notification task did not complete: {}", e);
        }
        Ok(views::booking_done(seats, &outcome.table))
    }

    async fn admin(&self, command: AdminCommand) -> anyhow::Result<String> {
        let session = self.session().await?;
        auth::require_admin(&session)?;
        let api = self.api.as_ref();

        match command {
            AdminCommand::Reservations(query) => self.reservations(query).await,
            AdminCommand::DeleteReservation { person_id } => {
                let mut board = self.reservation_board().await?;
                let removed = board.delete_for_person(api, person_id).await?;
                Ok(format!(
                    "{} réservation(s) supprimée(s)\n{}",
                    removed,
                    views::reservation_list(board.visible())
                ))
            }
            AdminCommand::Candidates { booking_id } => {
                let board = self.reservation_board().await?;
                let booking = board
                    .find(booking_id)
                    .ok_or_else(|| anyhow!("réservation {} introuvable", booking_id))?;
                let tables = TableBoard::load(api).await?;
                let candidates = reassign_candidates(booking, tables.tables());
                Ok(views::table_list(&candidates))
            }
            AdminCommand::Reassign {
                booking_id,
                table_number,
            } => {
                let mut board = self.reservation_board().await?;
                let tables = TableBoard::load(api).await?;
                let table = tables
                    .find_by_number(table_number)
                    .cloned()
                    .ok_or_else(|| anyhow!("table numéro {} introuvable", table_number))?;
                board
                    .reassign(api, booking_id, &table, tables.tables())
                    .await?;
                Ok(views::reservation_list(board.visible()))
            }
            AdminCommand::Tables => {
                let board = self.table_board().await?;
                Ok(views::table_board(board.tables()))
            }
            AdminCommand::CreateTable { number, name } => {
                let mut board = self.table_board().await?;
                let table = board.create(api, number, &name).await?;
                info!("Created table {} ({})", table.number, table.id);
                Ok(views::table_board(board.tables()))
            }
            AdminCommand::DeleteTable { number, yes } => {
                let mut board = self.table_board().await?;
                let table = board
                    .find_by_number(number)
                    .cloned()
                    .ok_or_else(|| anyhow!("table numéro {} introuvable", number))?;
                let impacted = board.impacted_bookings(api, table.id).await?;
                let question = views::delete_table_question(&impacted);

                if !yes && !(self.prompt)(&question)? {
                    return Ok("Retour".to_string());
                }

                board.delete(api, table.id).await?;
                Ok(views::table_board(board.tables()))
            }
            AdminCommand::DisableTable { number } => {
                let mut board = self.table_board().await?;
                let table = board
                    .find_by_number(number)
                    .cloned()
                    .ok_or_else(|| anyhow!("table numéro {} introuvable", number))?;
                board.disable(api, &session.person, table.id).await?;
                Ok(views::table_board(board.tables()))
            }
            AdminCommand::MailRecap => {
                ReservationBoard::bulk_confirm(api).await?;
                Ok(views::REQUEST_RECEIVED.to_string())
            }
            AdminCommand::Mail { name, mail, text } => {
                ReservationBoard::notify(api, &MailMessage { name, mail, text }).await?;
                Ok(views::REQUEST_RECEIVED.to_string())
            }
        }
    }

    async fn reservation_board(&self) -> anyhow::Result<ReservationBoard> {
        Ok(ReservationBoard::load(self.api.as_ref())
            .await?
            .with_empty_match(self.config.empty_match)
            .with_sync(self.config.sync))
    }

    async fn table_board(&self) -> anyhow::Result<TableBoard> {
        Ok(TableBoard::load(self.api.as_ref())
            .await?
            .with_sync(self.config.sync))
    }

    async fn reservations(&self, query: ReservationQuery) -> anyhow::Result<String> {
        let mut board = self.reservation_board().await?;
        if let Some(filter) = query.filter() {
            board.apply_filter(&filter);
        }
        Ok(views::reservation_list(board.visible()))
    }
}

/// Ask a yes/no question on the terminal
fn ask(question: &str) -> anyhow::Result<bool> {
    print!("{} [o/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(views::is_yes(&answer))
}
