//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gala_client::DEFAULT_API_URL;
use gala_core::admin::{ReservationFilter, SyncPolicy};
use gala_core::catalog::EmptyMatch;

use crate::config::{parse_empty_match, parse_sync, Config};

#[derive(Debug, Parser)]
#[command(name = "gala", version, about = "Event seating from the terminal")]
pub struct Cli {
    /// Base URL of the seating API
    #[arg(long, global = true, env = "GALA_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding the session file
    #[arg(long, global = true, env = "GALA_DATA_DIR", default_value = ".gala-data")]
    pub data_dir: PathBuf,

    /// How admin lists follow a successful write: `patch` or `refetch`
    #[arg(long, global = true, env = "GALA_SYNC", default_value = "patch", value_parser = parse_sync)]
    pub sync: SyncPolicy,

    /// What a search matching nothing shows: `all` or `none`
    #[arg(long, global = true, env = "GALA_EMPTY_MATCH", default_value = "all", value_parser = parse_empty_match)]
    pub empty_match: EmptyMatch,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            api_url: self.api_url.clone(),
            data_dir: self.data_dir.clone(),
            sync: self.sync,
            empty_match: self.empty_match,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Connexion
    Login {
        #[arg(long)]
        id: String,
        #[arg(long, env = "GALA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Déconnexion
    Logout,
    /// Welcome page, or the booking recap once seats are booked
    Home,
    /// Tables with enough free seats for the logged-in person
    Tables {
        /// Name fragment or exact table number
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Book a table by number
    Book {
        number: u32,
        /// Skip the confirmation question
        #[arg(long, short)]
        yes: bool,
    },
    /// Reservation and table management
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List reservations
    Reservations(ReservationQuery),
    /// Delete every reservation of a person
    DeleteReservation { person_id: i64 },
    /// Tables a reservation can move to
    Candidates { booking_id: i64 },
    /// Move a reservation to another table
    Reassign { booking_id: i64, table_number: u32 },
    /// List all tables
    Tables,
    /// Add a table
    CreateTable {
        #[arg(long)]
        number: u32,
        #[arg(long)]
        name: String,
    },
    /// Delete a table, after listing the reservations it holds
    DeleteTable {
        number: u32,
        #[arg(long, short)]
        yes: bool,
    },
    /// Rendre indisponible: book every free seat under the admin account
    DisableTable { number: u32 },
    /// Send the confirmation recap to every attendee
    MailRecap,
    /// Send a single message
    Mail {
        #[arg(long)]
        name: String,
        #[arg(long)]
        mail: String,
        #[arg(long)]
        text: String,
    },
}

#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct ReservationQuery {
    /// Famille: last name fragment
    #[arg(long)]
    pub family: Option<String>,
    /// Table name fragment
    #[arg(long)]
    pub table: Option<String>,
}

impl ReservationQuery {
    pub fn filter(&self) -> Option<ReservationFilter> {
        match (&self.family, &self.table) {
            (Some(q), _) => Some(ReservationFilter::Family(q.clone())),
            (None, Some(q)) => Some(ReservationFilter::Table(q.clone())),
            (None, None) => None,
        }
    }
}
