//! `gala` command line
//!
//! Terminal front end for the event seating API: attendees log in and book a
//! table, admins manage reservations and tables.

mod cli;
mod commands;
mod config;
mod views;

use std::sync::Arc;

use clap::Parser;
use gala_client::ApiClient;
use gala_core::session::FileSessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout is for the screens
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gala_console=info,gala_core=info,gala_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::debug!("Using API at {} and data directory {:?}", config.api_url, config.data_dir);

    let api = Arc::new(ApiClient::new(config.client())?);
    let sessions = Arc::new(FileSessionStore::new(config.session_path()).await?);

    let app = App::new(api, sessions, config).await?;
    let screen = app.run(cli.command).await?;
    println!("{}", screen);
    Ok(())
}
