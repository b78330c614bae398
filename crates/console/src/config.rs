//! Runtime configuration
//!
//! Every setting comes from a command line flag that falls back to a
//! `GALA_*` environment variable.

use std::path::PathBuf;

use gala_client::ClientConfig;
use gala_core::admin::SyncPolicy;
use gala_core::catalog::EmptyMatch;

/// File holding the persisted session inside the data directory
pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
    pub sync: SyncPolicy,
    pub empty_match: EmptyMatch,
}

impl Config {
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }

    pub fn client(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone());
        if is_local(&self.api_url) {
            config.without_proxy()
        } else {
            config
        }
    }
}

fn is_local(url: &str) -> bool {
    let host = url
        .split("://")
        .nth(1)
        .unwrap_or(url)
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    matches!(host, "localhost" | "127.0.0.1")
}

/// Parse `GALA_SYNC` / `--sync`
pub fn parse_sync(raw: &str) -> Result<SyncPolicy, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "patch" | "local" => Ok(SyncPolicy::PatchLocal),
        "refetch" | "reload" => Ok(SyncPolicy::Refetch),
        other => Err(format!("expected `patch` or `refetch`, got `{}`", other)),
    }
}

/// Parse `GALA_EMPTY_MATCH` / `--empty-match`
pub fn parse_empty_match(raw: &str) -> Result<EmptyMatch, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "all" | "show-all" => Ok(EmptyMatch::ShowAll),
        "none" | "show-none" => Ok(EmptyMatch::ShowNone),
        other => Err(format!("expected `all` or `none`, got `{}`", other)),
    }
}
