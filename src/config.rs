//! Configuration management for lastgrid.
//!
//! Configuration values come from environment variables, optionally seeded
//! from a `.env` file in the local data directory:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! | Variable          | Required | Default                               |
//! |-------------------|----------|---------------------------------------|
//! | `LASTFM_API_KEY`  | yes      |                                       |
//! | `LASTFM_USER`     | no*      |                                       |
//! | `LASTFM_API_URL`  | no       | `https://ws.audioscrobbler.com/2.0/`  |
//!
//! *`LASTFM_USER` is only required when `--user` is not given.

use std::{env, path::PathBuf};

use thiserror::Error;

use crate::lastfm::DEFAULT_API_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot prepare configuration directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read {path}: {message}")]
    EnvFile { path: String, message: String },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Path of the `.env` file, e.g. `~/.local/share/lastgrid/.env` on Linux.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lastgrid/.env");
    path
}

/// Loads the `.env` file from the local data directory when it exists.
///
/// Variables already present in the environment are not overridden.
///
/// # Errors
///
/// Fails if the data directory cannot be created or the file exists but
/// cannot be parsed.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    }
    Ok(())
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Returns the Last.fm API key (`LASTFM_API_KEY`).
pub fn lastfm_api_key() -> Result<String, ConfigError> {
    required("LASTFM_API_KEY")
}

/// Returns the Last.fm user whose history is shown.
///
/// An explicit `--user` wins over `LASTFM_USER`.
pub fn lastfm_user(cli_user: Option<String>) -> Result<String, ConfigError> {
    match cli_user {
        Some(user) if !user.trim().is_empty() => Ok(user),
        _ => required("LASTFM_USER"),
    }
}

/// Returns the Last.fm API endpoint (`LASTFM_API_URL`), or the public default.
pub fn lastfm_api_url() -> String {
    env::var("LASTFM_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Initializes diagnostic logging on stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
