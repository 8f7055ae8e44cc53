//! lastgrid library
//!
//! This library turns a Last.fm user's weekly album charts into one album-art
//! grid per calendar month. Month charts are fetched one after another, album
//! covers are resolved lazily and their urls are remembered between sessions.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `lastfm` - Last.fm web API client
//! - `management` - Session state machine, month chain and album image cache
//! - `render` - Grid layout and text/HTML output
//! - `runtime` - Dispatches session effects and feeds results back as events
//! - `types` - Data structures and type definitions
//! - `utils` - Month window helpers
//!
//! # Example
//!
//! ```
//! use lastgrid::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), config::ConfigError> {
//!     config::load_env().await?;
//!     cli::months(None, 12).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod lastfm;
pub mod management;
pub mod render;
pub mod runtime;
pub mod types;
pub mod utils;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Album images cached: {}", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a completion line prefixed with a green check mark.
///
/// ```
/// success!("Grid written to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for configuration problems the command cannot continue without;
/// session errors degrade the grid instead.
///
/// ```
/// error!("{} must be set", var_name);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for a problem the command recovers from.
///
/// ```
/// warning!("Month chain stopped early: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
