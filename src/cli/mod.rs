//! # CLI Module
//!
//! User-facing commands of lastgrid. Each command resolves its configuration,
//! delegates to the session runtime or the cache store, and reports progress
//! and results with the crate's status macros.
//!
//! ## Commands
//!
//! - [`grid`] - Runs a session against Last.fm and prints one album grid per month
//! - [`months`] - Lists the month windows a session would request
//! - [`list_cache`] - Shows the album images remembered between sessions
//! - [`clear_cache`] - Forgets every remembered album image
//!
//! ## Usage Patterns
//!
//! ```bash
//! lastgrid grid --user rj                     # last 12 months up to now
//! lastgrid grid --from 2023-01 --months 6     # Jan..Jun 2023
//! lastgrid grid --html grid.html              # also write an HTML page
//! lastgrid months --from 2023-01
//! lastgrid cache --search radiohead
//! lastgrid cache clear
//! ```

mod cache;
mod grid;
mod months;

pub use cache::clear_cache;
pub use cache::list_cache;
pub use grid::grid;
pub use months::months;
