use std::{path::PathBuf, sync::Arc, time::Duration};

use chrono::{NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config, error,
    lastfm::LastFmClient,
    management::{ApplicationState, ChainStatus, JsonFileStore},
    render, runtime, success, utils, warning,
};

/// Fetches up to `month_count` monthly charts for a user and renders their album grids.
///
/// The month chain starts at `from` (or `month_count - 1` months before the
/// current month) and walks forward one month at a time. Album covers are
/// resolved through `album.getInfo` unless already known from the local
/// image cache, which is rewritten whenever no cover lookup is outstanding.
///
/// Months are printed most recent first. With `html` set, the same grids are
/// also written as a standalone HTML page.
///
/// # Arguments
///
/// * `user` - Last.fm user, falls back to `LASTFM_USER`
/// * `from` - First month of the chain, any day inside it
/// * `month_count` - Maximum number of months to fetch, at most 12
/// * `html` - Optional path for the HTML rendering
///
/// # Errors
///
/// Exits the process when the API key or user cannot be resolved. Request
/// failures only degrade the grid and are summarized as warnings.
pub async fn grid(
    user: Option<String>,
    from: Option<NaiveDate>,
    month_count: usize,
    html: Option<PathBuf>,
) {
    let api_key = match config::lastfm_api_key() {
        Ok(key) => key,
        Err(e) => error!("{}. Add it to {}", e, config::env_path().display()),
    };
    let user = match config::lastfm_user(user) {
        Ok(user) => user,
        Err(e) => error!("{}. Pass --user or add it to {}", e, config::env_path().display()),
    };

    let today = Utc::now().date_naive();
    let first = from.unwrap_or_else(|| utils::default_first_month(today, month_count));
    let months = utils::build_months(first, today);
    if months.is_empty() {
        warning!("No months between {} and {}.", utils::month_label(first), utils::month_label(today));
        return;
    }

    let api = Arc::new(LastFmClient::new(config::lastfm_api_url(), api_key));
    let store = JsonFileStore::default_location();

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching charts for {user}..."));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let report = runtime::run_session(api, &store, &user, months, month_count, |state| {
        pb.set_message(progress_message(state))
    })
    .await;

    pb.finish_and_clear();

    let state = &report.state;
    if let Some(err) = state.last_error() {
        warning!("Month chain stopped early: {}", err);
    }

    print!(
        "{}",
        render::render_table(state.months_with_albums(), state.cache())
    );

    if let Some(path) = html {
        let page = render::render_html(state.months_with_albums(), state.cache());
        match async_fs::write(&path, page).await {
            Ok(_) => success!("Grid written to {}", path.display()),
            Err(e) => warning!("Cannot write grid to {}. Err: {}", path.display(), e),
        }
    }

    success!(
        "Fetched {months} months for {user}: {loaded} album images known, {failed} failed, {requests} looked up.",
        months = state.months_fetched(),
        user = user,
        loaded = state.cache().count_loaded(),
        failed = state.cache().count_failed(),
        requests = report.album_requests
    );
}

fn progress_message(state: &ApplicationState) -> String {
    let pending = state.cache().count_pending();
    match state.status() {
        ChainStatus::AwaitingMonth(month) => format!(
            "Fetching chart for {label} ({done} months done, {pending} album images pending)...",
            label = month.label,
            done = state.months_fetched(),
            pending = pending
        ),
        _ => format!("Resolving album images ({pending} pending)..."),
    }
}
