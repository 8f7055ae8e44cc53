use chrono::{DateTime, NaiveDate, Utc};
use tabled::Table;

use crate::{info, types::MonthTableRow, utils, warning};

/// Lists the month windows a `grid` run would request.
///
/// Months run from `from` (or `month_count - 1` months before the current
/// month) up to the current month. Only the first `month_count` of them are
/// part of the chain; the rest are counted but not shown.
///
/// # Arguments
///
/// * `from` - First month of the chain, any day inside it
/// * `month_count` - Length of the chain, at most 12
///
/// # Output
///
/// A table of month labels with their UTC start and end, as sent to
/// `user.getWeeklyAlbumChart`.
pub async fn months(from: Option<NaiveDate>, month_count: usize) {
    let today = Utc::now().date_naive();
    let first = from.unwrap_or_else(|| utils::default_first_month(today, month_count));
    let months = utils::build_months(first, today);

    if months.is_empty() {
        warning!("No months between {} and {}.", utils::month_label(first), utils::month_label(today));
        return;
    }

    let rows: Vec<MonthTableRow> = months
        .iter()
        .take(month_count)
        .map(|m| MonthTableRow {
            month: m.label.clone(),
            from: format_epoch(m.start),
            to: format_epoch(m.end),
        })
        .collect();

    println!("{}", Table::new(rows));

    if months.len() > month_count {
        info!(
            "{} later months are beyond the {} month chain and will not be fetched.",
            months.len() - month_count,
            month_count
        );
    }
}

fn format_epoch(epoch: i64) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| epoch.to_string())
}
