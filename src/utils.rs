use chrono::{Datelike, Months, NaiveDate, NaiveTime};

use crate::types::{MONTH_CAP, Month};

/// Label used for a month window, e.g. `2024-03`.
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn epoch(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Builds the month window containing `date`.
pub fn build_month(date: NaiveDate) -> Option<Month> {
    let start = first_of_month(date);
    let end = start.checked_add_months(Months::new(1))?;
    Some(Month {
        label: month_label(start),
        start: epoch(start),
        end: epoch(end),
    })
}

/// One window per calendar month from `first` to `last` inclusive, oldest first.
pub fn build_months(first: NaiveDate, last: NaiveDate) -> Vec<Month> {
    let last = first_of_month(last);
    let mut current = first_of_month(first);
    let mut months = Vec::new();

    while current <= last {
        match build_month(current) {
            Some(month) => months.push(month),
            None => break,
        }
        current = match current.checked_add_months(Months::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    months
}

/// First month of a chain of `count` months that ends with the month of `today`.
pub fn default_first_month(today: NaiveDate, count: usize) -> NaiveDate {
    let back = count.saturating_sub(1) as u32;
    first_of_month(today)
        .checked_sub_months(Months::new(back))
        .unwrap_or_else(|| first_of_month(today))
}

/// Parses a `YYYY-MM` month argument into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate, String> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map_err(|_| format!("invalid month '{trimmed}', expected YYYY-MM"))
}

/// Parses the number of months to fetch, bounded by the session cap.
pub fn parse_month_count(s: &str) -> Result<usize, String> {
    let count: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid month count '{}'", s.trim()))?;
    if count == 0 || count > MONTH_CAP {
        return Err(format!("month count must be between 1 and {MONTH_CAP}"));
    }
    Ok(count)
}

/// Rounds `len` up to the next multiple of `columns`.
pub fn pad_to_multiple(len: usize, columns: usize) -> usize {
    if columns == 0 {
        return len;
    }
    len.div_ceil(columns) * columns
}
