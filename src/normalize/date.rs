//! Delivery-date parsing and period bucketing.

use chrono::NaiveDate;

/// Accepted date spellings. Spreadsheet cells stringify with a time-of-day
/// tail, which is stripped before matching.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split_whitespace().next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Year-month bucket in `YYYY-MM` form; lexicographic order on the result is
/// chronological order.
pub fn period_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}
