use chrono::{DateTime, NaiveDate, Utc};

/// Parse a backend `data` column into its UTC calendar date.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp. Timestamps
/// are converted to UTC before the date is taken, so a sale stamped
/// `2024-02-01T01:00:00+03:00` lands on 2024-01-31.
pub fn parse_row_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}
