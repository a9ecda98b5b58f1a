//! Field validation and display formatting.
//!
//! Pure functions turning raw user/CSV strings into typed values, plus the
//! inverse formatters used for display and for the backup file. Every
//! interactive prompt funnels through one of these before anything touches
//! the database.

use crate::errors::ValidationError;
use chrono::NaiveDate;

/// Trims a raw product name. Empty (or all-whitespace) names are rejected.
pub fn parse_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Parses a price string like `10.99`, `$10.99`, or `10,99` into cents.
///
/// The leading currency symbol is optional and a comma decimal separator is
/// normalized to a dot. Parsing is exact decimal (integer dollars plus up to
/// two fraction digits) rather than float multiply-and-truncate, so `10.99`
/// is 1099 cents, not 1098. Negative prices are rejected.
pub fn parse_price(raw: &str) -> Result<i64, ValidationError> {
    let bad = || ValidationError::BadPriceFormat(raw.to_string());

    let cleaned = raw
        .trim()
        .strip_prefix('$')
        .unwrap_or(raw.trim())
        .trim()
        .replace(',', ".");
    if cleaned.is_empty() {
        return Err(bad());
    }

    let (dollars_str, frac_str) = match cleaned.split_once('.') {
        Some((d, f)) => (d, f),
        None => (cleaned.as_str(), ""),
    };
    if dollars_str.is_empty() || !dollars_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    if frac_str.len() > 2 || !frac_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }

    let dollars: i64 = dollars_str.parse().map_err(|_| bad())?;
    let cents: i64 = match frac_str.len() {
        0 => 0,
        // A single fraction digit means tenths of a dollar
        1 => frac_str.parse::<i64>().map_err(|_| bad())? * 10,
        _ => frac_str.parse().map_err(|_| bad())?,
    };
    dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(cents))
        .ok_or_else(bad)
}

/// Parses a month/day/year date. Zero padding is optional, so both
/// `02/01/2020` and `2/1/2020` are accepted; this keeps [`parse_date`] and
/// [`format_date`] mutually inverse.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%m/%d/%Y")
        .map_err(|_| ValidationError::BadDateFormat(raw.to_string()))
}

/// Validates an id string against the set of ids currently in the store.
///
/// Non-numeric input and a numeric id absent from `valid_ids` fail with
/// distinct errors so the caller can show the right message.
pub fn parse_identifier(raw: &str, valid_ids: &[i64]) -> Result<i64, ValidationError> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NonNumericId(raw.trim().to_string()))?;
    if valid_ids.contains(&id) {
        Ok(id)
    } else {
        Err(ValidationError::UnknownId(id))
    }
}

/// Parses a stock quantity as a non-negative integer.
pub fn parse_quantity(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(q) if q >= 0 => Ok(q),
        _ => Err(ValidationError::BadQuantity(trimmed.to_string())),
    }
}

/// Renders a date as `M/D/YYYY` without zero padding, e.g. `3/1/2019`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Renders cents as `$D.DD`, e.g. `$10.99`.
pub fn format_price(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
