//! Calendar-date helpers shared by storage, CLI and TUI.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration};

use crate::error::ParseError;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const LONG_DATE: &[BorrowedFormatItem<'_>] =
    format_description!("[weekday], [month repr:long] [day padding:none]");

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`ParseError::InvalidDate`] when the input is not a valid calendar date.
pub fn parse_date(input: &str) -> Result<Date, ParseError> {
    let trimmed = input.trim();
    Date::parse(trimmed, ISO_DATE).map_err(|_| ParseError::InvalidDate(trimmed.to_owned()))
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.format(ISO_DATE)
        .unwrap_or_else(|_| format!("{}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day()))
}

/// Format a date like `Friday, October 16`.
#[must_use]
pub fn format_long_date(date: Date) -> String {
    date.format(LONG_DATE).unwrap_or_else(|_| format_date(date))
}

/// Shift a date by whole days, saturating at the supported range.
#[must_use]
pub fn shift_days(date: Date, days: i64) -> Date {
    date.checked_add(Duration::days(days)).unwrap_or(date)
}

/// Serde adapter storing [`Date`] as `YYYY-MM-DD`.
pub mod iso {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
    use time::Date;

    /// Serialize as `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Propagates serializer failures.
    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserialize from `YYYY-MM-DD`.
    ///
    /// # Errors
    /// Fails when the string is not a valid calendar date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2025-04-15"), Ok(date!(2025 - 04 - 15)));
        assert_eq!(parse_date(" 2025-04-15\n"), Ok(date!(2025 - 04 - 15)));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("2025-4-15").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_date(date!(2025 - 01 - 05)), "2025-01-05");
    }

    #[test]
    fn formats_long_dates() {
        assert_eq!(format_long_date(date!(2026 - 10 - 16)), "Friday, October 16");
    }

    #[test]
    fn iso_order_matches_date_order() {
        let earlier = date!(2025 - 09 - 30);
        let later = date!(2025 - 10 - 01);
        assert!(format_date(earlier) < format_date(later));
        assert!(earlier < later);
    }

    #[test]
    fn shifting_crosses_month_boundaries() {
        assert_eq!(shift_days(date!(2025 - 01 - 31), 1), date!(2025 - 02 - 01));
        assert_eq!(shift_days(date!(2025 - 03 - 01), -1), date!(2025 - 02 - 28));
    }
}
