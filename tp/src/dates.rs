//! Date normalization for flight searches
//!
//! Turns a user-supplied date expression into a concrete one-day search window.
//! Accepts an ISO `YYYY-MM-DD` date or a bare month name ("December", "dec").
//! A month name resolves to the 1st of that month, rolled into next year when
//! the month has already passed, so the window never starts in a past month.

use chrono::{Datelike, Days, Month, NaiveDate};
use thiserror::Error;
use tracing::debug;

/// Format used for both parsing and rendering ISO dates
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// The expression was neither an ISO date nor a month name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized date expression: '{0}'")]
pub struct UnrecognizedDate(pub String);

/// A `[from, to]` search window where `to` is always `from + 1 day`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Build the one-day window starting at `from`
    pub fn starting(from: NaiveDate) -> Result<Self, UnrecognizedDate> {
        let to = from
            .checked_add_days(Days::new(1))
            .ok_or_else(|| UnrecognizedDate(from.format(ISO_FORMAT).to_string()))?;
        Ok(Self { from, to })
    }

    /// `from` rendered as `YYYY-MM-DD`
    pub fn from_iso(&self) -> String {
        self.from.format(ISO_FORMAT).to_string()
    }

    /// `to` rendered as `YYYY-MM-DD`
    pub fn to_iso(&self) -> String {
        self.to.format(ISO_FORMAT).to_string()
    }
}

/// Normalize a date expression relative to `today`
pub fn normalize(expr: &str, today: NaiveDate) -> Result<DateWindow, UnrecognizedDate> {
    debug!(%expr, %today, "normalize: called");
    let expr = expr.trim();

    if let Ok(date) = NaiveDate::parse_from_str(expr, ISO_FORMAT) {
        debug!(%date, "normalize: parsed ISO date");
        return DateWindow::starting(date);
    }

    debug!("normalize: not an ISO date, trying month name");
    let month: Month = expr.parse().map_err(|_| {
        debug!("normalize: not a month name either");
        UnrecognizedDate(expr.to_string())
    })?;

    let from = first_of_upcoming(month, today).ok_or_else(|| UnrecognizedDate(expr.to_string()))?;
    debug!(%from, "normalize: resolved month name");
    DateWindow::starting(from)
}

/// First day of `month` in the current year, or next year if `month` is already behind `today`
pub fn first_of_upcoming(month: Month, today: NaiveDate) -> Option<NaiveDate> {
    let month_number = month.number_from_month();
    let year = if month_number < today.month() {
        today.year() + 1
    } else {
        today.year()
    };
    NaiveDate::from_ymd_opt(year, month_number, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_date_is_used_as_is() {
        let window = normalize("2025-12-20", ymd(2025, 6, 1)).unwrap();
        assert_eq!(window.from, ymd(2025, 12, 20));
        assert_eq!(window.to, ymd(2025, 12, 21));
        assert_eq!(window.from_iso(), "2025-12-20");
        assert_eq!(window.to_iso(), "2025-12-21");
    }

    #[test]
    fn test_iso_date_in_the_past_is_not_rolled() {
        let window = normalize("2020-01-05", ymd(2025, 6, 1)).unwrap();
        assert_eq!(window.from, ymd(2020, 1, 5));
    }

    #[test]
    fn test_iso_window_crosses_year_end() {
        let window = normalize("2025-12-31", ymd(2025, 1, 1)).unwrap();
        assert_eq!(window.to, ymd(2026, 1, 1));
    }

    #[test]
    fn test_month_later_this_year() {
        let window = normalize("December", ymd(2025, 10, 16)).unwrap();
        assert_eq!(window.from, ymd(2025, 12, 1));
        assert_eq!(window.to, ymd(2025, 12, 2));
    }

    #[test]
    fn test_current_month_stays_in_current_year() {
        let window = normalize("October", ymd(2025, 10, 16)).unwrap();
        assert_eq!(window.from, ymd(2025, 10, 1));
    }

    #[test]
    fn test_past_month_rolls_to_next_year() {
        let window = normalize("March", ymd(2025, 10, 16)).unwrap();
        assert_eq!(window.from, ymd(2026, 3, 1));
    }

    #[test]
    fn test_month_name_is_case_insensitive() {
        let today = ymd(2025, 1, 10);
        assert_eq!(normalize("december", today).unwrap().from, ymd(2025, 12, 1));
        assert_eq!(normalize("DECEMBER", today).unwrap().from, ymd(2025, 12, 1));
        assert_eq!(normalize("Dec", today).unwrap().from, ymd(2025, 12, 1));
    }

    #[test]
    fn test_unrecognized_expressions() {
        let today = ymd(2025, 1, 10);
        for expr in ["next week", "", "2025-13-01", "Decembre", "12/20/2025"] {
            let err = normalize(expr, today).unwrap_err();
            assert_eq!(err.0, expr.trim());
        }
    }

    proptest! {
        #[test]
        fn prop_iso_dates_round_trip(days in 0i64..80_000) {
            let date = ymd(1900, 1, 1) + chrono::Duration::days(days);
            let expr = date.format(ISO_FORMAT).to_string();
            let window = normalize(&expr, ymd(2025, 6, 15)).unwrap();
            prop_assert_eq!(window.from, date);
            prop_assert_eq!(window.to, date + chrono::Duration::days(1));
        }

        #[test]
        fn prop_month_names_resolve_forward(month in 1u32..=12, today_month in 1u32..=12, year in 2000i32..2100) {
            let name = Month::try_from(month as u8).unwrap().name();
            let today = ymd(year, today_month, 15);
            let window = normalize(name, today).unwrap();
            let expected_year = if month >= today_month { year } else { year + 1 };
            prop_assert_eq!(window.from, ymd(expected_year, month, 1));
            prop_assert_eq!(window.from.day(), 1);
        }
    }
}
