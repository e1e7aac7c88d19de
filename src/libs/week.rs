//! Calendar-date formatting and Monday-to-Sunday week math.
//!
//! All date math operates on local calendar dates; the backend and the user
//! are assumed to share a timezone, so no conversion happens here. Two string
//! formats exist: the `dd-MMM-yyyy` display format and the ISO `yyyy-mm-dd`
//! wire format the API speaks.

use chrono::{Datelike, Duration, NaiveDate};

/// Display format shown to users, e.g. `06-Jan-2025`.
pub const DISPLAY_FORMAT: &str = "%d-%b-%Y";

/// Wire format used in API payloads, e.g. `2025-01-06`.
pub const API_FORMAT: &str = "%Y-%m-%d";

pub fn to_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn to_api_date(date: NaiveDate) -> String {
    date.format(API_FORMAT).to_string()
}

/// Parses either the display format or an ISO date. Unparsable input yields
/// `None` rather than an error; callers decide whether that is fatal.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DISPLAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, API_FORMAT))
        .ok()
}

/// Snaps any date back to the Monday of its week.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The Sunday ending the week that starts on `monday`. The input is assumed
/// to actually be a Monday; this adds six days without validating.
pub fn sunday_of_week(monday: NaiveDate) -> NaiveDate {
    monday + Duration::days(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn display_round_trip() {
        let day = date(2025, 1, 6);
        let shown = to_display_date(day);
        assert_eq!(shown, "06-Jan-2025");
        assert_eq!(parse_date(&shown), Some(day));
        assert_eq!(parse_date("2025-01-06"), Some(day));
    }

    #[test]
    fn unparsable_input_is_none() {
        assert_eq!(parse_date("Jan 6 2025"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn sunday_is_six_days_after_monday() {
        assert_eq!(sunday_of_week(date(2025, 1, 6)), date(2025, 1, 12));
    }

    #[test]
    fn monday_snap() {
        assert_eq!(monday_of_week(date(2025, 1, 9)), date(2025, 1, 6));
        assert_eq!(monday_of_week(date(2025, 1, 6)), date(2025, 1, 6));
        assert_eq!(monday_of_week(date(2025, 1, 12)), date(2025, 1, 6));
    }
}
