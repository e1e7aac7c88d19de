//! Time-of-effort value parsing and formatting.
//!
//! Timesheet hours travel as `"HH:MM"` strings everywhere: the backend stores
//! them that way, the edit surface displays them that way, and totals are
//! recomputed by parsing and re-formatting. This module is the single place
//! where those strings are interpreted.
//!
//! ## Format Specifications
//!
//! - Hours and minutes are zero-padded to 2 digits
//! - An empty or absent value means zero, not an error
//! - A bare integer (`"7"`) is hours with zero minutes
//! - Minute overflow is *clamped*, not rejected, and the clamp boundary
//!   differs between the parse path and the commit path, see [`MinutePolicy`]
//!
//! ## Examples
//!
//! ```rust
//! use tsheet::libs::time::{format_minutes, parse_hhmm, sum_minutes};
//!
//! let value = parse_hhmm("02:30").unwrap();
//! assert_eq!(value.total_minutes(), 150);
//! assert_eq!(format_minutes(225), "03:45");
//! assert_eq!(sum_minutes(["02:30", "01:15"]), 225);
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;

/// A parsed hour/minute pair.
///
/// `minutes` is normally in `[0, 59]`, but the commit-path clamp can leave a
/// literal 60 in place (see [`MinutePolicy::Cap60`]); arithmetic through
/// [`TimeValue::total_minutes`] stays correct either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeValue {
    pub hours: u32,
    pub minutes: u32,
}

impl TimeValue {
    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    /// Canonical `"HH:MM"` rendering of this value as typed, without
    /// re-normalizing minute overflow into the hour field.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Minute-overflow clamp policies.
///
/// The two observed behaviors of the edit surface are kept as distinct named
/// policies rather than merged: the parse path caps at 59 and the blur/commit
/// path caps at 60, leaving an exact 60 untouched. Which call site uses which
/// policy is pinned by tests; picking a single policy is a pending product
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinutePolicy {
    /// Values of 60 and above clamp to 59; the result is always a valid
    /// clock minute.
    Cap59,
    /// Values strictly above 60 clamp to 60; an exact 60 passes through.
    Cap60,
}

impl MinutePolicy {
    pub fn apply(&self, minutes: u32) -> u32 {
        match self {
            MinutePolicy::Cap59 => {
                if minutes >= 60 {
                    59
                } else {
                    minutes
                }
            }
            MinutePolicy::Cap60 => {
                if minutes > 60 {
                    60
                } else {
                    minutes
                }
            }
        }
    }
}

/// Parses a user-facing hours string: `H`, `HH`, `H:M` or `HH:MM`.
///
/// An empty string yields zero; absent entries display as `"00:00"`
/// downstream. The hour token must be an integer in `[0, 23]`; a minute token
/// that is not an integer fails, while an oversized one is clamped through
/// [`MinutePolicy::Cap59`].
pub fn parse_hhmm(text: &str) -> Option<TimeValue> {
    let text = text.trim();
    if text.is_empty() {
        return Some(TimeValue::default());
    }

    let (hour_token, minute_token) = match text.split_once(':') {
        Some((hours, minutes)) => (hours, Some(minutes)),
        None => (text, None),
    };

    let hours: u32 = hour_token.trim().parse().ok()?;
    if hours > 23 {
        return None;
    }

    let minutes = match minute_token {
        Some(token) => MinutePolicy::Cap59.apply(token.trim().parse().ok()?),
        None => 0,
    };

    Some(TimeValue { hours, minutes })
}

/// Lenient re-parse used when committing an edit: instead of rejecting an
/// out-of-range hour the value is clamped to 23, and minutes are clamped
/// through the given policy. Returns `None` only for non-numeric tokens.
pub fn parse_clamped(text: &str, policy: MinutePolicy) -> Option<TimeValue> {
    let text = text.trim();
    if text.is_empty() {
        return Some(TimeValue::default());
    }

    let (hour_token, minute_token) = match text.split_once(':') {
        Some((hours, minutes)) => (hours, Some(minutes)),
        None => (text, None),
    };

    let hours = hour_token.trim().parse::<u32>().ok()?.min(23);
    let minutes = match minute_token {
        Some(token) if !token.trim().is_empty() => policy.apply(token.trim().parse().ok()?),
        _ => 0,
    };

    Some(TimeValue { hours, minutes })
}

/// Formats a minute total as zero-padded `"HH:MM"`.
pub fn format_minutes(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}

/// Sums a collection of `"HH:MM"` strings into total minutes. Unparsable
/// values count as zero, mirroring how absent entries are treated.
pub fn sum_minutes<'a, I>(values: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .filter_map(parse_hhmm)
        .map(|value| value.total_minutes())
        .sum()
}

/// Sums a per-day entry map back into a single `"HH:MM"` string.
pub fn sum_entries(entries: &HashMap<NaiveDate, String>) -> String {
    format_minutes(sum_minutes(entries.values().map(String::as_str)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_bare_hours() {
        assert_eq!(parse_hhmm("7"), Some(TimeValue { hours: 7, minutes: 0 }));
        assert_eq!(parse_hhmm("23"), Some(TimeValue { hours: 23, minutes: 0 }));
    }

    #[test]
    fn parse_rejects_out_of_range_hours() {
        assert_eq!(parse_hhmm("24"), None);
        assert_eq!(parse_hhmm("930"), None);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(parse_hhmm(""), Some(TimeValue::default()));
        assert_eq!(parse_hhmm("   "), Some(TimeValue::default()));
    }

    #[test]
    fn minute_policies_diverge_at_sixty() {
        assert_eq!(MinutePolicy::Cap59.apply(60), 59);
        assert_eq!(MinutePolicy::Cap60.apply(60), 60);
        assert_eq!(MinutePolicy::Cap59.apply(75), 59);
        assert_eq!(MinutePolicy::Cap60.apply(75), 60);
        assert_eq!(MinutePolicy::Cap59.apply(59), 59);
        assert_eq!(MinutePolicy::Cap60.apply(59), 59);
    }
}
