//! The per-day hour editing surface.
//!
//! Hour entry happens one cell at a time: the user types digits, the display
//! normalizes them progressively toward `HH:MM`, and a blur/commit re-parses
//! and clamps the final value. The first time a cell reaches a strict
//! `HH:MM` value a `hours_filled` signal fires, which is what opens the
//! description-capture step in the surrounding flow; a save is only issued
//! once a non-empty description accompanies the hours.
//!
//! Commit state per line is a tagged [`LineState`] rather than ad hoc flags:
//! a saved edit is `Tentative` until the authoritative refetch replaces it,
//! and `Failed` edits keep their local value so the user can retry.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::libs::error::TimesheetError;
use crate::libs::group::TaskGroup;
use crate::libs::time::{parse_clamped, MinutePolicy, TimeValue};

/// Two-phase commit state of one line edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineState {
    /// Written locally, add/update call issued, awaiting the reconciling
    /// refetch.
    Tentative,
    /// The refetched week contains the value; the server confirmed it.
    Confirmed,
    /// The write failed; the local value is retained for retry.
    Failed(String),
}

/// Outcome of one keystroke pass through the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// The progressively normalized display value.
    pub display: String,
    /// True exactly once per distinct strict `HH:MM` value per date.
    pub hours_filled: bool,
}

/// A completed, validated edit ready to persist for one (project, task, date).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEdit {
    pub project_id: String,
    pub task_id: String,
    pub date: NaiveDate,
    pub hours: String,
    pub description: String,
}

impl DayEdit {
    /// The save action stays disabled until a description is present.
    pub fn can_save(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Normalizes raw keystrokes toward `HH:MM`: non-digits are stripped, one or
/// two digits show as-is, a third digit inserts the colon, a fourth completes
/// the value, and anything further is dropped.
pub fn normalize_keystrokes(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(4).collect();
    match digits.len() {
        0..=2 => digits,
        3 => format!("{}:{}", &digits[..2], &digits[2..]),
        _ => format!("{}:{}", &digits[..2], &digits[2..4]),
    }
}

/// Whether a display value is a complete `HH:MM` entry.
pub fn is_strict_hhmm(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[3..].iter().all(u8::is_ascii_digit)
}

/// Keystroke-level editor for one task group's week row.
///
/// Tracks the last strict value seen per date so the `hours_filled` signal
/// fires once per distinct value, and validates that edited dates fall inside
/// the group's period.
#[derive(Debug)]
pub struct DayEditor {
    period_start: NaiveDate,
    period_end: NaiveDate,
    stored: HashMap<NaiveDate, String>,
}

impl DayEditor {
    /// Seeds the fill guard with the group's existing per-day values, so
    /// retyping an unchanged value does not re-fire the signal.
    pub fn new(group: &TaskGroup) -> Self {
        let stored = group
            .lines
            .iter()
            .filter_map(|line| line.hours.clone().map(|hours| (line.date, hours)))
            .collect();
        Self {
            period_start: group.period_start,
            period_end: group.period_end,
            stored,
        }
    }

    fn check_period(&self, date: NaiveDate) -> Result<(), TimesheetError> {
        if date < self.period_start || date > self.period_end {
            return Err(TimesheetError::DateOutsidePeriod {
                date,
                start: self.period_start,
                end: self.period_end,
            });
        }
        Ok(())
    }

    /// Applies one round of raw input for a day and reports the normalized
    /// display plus whether the fill signal fires.
    pub fn type_text(&mut self, date: NaiveDate, raw: &str) -> Result<EditOutcome, TimesheetError> {
        self.check_period(date)?;

        let display = normalize_keystrokes(raw);
        let hours_filled = is_strict_hhmm(&display) && self.stored.get(&date) != Some(&display);
        if hours_filled {
            self.stored.insert(date, display.clone());
        }

        Ok(EditOutcome { display, hours_filled })
    }

    /// Commits (blurs) a day's input: re-parses the normalized value, clamps
    /// the hour to 23 and the minutes through [`MinutePolicy::Cap60`], and
    /// returns the corrected display string.
    pub fn commit(&mut self, date: NaiveDate, raw: &str) -> Result<String, TimesheetError> {
        self.check_period(date)?;

        let normalized = normalize_keystrokes(raw);
        let value = parse_clamped(&normalized, MinutePolicy::Cap60).unwrap_or(TimeValue::default());
        let display = value.display();
        self.stored.insert(date, display.clone());

        Ok(display)
    }
}
