//! Display implementation for tsheet application messages.
//!
//! All user-facing text lives here, keyed by the [`Message`] enum, so command
//! code never carries literal strings and the wording stays consistent.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigServerMissing => "No server configured. Run 'tsheet init' first".to_string(),

            // === TIMESHEET MESSAGES ===
            Message::LineSaved(line) => format!("Saved hours for {}", line),
            Message::LineSaveFailed(reason) => format!("Could not save the entry: {}", reason),
            Message::GroupDeleted(key) => format!("Removed all entries for {}", key),
            Message::GroupDeleteFailed(reason) => format!("Could not delete the task group: {}", reason),
            Message::ConfirmDeleteGroup(title) => format!("Delete every entry for \"{}\" this week?", title),
            Message::DeleteCancelled => "Delete cancelled".to_string(),
            Message::TimesheetSubmitted => "Timesheet submitted for approval".to_string(),
            Message::SubmitFailed(reason) => format!("Could not submit the timesheet: {}", reason),
            Message::TransferCompleted(week) => format!("Entries transferred to the week of {}", week),
            Message::TransferFailed(reason) => format!("Could not transfer the entries: {}", reason),
            Message::EligibilityDenied(reason) => format!("New entries are not allowed: {}", reason),
            Message::RefreshFailed(reason) => format!("Could not refresh the timesheet: {}", reason),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Week exported to: {}", path),

            // === API MESSAGES ===
            Message::ApiRequestFailed(status) => format!("API request failed with status {}", status),

            // === INPUT MESSAGES ===
            Message::InvalidDate(input) => {
                format!("Could not read \"{}\" as a date (expected dd-MMM-yyyy or yyyy-mm-dd)", input)
            }
            Message::InvalidSelector(input) => {
                format!("Could not read \"{}\" as a task selector (expected project:task)", input)
            }
        };
        write!(f, "{}", text)
    }
}
