//! Wire-level timesheet records as the backend returns them.
//!
//! A week's timesheet is one [`TimesheetHeader`] plus a flat list of
//! [`TimesheetLine`] rows, one per (project, task, date). The client never
//! mutates these in place: every write goes to the backend, and the week is
//! refetched and regrouped afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-owned lifecycle state of a week's timesheet.
///
/// Transitions happen server-side on submit/approve/reject; the client only
/// ever reads this back from a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
}

impl HeaderStatus {
    /// Whether a submit action is permitted for this status. Submitted and
    /// approved weeks are closed to the client.
    pub fn allows_submit(&self) -> bool {
        matches!(self, HeaderStatus::Pending | HeaderStatus::Rejected)
    }
}

impl fmt::Display for HeaderStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The week-level timesheet record, one per employee per period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetHeader {
    pub header_id: String,
    pub employee_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: HeaderStatus,
    #[serde(default)]
    pub total_minutes: u32,
}

impl TimesheetHeader {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }
}

/// A single day's hour entry for one project/task.
///
/// The tuple (`project_id`, `task_id`, `date`) is the addressable unit for
/// add/update/delete. `hours` may be absent or `"00:00"` for an unfilled day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetLine {
    pub project_id: String,
    #[serde(default)]
    pub project_title: String,
    pub task_id: String,
    #[serde(default)]
    pub task_title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl TimesheetLine {
    /// Whether this line can be addressed by the write endpoints.
    pub fn is_addressable(&self) -> bool {
        !self.project_id.is_empty() && !self.task_id.is_empty()
    }

    /// Whether the line carries actual hours. `"00:00"`, an empty string and
    /// an absent value all count as unfilled.
    pub fn is_filled(&self) -> bool {
        match self.hours.as_deref() {
            Some(hours) => crate::libs::time::sum_minutes([hours]) > 0,
            None => false,
        }
    }
}

/// A date blocked for hour entry because the employee is on leave.
/// Read-only reference data; never part of the write path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveEntry {
    pub date: NaiveDate,
    pub weekday_name: String,
}
