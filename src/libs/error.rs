use chrono::NaiveDate;
use thiserror::Error;

use crate::libs::timesheet::HeaderStatus;

/// Client-local validation and precondition failures.
///
/// These never reach the network: every variant is raised before a request is
/// issued, so a caller that sees one knows no backend state changed.
#[derive(Debug, Error, PartialEq)]
pub enum TimesheetError {
    #[error("task group {project_id}:{task_id} appears more than once with conflicting titles")]
    DuplicateTaskGroup { project_id: String, task_id: String },

    #[error("{date} is outside the current period {start} – {end}")]
    DateOutsidePeriod {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("{date} is marked as leave; hours cannot be entered for it")]
    DateOnLeave { date: NaiveDate },

    #[error("a description is required before the entry can be saved")]
    EmptyDescription,

    #[error("no task groups selected for transfer")]
    EmptySelection,

    #[error("selected group \"{project_title} / {task_title}\" has no resolvable project/task pair")]
    UnresolvedGroup {
        project_title: String,
        task_title: String,
    },

    #[error("no task group {group_key} in the current period")]
    GroupNotFound { group_key: String },

    #[error("no timesheet loaded for the current period")]
    NotLoaded,

    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,

    #[error("a request is already in flight for this timesheet")]
    RequestInFlight,

    #[error("timesheet cannot be submitted while its status is {status}")]
    SubmitStatusClosed { status: HeaderStatus },

    #[error("timesheet cannot be submitted without any recorded hours")]
    SubmitNothingRecorded,
}
