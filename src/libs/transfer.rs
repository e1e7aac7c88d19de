//! Planning of bulk task-group transfers between weeks.
//!
//! A transfer moves every line of the selected task groups into a different
//! week with a single backend call. The planner only assembles the request;
//! it either produces a complete one or fails fast: a group that cannot be
//! addressed aborts the whole plan before anything is sent, and the server
//! decides actual atomicity.

use chrono::NaiveDate;
use serde::Serialize;

use crate::libs::error::TimesheetError;
use crate::libs::group::TaskGroup;
use crate::libs::week::sunday_of_week;

/// The wire request for a bulk transfer. `line_ids` is the comma-joined list
/// of `"project:task"` pairs being moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub line_ids: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub header_id: String,
}

/// Builds the transfer request for a set of selected groups and a target
/// week. Fails fast when the selection is empty or any group lacks a
/// resolvable id pair, naming the offending group.
pub fn plan_transfer(
    selected: &[&TaskGroup],
    target_monday: NaiveDate,
    header_id: &str,
) -> Result<TransferRequest, TimesheetError> {
    if selected.is_empty() {
        return Err(TimesheetError::EmptySelection);
    }

    let mut pairs = Vec::with_capacity(selected.len());
    for group in selected {
        if group.project_id.is_empty() || group.task_id.is_empty() {
            return Err(TimesheetError::UnresolvedGroup {
                project_title: group.project_title.clone(),
                task_title: group.task_title.clone(),
            });
        }
        pairs.push(group.group_key());
    }

    Ok(TransferRequest {
        line_ids: pairs.join(","),
        from_date: target_monday,
        to_date: sunday_of_week(target_monday),
        header_id: header_id.to_string(),
    })
}
