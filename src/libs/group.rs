//! Grouping of flat timesheet lines into per-task records.
//!
//! The backend returns a week as a flat list of per-day lines; the client
//! works with one record per (project, task) pair carrying all of that pair's
//! lines and a computed total. Groups are a projection: they are rebuilt from
//! scratch after every fetch and never patched in place; one changed line
//! triggers a full regroup once the server round-trip confirms the write.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::libs::error::TimesheetError;
use crate::libs::time::{format_minutes, sum_minutes};
use crate::libs::timesheet::{HeaderStatus, TimesheetHeader, TimesheetLine};

/// Client-side aggregation of all lines sharing a project/task pair within
/// the active period. In-memory only; never persisted.
#[derive(Debug, Clone)]
pub struct TaskGroup {
    pub project_id: String,
    pub project_title: String,
    pub task_id: String,
    pub task_title: String,
    pub lines: Vec<TimesheetLine>,
    pub total_minutes: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: HeaderStatus,
}

impl TaskGroup {
    pub fn group_key(&self) -> String {
        group_key(&self.project_id, &self.task_id)
    }

    /// The stored hours string for one day of this group, if a line exists.
    pub fn hours_for(&self, date: NaiveDate) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.date == date)
            .and_then(|line| line.hours.as_deref())
    }

    /// Lines that carry actual hours (not `"00:00"` or absent).
    pub fn filled_line_count(&self) -> usize {
        self.lines.iter().filter(|line| line.is_filled()).count()
    }

    pub fn total_display(&self) -> String {
        format_minutes(self.total_minutes)
    }
}

pub fn group_key(project_id: &str, task_id: &str) -> String {
    format!("{}:{}", project_id, task_id)
}

/// Builds task groups from a flat line list, preserving first-seen order.
pub trait GroupLines {
    fn group(self, header: &TimesheetHeader) -> Result<Vec<TaskGroup>, TimesheetError>;
}

impl GroupLines for Vec<TimesheetLine> {
    fn group(self, header: &TimesheetHeader) -> Result<Vec<TaskGroup>, TimesheetError> {
        let mut order: Vec<String> = Vec::new();
        let mut by_key: HashMap<String, TaskGroup> = HashMap::new();

        for line in self {
            // A line missing either id cannot be addressed by any write
            // endpoint, so it cannot participate in grouping.
            if !line.is_addressable() {
                crate::msg_debug!(format!(
                    "skipping unaddressable line on {} ({:?}/{:?})",
                    line.date, line.project_title, line.task_title
                ));
                continue;
            }

            let key = group_key(&line.project_id, &line.task_id);
            match by_key.get_mut(&key) {
                Some(group) => {
                    // The backend must not hand out the same pair under two
                    // different titles; merging them would hide the conflict.
                    if group.project_title != line.project_title || group.task_title != line.task_title {
                        return Err(TimesheetError::DuplicateTaskGroup {
                            project_id: line.project_id,
                            task_id: line.task_id,
                        });
                    }
                    group.lines.push(line);
                }
                None => {
                    order.push(key.clone());
                    by_key.insert(
                        key,
                        TaskGroup {
                            project_id: line.project_id.clone(),
                            project_title: line.project_title.clone(),
                            task_id: line.task_id.clone(),
                            task_title: line.task_title.clone(),
                            lines: vec![line],
                            total_minutes: 0,
                            period_start: header.period_start,
                            period_end: header.period_end,
                            status: header.status,
                        },
                    );
                }
            }
        }

        let mut groups: Vec<TaskGroup> = order.into_iter().filter_map(|key| by_key.remove(&key)).collect();
        for group in &mut groups {
            group.total_minutes = sum_minutes(group.lines.iter().filter_map(|line| line.hours.as_deref()));
        }

        Ok(groups)
    }
}
