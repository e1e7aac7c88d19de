//! The week-screen workflow: fetch, edit, reconcile.
//!
//! [`WeekScreen`] is the single owner of a week's client-side state (header,
//! task groups, leave dates, selection) and the only place that mutates it.
//! All mutation follows the same shape: validate locally, issue one backend
//! call, and on success refetch the whole week so the server stays the source
//! of truth. Failures are terminal for that one action; local state is left
//! as it was before the optimistic assumption.
//!
//! Fetching is modeled as an explicit state machine plus a generation
//! counter: starting a new fetch supersedes any outstanding one, and a
//! completion whose generation is stale is discarded ("latest intent wins").
//! A single `busy` flag refuses a second mutating call while one is still
//! outstanding, the cooperative equivalent of disabling the triggering
//! control.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use chrono::NaiveDate;

use crate::api::timesheet::{
    AddLineRequest, DeleteGroupRequest, FetchTimesheetRequest, FetchTimesheetResponse, SubmitRequest,
};
use crate::api::TimesheetBackend;
use crate::libs::edit::{DayEdit, LineState};
use crate::libs::error::TimesheetError;
use crate::libs::group::{group_key, GroupLines, TaskGroup};
use crate::libs::messages::Message;
use crate::libs::timesheet::{LeaveEntry, TimesheetHeader};
use crate::libs::transfer::plan_transfer;
use crate::libs::week::sunday_of_week;
use crate::{msg_debug, msg_error_anyhow, msg_warning};

/// Fallback shown when the server fails a request without a message.
const GENERIC_FAILURE: &str = "the server rejected the request";

/// Observable state of the week fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching,
}

/// Client-side owner of one displayed week.
pub struct WeekScreen<B: TimesheetBackend> {
    backend: B,
    fetch_state: FetchState,
    generation: u64,
    busy: bool,
    header: Option<TimesheetHeader>,
    groups: Vec<TaskGroup>,
    leave_dates: Vec<LeaveEntry>,
    selection: HashSet<String>,
    line_states: HashMap<(String, NaiveDate), LineState>,
    pending_delete: Option<String>,
}

impl<B: TimesheetBackend> WeekScreen<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            fetch_state: FetchState::default(),
            generation: 0,
            busy: false,
            header: None,
            groups: Vec::new(),
            leave_dates: Vec::new(),
            selection: HashSet::new(),
            line_states: HashMap::new(),
            pending_delete: None,
        }
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn header(&self) -> Result<&TimesheetHeader, TimesheetError> {
        self.header.as_ref().ok_or(TimesheetError::NotLoaded)
    }

    pub fn groups(&self) -> &[TaskGroup] {
        &self.groups
    }

    pub fn leave_dates(&self) -> &[LeaveEntry] {
        &self.leave_dates
    }

    pub fn is_leave_date(&self, date: NaiveDate) -> bool {
        self.leave_dates.iter().any(|leave| leave.date == date)
    }

    /// Total minutes across all groups; always a projection of the lines.
    pub fn total_minutes(&self) -> u32 {
        self.groups.iter().map(|group| group.total_minutes).sum()
    }

    pub fn line_state(&self, key: &str, date: NaiveDate) -> Option<&LineState> {
        self.line_states.get(&(key.to_string(), date))
    }

    // --- fetch state machine ---------------------------------------------

    /// Starts a fetch attempt, superseding any outstanding one. The returned
    /// generation must be handed back to [`apply_fetch`](Self::apply_fetch).
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.fetch_state = FetchState::Fetching;
        self.generation
    }

    /// Applies a completed fetch. Responses from a superseded fetch are
    /// discarded and `false` is returned.
    pub fn apply_fetch(&mut self, generation: u64, response: FetchTimesheetResponse) -> Result<bool> {
        if generation != self.generation {
            msg_debug!(format!(
                "discarding stale fetch (generation {} superseded by {})",
                generation, self.generation
            ));
            return Ok(false);
        }

        let header = response.header();
        let groups = response.lines.group(&header)?;

        self.header = Some(header);
        self.groups = groups;
        self.leave_dates = response.leave_dates;
        self.selection.clear();
        self.line_states.clear();
        self.pending_delete = None;
        self.fetch_state = FetchState::Idle;
        Ok(true)
    }

    fn fetch_failed(&mut self, generation: u64) {
        if generation == self.generation {
            self.fetch_state = FetchState::Idle;
        }
    }

    /// Fetches and regroups the week starting at `monday`.
    pub async fn load_week(&mut self, monday: NaiveDate) -> Result<()> {
        let generation = self.begin_fetch();
        let request = FetchTimesheetRequest {
            period_start: monday,
            period_end: sunday_of_week(monday),
        };

        match self.backend.fetch_timesheet(&request).await {
            Ok(response) => {
                self.apply_fetch(generation, response)?;
                Ok(())
            }
            Err(error) => {
                self.fetch_failed(generation);
                Err(error)
            }
        }
    }

    /// Refetches the currently displayed period. The reconciled data replaces
    /// every tentative local state.
    pub async fn refresh(&mut self) -> Result<()> {
        let start = self.header()?.period_start;
        self.load_week(start).await
    }

    // --- line editing -----------------------------------------------------

    /// Persists one day's edit: validates locally, checks add eligibility,
    /// then issues the add/update call and refetches on success. A failed
    /// write keeps the local edit and records [`LineState::Failed`]; there is
    /// no automatic retry.
    pub async fn save_line(&mut self, edit: &DayEdit) -> Result<()> {
        let header = self.header()?.clone();
        if self.busy {
            return Err(TimesheetError::RequestInFlight.into());
        }
        if !header.contains(edit.date) {
            return Err(TimesheetError::DateOutsidePeriod {
                date: edit.date,
                start: header.period_start,
                end: header.period_end,
            }
            .into());
        }
        if self.is_leave_date(edit.date) {
            return Err(TimesheetError::DateOnLeave { date: edit.date }.into());
        }
        if !edit.can_save() {
            return Err(TimesheetError::EmptyDescription.into());
        }

        self.busy = true;
        let result = self.save_line_inner(&header, edit).await;
        self.busy = false;
        result
    }

    async fn save_line_inner(&mut self, header: &TimesheetHeader, edit: &DayEdit) -> Result<()> {
        let eligibility = self.backend.check_add_eligibility().await?;
        if !eligibility.success {
            let reason = eligibility.message_or(GENERIC_FAILURE).to_string();
            return Err(msg_error_anyhow!(Message::EligibilityDenied(reason)));
        }

        let key = (group_key(&edit.project_id, &edit.task_id), edit.date);
        self.line_states.insert(key.clone(), LineState::Tentative);

        let request = AddLineRequest {
            header_id: header.header_id.clone(),
            project_id: edit.project_id.clone(),
            task_id: edit.task_id.clone(),
            date: edit.date,
            hours: edit.hours.clone(),
            remark: edit.description.clone(),
        };

        match self.backend.add_line(&request).await {
            Ok(response) if response.success => {
                self.line_states.insert(key, LineState::Confirmed);
                self.refresh().await
            }
            Ok(response) => {
                let reason = response.message_or(GENERIC_FAILURE).to_string();
                self.line_states.insert(key, LineState::Failed(reason.clone()));
                Err(msg_error_anyhow!(Message::LineSaveFailed(reason)))
            }
            Err(error) => {
                self.line_states.insert(key, LineState::Failed(error.to_string()));
                Err(error)
            }
        }
    }

    // --- group deletion ---------------------------------------------------

    /// First step of the two-step delete: stages the group and returns it so
    /// the caller can ask for confirmation.
    pub fn request_delete(&mut self, key: &str) -> Result<&TaskGroup, TimesheetError> {
        let index = self
            .groups
            .iter()
            .position(|group| group.group_key() == key)
            .ok_or_else(|| TimesheetError::GroupNotFound { group_key: key.to_string() })?;
        self.pending_delete = Some(key.to_string());
        Ok(&self.groups[index])
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step: removes the staged group optimistically and issues the
    /// delete call. On failure the group is restored at its old position; on
    /// success a refetch reconciles in the background.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let header = self.header()?.clone();
        if self.busy {
            return Err(TimesheetError::RequestInFlight.into());
        }
        let key = self.pending_delete.take().ok_or(TimesheetError::NoPendingDelete)?;

        let index = self
            .groups
            .iter()
            .position(|group| group.group_key() == key)
            .ok_or_else(|| TimesheetError::GroupNotFound { group_key: key.clone() })?;
        let group = self.groups.remove(index);

        let request = DeleteGroupRequest {
            header_id: header.header_id.clone(),
            project_id: group.project_id.clone(),
            task_id: group.task_id.clone(),
        };

        self.busy = true;
        let outcome = self.backend.delete_group(&request).await;
        self.busy = false;

        match outcome {
            Ok(response) if response.success => {
                self.selection.remove(&key);
                if let Err(error) = self.refresh().await {
                    msg_warning!(Message::RefreshFailed(error.to_string()));
                }
                Ok(())
            }
            Ok(response) => {
                let reason = response.message_or(GENERIC_FAILURE).to_string();
                self.groups.insert(index.min(self.groups.len()), group);
                Err(msg_error_anyhow!(Message::GroupDeleteFailed(reason)))
            }
            Err(error) => {
                self.groups.insert(index.min(self.groups.len()), group);
                Err(error)
            }
        }
    }

    // --- submission -------------------------------------------------------

    /// The header-level submit gate: status must allow it, at least one group
    /// must exist and total minutes must be positive.
    pub fn submit_gate(&self) -> Result<(), TimesheetError> {
        let header = self.header()?;
        if !header.status.allows_submit() {
            return Err(TimesheetError::SubmitStatusClosed { status: header.status });
        }
        if self.groups.is_empty() || self.total_minutes() == 0 {
            return Err(TimesheetError::SubmitNothingRecorded);
        }
        Ok(())
    }

    pub fn submit_allowed(&self) -> bool {
        self.submit_gate().is_ok()
    }

    /// Submits the week. The status display only changes via the refetch;
    /// the server is the source of truth for the transition.
    pub async fn submit(&mut self) -> Result<()> {
        self.submit_gate()?;
        let header = self.header()?.clone();
        if self.busy {
            return Err(TimesheetError::RequestInFlight.into());
        }

        let request = SubmitRequest {
            header_id: header.header_id.clone(),
        };

        self.busy = true;
        let outcome = self.backend.submit(&request).await;
        self.busy = false;

        match outcome {
            Ok(response) if response.success => self.refresh().await,
            Ok(response) => {
                let reason = response.message_or(GENERIC_FAILURE).to_string();
                Err(msg_error_anyhow!(Message::SubmitFailed(reason)))
            }
            Err(error) => Err(error),
        }
    }

    // --- transfer ---------------------------------------------------------

    /// Toggles a group in or out of the transfer selection.
    pub fn toggle_selection(&mut self, key: &str) -> Result<bool, TimesheetError> {
        if !self.groups.iter().any(|group| group.group_key() == key) {
            return Err(TimesheetError::GroupNotFound { group_key: key.to_string() });
        }
        if self.selection.remove(key) {
            Ok(false)
        } else {
            self.selection.insert(key.to_string());
            Ok(true)
        }
    }

    pub fn selection(&self) -> &HashSet<String> {
        &self.selection
    }

    /// Moves every selected group's lines to the week starting at
    /// `target_monday`. Selection is cleared only on success so a failed call
    /// can be retried without re-selecting.
    pub async fn transfer_selected(&mut self, target_monday: NaiveDate) -> Result<()> {
        let header = self.header()?.clone();
        if self.busy {
            return Err(TimesheetError::RequestInFlight.into());
        }

        let request = {
            let selected: Vec<&TaskGroup> = self
                .groups
                .iter()
                .filter(|group| self.selection.contains(&group.group_key()))
                .collect();
            plan_transfer(&selected, target_monday, &header.header_id)?
        };

        self.busy = true;
        let outcome = self.backend.transfer(&request).await;
        self.busy = false;

        match outcome {
            Ok(response) if response.success => {
                self.selection.clear();
                // The displayed period is unchanged; the moved lines simply
                // disappear from it on the refetch.
                self.refresh().await
            }
            Ok(response) => {
                let reason = response.message_or(GENERIC_FAILURE).to_string();
                Err(msg_error_anyhow!(Message::TransferFailed(reason)))
            }
            Err(error) => Err(error),
        }
    }
}
