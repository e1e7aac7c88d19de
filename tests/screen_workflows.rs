#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tsheet::api::timesheet::{
        AddLineRequest, DeleteGroupRequest, FetchTimesheetRequest, FetchTimesheetResponse, SubmitRequest,
    };
    use tsheet::api::{ApiResponse, TimesheetBackend};
    use tsheet::libs::edit::{DayEdit, LineState};
    use tsheet::libs::error::TimesheetError;
    use tsheet::libs::screen::{FetchState, WeekScreen};
    use tsheet::libs::timesheet::{HeaderStatus, LeaveEntry, TimesheetLine};
    use tsheet::libs::transfer::TransferRequest;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn line(project: &str, task: &str, day: u32, hours: &str) -> TimesheetLine {
        TimesheetLine {
            project_id: project.to_string(),
            project_title: format!("Project {}", project),
            task_id: task.to_string(),
            task_title: format!("Task {}", task),
            date: date(day),
            hours: Some(hours.to_string()),
            remark: Some("logged".to_string()),
        }
    }

    fn week_response(lines: Vec<TimesheetLine>) -> FetchTimesheetResponse {
        FetchTimesheetResponse {
            header_id: "H1".to_string(),
            employee_name: "Dana Vermeer".to_string(),
            period_start: date(6),
            period_end: date(12),
            status: HeaderStatus::Pending,
            total_minutes: 0,
            lines,
            leave_dates: Vec::new(),
        }
    }

    /// Per-endpoint canned responses. Successful mutations are mirrored into
    /// the scripted server state so the follow-up refetch reconciles the way
    /// the real backend would.
    struct Responses {
        add: ApiResponse,
        delete: ApiResponse,
        submit: ApiResponse,
        transfer: ApiResponse,
        eligibility: ApiResponse,
    }

    impl Default for Responses {
        fn default() -> Self {
            Self {
                add: ApiResponse::ok(),
                delete: ApiResponse::ok(),
                submit: ApiResponse::ok(),
                transfer: ApiResponse::ok(),
                eligibility: ApiResponse::ok(),
            }
        }
    }

    #[derive(Clone)]
    struct ScriptedBackend {
        server: Rc<RefCell<FetchTimesheetResponse>>,
        responses: Rc<RefCell<Responses>>,
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptedBackend {
        fn new(server: FetchTimesheetResponse) -> Self {
            Self {
                server: Rc::new(RefCell::new(server)),
                responses: Rc::new(RefCell::new(Responses::default())),
                calls: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn record(&self, call: &str) {
            self.calls.borrow_mut().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl TimesheetBackend for ScriptedBackend {
        async fn fetch_timesheet(&self, _request: &FetchTimesheetRequest) -> Result<FetchTimesheetResponse> {
            self.record("fetch");
            Ok(self.server.borrow().clone())
        }

        async fn add_line(&self, request: &AddLineRequest) -> Result<ApiResponse> {
            self.record("add");
            let response = self.responses.borrow().add.clone();
            if response.success {
                let mut server = self.server.borrow_mut();
                let existing = server.lines.iter_mut().find(|line| {
                    line.project_id == request.project_id
                        && line.task_id == request.task_id
                        && line.date == request.date
                });
                match existing {
                    Some(line) => {
                        line.hours = Some(request.hours.clone());
                        line.remark = Some(request.remark.clone());
                    }
                    None => {
                        let mut added = line(&request.project_id, &request.task_id, 6, &request.hours);
                        added.date = request.date;
                        added.remark = Some(request.remark.clone());
                        server.lines.push(added);
                    }
                }
            }
            Ok(response)
        }

        async fn delete_group(&self, request: &DeleteGroupRequest) -> Result<ApiResponse> {
            self.record("delete");
            let response = self.responses.borrow().delete.clone();
            if response.success {
                self.server
                    .borrow_mut()
                    .lines
                    .retain(|line| !(line.project_id == request.project_id && line.task_id == request.task_id));
            }
            Ok(response)
        }

        async fn submit(&self, _request: &SubmitRequest) -> Result<ApiResponse> {
            self.record("submit");
            let response = self.responses.borrow().submit.clone();
            if response.success {
                self.server.borrow_mut().status = HeaderStatus::Submitted;
            }
            Ok(response)
        }

        async fn transfer(&self, request: &TransferRequest) -> Result<ApiResponse> {
            self.record("transfer");
            let response = self.responses.borrow().transfer.clone();
            if response.success {
                let moved: Vec<String> = request.line_ids.split(',').map(str::to_string).collect();
                self.server
                    .borrow_mut()
                    .lines
                    .retain(|line| !moved.contains(&format!("{}:{}", line.project_id, line.task_id)));
            }
            Ok(response)
        }

        async fn check_add_eligibility(&self) -> Result<ApiResponse> {
            self.record("eligibility");
            Ok(self.responses.borrow().eligibility.clone())
        }
    }

    fn default_edit() -> DayEdit {
        DayEdit {
            project_id: "P1".to_string(),
            task_id: "T1".to_string(),
            date: date(7),
            hours: "09:30".to_string(),
            description: "Sprint work".to_string(),
        }
    }

    async fn loaded_screen(backend: ScriptedBackend) -> WeekScreen<ScriptedBackend> {
        let mut screen = WeekScreen::new(backend);
        screen.load_week(date(6)).await.unwrap();
        screen
    }

    #[tokio::test]
    async fn test_load_week_groups_lines() {
        let backend = ScriptedBackend::new(week_response(vec![
            line("P1", "T1", 6, "02:30"),
            line("P1", "T1", 7, "01:15"),
            line("P2", "T7", 6, "01:00"),
        ]));
        let screen = loaded_screen(backend).await;

        assert_eq!(screen.fetch_state(), FetchState::Idle);
        assert_eq!(screen.groups().len(), 2);
        assert_eq!(screen.groups()[0].total_minutes, 225);
        assert_eq!(screen.total_minutes(), 285);
        assert_eq!(screen.header().unwrap().header_id, "H1");
    }

    #[tokio::test]
    async fn test_save_line_success_reconciles_via_refetch() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30")]));
        let mut screen = loaded_screen(backend.clone()).await;

        screen.save_line(&default_edit()).await.unwrap();

        assert_eq!(backend.calls(), vec!["fetch", "eligibility", "add", "fetch"]);
        // The refetched week carries the new line; the tentative state map is
        // cleared by the authoritative replace.
        assert_eq!(screen.groups()[0].hours_for(date(7)), Some("09:30"));
        assert_eq!(screen.groups()[0].total_minutes, 150 + 570);
        assert!(screen.line_state("P1:T1", date(7)).is_none());
    }

    #[tokio::test]
    async fn test_save_line_failure_keeps_local_edit_no_retry() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30")]));
        backend.responses.borrow_mut().add = ApiResponse::failed("quota exceeded");
        let mut screen = loaded_screen(backend.clone()).await;

        let error = screen.save_line(&default_edit()).await.unwrap_err();
        assert!(error.to_string().contains("quota exceeded"));

        // One add call, no automatic retry, no reconciling refetch.
        assert_eq!(backend.calls(), vec!["fetch", "eligibility", "add"]);
        assert_eq!(
            screen.line_state("P1:T1", date(7)),
            Some(&LineState::Failed("quota exceeded".to_string()))
        );
        assert_eq!(screen.groups()[0].total_minutes, 150);
    }

    #[tokio::test]
    async fn test_save_validation_never_reaches_network() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30")]));
        let mut screen = loaded_screen(backend.clone()).await;
        let fetch_only = vec!["fetch".to_string()];

        let mut edit = default_edit();
        edit.description = String::new();
        let error = screen.save_line(&edit).await.unwrap_err();
        assert_eq!(error.downcast_ref::<TimesheetError>(), Some(&TimesheetError::EmptyDescription));
        assert_eq!(backend.calls(), fetch_only);

        let mut outside = default_edit();
        outside.date = date(20);
        let error = screen.save_line(&outside).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TimesheetError>(),
            Some(TimesheetError::DateOutsidePeriod { .. })
        ));
        assert_eq!(backend.calls(), fetch_only);
    }

    #[tokio::test]
    async fn test_save_blocked_on_leave_date() {
        let mut response = week_response(vec![line("P1", "T1", 6, "02:30")]);
        response.leave_dates.push(LeaveEntry {
            date: date(7),
            weekday_name: "Tuesday".to_string(),
        });
        let backend = ScriptedBackend::new(response);
        let mut screen = loaded_screen(backend.clone()).await;

        let error = screen.save_line(&default_edit()).await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<TimesheetError>(),
            Some(&TimesheetError::DateOnLeave { date: date(7) })
        );
        assert_eq!(backend.calls(), vec!["fetch".to_string()]);
    }

    #[tokio::test]
    async fn test_eligibility_gate_blocks_add() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30")]));
        backend.responses.borrow_mut().eligibility = ApiResponse::failed("contract ended");
        let mut screen = loaded_screen(backend.clone()).await;

        let error = screen.save_line(&default_edit()).await.unwrap_err();
        assert!(error.to_string().contains("contract ended"));
        assert_eq!(backend.calls(), vec!["fetch", "eligibility"]);
    }

    #[tokio::test]
    async fn test_delete_is_two_step_and_reconciles() {
        let backend = ScriptedBackend::new(week_response(vec![
            line("P1", "T1", 6, "02:30"),
            line("P2", "T7", 6, "01:00"),
        ]));
        let mut screen = loaded_screen(backend.clone()).await;

        // Nothing staged yet: confirmation alone is refused.
        let premature = screen.confirm_delete().await.unwrap_err();
        assert_eq!(premature.downcast_ref::<TimesheetError>(), Some(&TimesheetError::NoPendingDelete));

        let staged = screen.request_delete("P1:T1").unwrap();
        assert_eq!(staged.project_title, "Project P1");

        screen.confirm_delete().await.unwrap();
        assert_eq!(backend.calls(), vec!["fetch", "delete", "fetch"]);
        assert_eq!(screen.groups().len(), 1);
        assert_eq!(screen.groups()[0].group_key(), "P2:T7");
    }

    #[tokio::test]
    async fn test_delete_failure_restores_group() {
        let backend = ScriptedBackend::new(week_response(vec![
            line("P1", "T1", 6, "02:30"),
            line("P2", "T7", 6, "01:00"),
        ]));
        backend.responses.borrow_mut().delete = ApiResponse::failed("week is locked");
        let mut screen = loaded_screen(backend.clone()).await;

        screen.request_delete("P1:T1").unwrap();
        let error = screen.confirm_delete().await.unwrap_err();
        assert!(error.to_string().contains("week is locked"));

        // The optimistic removal does not survive the failure.
        assert_eq!(screen.groups().len(), 2);
        assert_eq!(screen.groups()[0].group_key(), "P1:T1");
    }

    #[tokio::test]
    async fn test_cancelled_delete_issues_no_call() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30")]));
        let mut screen = loaded_screen(backend.clone()).await;

        screen.request_delete("P1:T1").unwrap();
        screen.cancel_delete();
        assert!(screen.confirm_delete().await.is_err());
        assert_eq!(backend.calls(), vec!["fetch".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_gate_requires_recorded_minutes() {
        // One group exists and the status allows submission, but zero total
        // minutes keep the gate closed.
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "00:00")]));
        let mut screen = loaded_screen(backend.clone()).await;

        assert!(!screen.submit_allowed());
        let error = screen.submit().await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<TimesheetError>(),
            Some(&TimesheetError::SubmitNothingRecorded)
        );
        assert_eq!(backend.calls(), vec!["fetch".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_gate_respects_status() {
        let mut response = week_response(vec![line("P1", "T1", 6, "08:00")]);
        response.status = HeaderStatus::Submitted;
        let backend = ScriptedBackend::new(response);
        let mut screen = loaded_screen(backend).await;

        assert!(!screen.submit_allowed());
        let error = screen.submit().await.unwrap_err();
        assert_eq!(
            error.downcast_ref::<TimesheetError>(),
            Some(&TimesheetError::SubmitStatusClosed {
                status: HeaderStatus::Submitted
            })
        );
    }

    #[tokio::test]
    async fn test_rejected_week_can_be_resubmitted() {
        let mut response = week_response(vec![line("P1", "T1", 6, "08:00")]);
        response.status = HeaderStatus::Rejected;
        let backend = ScriptedBackend::new(response);
        let screen = loaded_screen(backend).await;

        assert!(screen.submit_allowed());
    }

    #[tokio::test]
    async fn test_submit_status_comes_from_refetch() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "08:00")]));
        let mut screen = loaded_screen(backend.clone()).await;

        screen.submit().await.unwrap();

        // The local status was never set optimistically; the refetch carried
        // the server's transition.
        assert_eq!(backend.calls(), vec!["fetch", "submit", "fetch"]);
        assert_eq!(screen.header().unwrap().status, HeaderStatus::Submitted);
    }

    #[tokio::test]
    async fn test_transfer_success_clears_selection() {
        let backend = ScriptedBackend::new(week_response(vec![
            line("P1", "T1", 6, "02:30"),
            line("P2", "T7", 6, "01:00"),
        ]));
        let mut screen = loaded_screen(backend.clone()).await;

        screen.toggle_selection("P1:T1").unwrap();
        screen.toggle_selection("P2:T7").unwrap();
        screen.transfer_selected(date(13)).await.unwrap();

        assert!(screen.selection().is_empty());
        // The displayed period is unchanged and the moved groups are gone
        // from it after the refetch.
        assert!(screen.groups().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_failure_preserves_selection() {
        let backend = ScriptedBackend::new(week_response(vec![
            line("P1", "T1", 6, "02:30"),
            line("P2", "T7", 6, "01:00"),
        ]));
        backend.responses.borrow_mut().transfer = ApiResponse::failed("target week closed");
        let mut screen = loaded_screen(backend.clone()).await;

        screen.toggle_selection("P1:T1").unwrap();
        screen.toggle_selection("P2:T7").unwrap();
        let error = screen.transfer_selected(date(13)).await.unwrap_err();
        assert!(error.to_string().contains("target week closed"));

        // The user can retry without re-selecting.
        assert_eq!(screen.selection().len(), 2);
        assert_eq!(screen.groups().len(), 2);
    }

    #[tokio::test]
    async fn test_transfer_with_empty_selection_fails_fast() {
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30")]));
        let mut screen = loaded_screen(backend.clone()).await;

        let error = screen.transfer_selected(date(13)).await.unwrap_err();
        assert_eq!(error.downcast_ref::<TimesheetError>(), Some(&TimesheetError::EmptySelection));
        assert_eq!(backend.calls(), vec!["fetch".to_string()]);
    }

    #[tokio::test]
    async fn test_stale_fetch_is_discarded() {
        let backend = ScriptedBackend::new(week_response(vec![]));
        let mut screen = WeekScreen::new(backend);

        let superseded = screen.begin_fetch();
        let current = screen.begin_fetch();
        assert_eq!(screen.fetch_state(), FetchState::Fetching);

        // The older completion loses: latest intent wins.
        let applied = screen.apply_fetch(superseded, week_response(vec![line("P9", "T9", 6, "01:00")])).unwrap();
        assert!(!applied);
        assert!(screen.header().is_err());
        assert_eq!(screen.fetch_state(), FetchState::Fetching);

        let applied = screen.apply_fetch(current, week_response(vec![line("P1", "T1", 6, "01:00")])).unwrap();
        assert!(applied);
        assert_eq!(screen.fetch_state(), FetchState::Idle);
        assert_eq!(screen.groups()[0].group_key(), "P1:T1");
    }

    #[tokio::test]
    async fn test_conflicting_duplicate_pairs_fail_the_fetch() {
        let mut renamed = line("P1", "T1", 7, "01:00");
        renamed.task_title = "Renamed task".to_string();
        let backend = ScriptedBackend::new(week_response(vec![line("P1", "T1", 6, "02:30"), renamed]));
        let mut screen = WeekScreen::new(backend);

        let error = screen.load_week(date(6)).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<TimesheetError>(),
            Some(TimesheetError::DuplicateTaskGroup { .. })
        ));
    }
}
