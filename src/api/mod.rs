//! API client for the business-operations backend.
//!
//! Every operation is a JSON POST against the backend; the server owns all
//! persistence and state transitions, the client only reads data back and
//! asks for changes. The operations are expressed as the
//! [`TimesheetBackend`] trait so the screen workflow can run against the
//! real HTTP client or a scripted backend in tests.

use anyhow::Result;
use serde::Deserialize;

pub mod timesheet;

pub use timesheet::TimesheetApi;

use timesheet::{
    AddLineRequest, DeleteGroupRequest, FetchTimesheetRequest, FetchTimesheetResponse, SubmitRequest,
};

use crate::libs::transfer::TransferRequest;

/// The success/message envelope every mutating endpoint answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
        }
    }

    /// The server-provided message when present, else a generic fallback.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => fallback,
        }
    }
}

/// The backend operations the timesheet workflow depends on.
#[allow(async_fn_in_trait)]
pub trait TimesheetBackend {
    /// Fetches the week's header, flat line list and leave dates.
    async fn fetch_timesheet(&self, request: &FetchTimesheetRequest) -> Result<FetchTimesheetResponse>;

    /// Adds or updates one line; the tuple (project, task, date) addresses it.
    async fn add_line(&self, request: &AddLineRequest) -> Result<ApiResponse>;

    /// Deletes every line of one project/task pair within the header.
    async fn delete_group(&self, request: &DeleteGroupRequest) -> Result<ApiResponse>;

    /// Submits the week for approval.
    async fn submit(&self, request: &SubmitRequest) -> Result<ApiResponse>;

    /// Moves the named groups' lines to a different week.
    async fn transfer(&self, request: &TransferRequest) -> Result<ApiResponse>;

    /// Precondition query gating whether new lines may be added at all.
    async fn check_add_eligibility(&self) -> Result<ApiResponse>;
}
