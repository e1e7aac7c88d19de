use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{ApiResponse, TimesheetBackend};
use crate::libs::config::ServerConfig;
use crate::libs::messages::Message;
use crate::libs::timesheet::{HeaderStatus, LeaveEntry, TimesheetHeader, TimesheetLine};
use crate::libs::transfer::TransferRequest;
use crate::{msg_debug, msg_error_anyhow};

const FETCH_TIMESHEET_URL: &str = "timesheet/manage";
const ADD_LINE_URL: &str = "timesheet/line/add";
const DELETE_GROUP_URL: &str = "timesheet/line/delete";
const SUBMIT_URL: &str = "timesheet/submit";
const TRANSFER_URL: &str = "timesheet/transfer";
const ELIGIBILITY_URL: &str = "timesheet/line/eligibility";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTimesheetRequest {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTimesheetResponse {
    pub header_id: String,
    pub employee_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: HeaderStatus,
    #[serde(default)]
    pub total_minutes: u32,
    #[serde(default)]
    pub lines: Vec<TimesheetLine>,
    #[serde(default)]
    pub leave_dates: Vec<LeaveEntry>,
}

impl FetchTimesheetResponse {
    pub fn header(&self) -> TimesheetHeader {
        TimesheetHeader {
            header_id: self.header_id.clone(),
            employee_name: self.employee_name.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            status: self.status,
            total_minutes: self.total_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub header_id: String,
    pub project_id: String,
    pub task_id: String,
    pub date: NaiveDate,
    pub hours: String,
    pub remark: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGroupRequest {
    pub header_id: String,
    pub project_id: String,
    pub task_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub header_id: String,
}

/// HTTP client for the timesheet endpoints.
///
/// Carries the configured base URL and bearer token; every call is a JSON
/// POST and deserializes straight into the typed response.
pub struct TimesheetApi {
    client: Client,
    config: ServerConfig,
}

impl TimesheetApi {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    async fn post<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), path);
        msg_debug!(format!("POST {}", url));

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.auth_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(msg_error_anyhow!(Message::ApiRequestFailed(status.to_string())));
        }

        Ok(response.json::<R>().await?)
    }
}

impl TimesheetBackend for TimesheetApi {
    async fn fetch_timesheet(&self, request: &FetchTimesheetRequest) -> Result<FetchTimesheetResponse> {
        self.post(FETCH_TIMESHEET_URL, request).await
    }

    async fn add_line(&self, request: &AddLineRequest) -> Result<ApiResponse> {
        self.post(ADD_LINE_URL, request).await
    }

    async fn delete_group(&self, request: &DeleteGroupRequest) -> Result<ApiResponse> {
        self.post(DELETE_GROUP_URL, request).await
    }

    async fn submit(&self, request: &SubmitRequest) -> Result<ApiResponse> {
        self.post(SUBMIT_URL, request).await
    }

    async fn transfer(&self, request: &TransferRequest) -> Result<ApiResponse> {
        self.post(TRANSFER_URL, request).await
    }

    async fn check_add_eligibility(&self) -> Result<ApiResponse> {
        self.post(ELIGIBILITY_URL, &serde_json::json!({})).await
    }
}
