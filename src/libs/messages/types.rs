#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigServerMissing,

    // === TIMESHEET MESSAGES ===
    LineSaved(String),      // "project:task on date"
    LineSaveFailed(String), // reason
    GroupDeleted(String),
    GroupDeleteFailed(String),
    ConfirmDeleteGroup(String),
    DeleteCancelled,
    TimesheetSubmitted,
    SubmitFailed(String),
    TransferCompleted(String), // target week
    TransferFailed(String),
    EligibilityDenied(String),
    RefreshFailed(String),

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path

    // === API MESSAGES ===
    ApiRequestFailed(String), // status

    // === INPUT MESSAGES ===
    InvalidDate(String),
    InvalidSelector(String),
}
