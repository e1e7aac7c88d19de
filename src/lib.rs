//! # tsheet - Timesheet client for the ops backend
//!
//! A command-line client for managing weekly timesheets against a remote
//! business-operations backend.
//!
//! ## Features
//!
//! - **Week View**: Fetch a week and render the per-task, per-day hour grid
//! - **Hour Entry**: Validated `HH:MM` editing with description capture
//! - **Task Groups**: Flat backend lines grouped per project/task with totals
//! - **Transfer**: Move selected task groups to a different week in one call
//! - **Submission**: Gated submit of a completed week for approval
//! - **Data Export**: Export the week grid to CSV, JSON, and Excel formats
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tsheet::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
