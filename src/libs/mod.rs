//! Core library modules for the tsheet client.
//!
//! Everything the commands need lives here: the time/date value layer, the
//! grouping and editing logic, the week-screen workflow, configuration and
//! the presentation helpers.

pub mod config;
pub mod data_storage;
pub mod edit;
pub mod error;
pub mod export;
pub mod group;
pub mod messages;
pub mod screen;
pub mod time;
pub mod timesheet;
pub mod transfer;
pub mod view;
pub mod week;
