pub mod delete;
pub mod export;
pub mod init;
pub mod set;
pub mod submit;
pub mod transfer;
pub mod view;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::api::TimesheetApi;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::screen::WeekScreen;
use crate::libs::week;
use crate::msg_error_anyhow;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Show a week's timesheet")]
    View(view::ViewArgs),
    #[command(about = "Set one day's hours for a project/task")]
    Set(set::SetArgs),
    #[command(about = "Delete a task group's entries for the week")]
    Delete(delete::DeleteArgs),
    #[command(about = "Submit the week for approval")]
    Submit(submit::SubmitArgs),
    #[command(about = "Transfer task groups to another week")]
    Transfer(transfer::TransferArgs),
    #[command(about = "Export the week grid to a file")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::View(args) => view::cmd(args).await,
            Commands::Set(args) => set::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Submit(args) => submit::cmd(args).await,
            Commands::Transfer(args) => transfer::cmd(args).await,
            Commands::Export(args) => export::cmd(args).await,
        }
    }
}

/// Resolves an optional date argument to the Monday of its week; today's
/// week when absent.
pub(crate) fn week_start_arg(date: &Option<String>) -> Result<NaiveDate> {
    let day = match date {
        Some(text) => week::parse_date(text).ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(text.clone())))?,
        None => Local::now().date_naive(),
    };
    Ok(week::monday_of_week(day))
}

/// Builds a week screen against the configured backend and loads the week
/// starting at `monday`.
pub(crate) async fn load_screen(monday: NaiveDate) -> Result<WeekScreen<TimesheetApi>> {
    let config = Config::read()?;
    let mut screen = WeekScreen::new(TimesheetApi::new(config.server()?));
    screen.load_week(monday).await?;
    Ok(screen)
}
