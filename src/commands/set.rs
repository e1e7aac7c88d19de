use anyhow::Result;
use clap::Args;

use super::load_screen;
use crate::libs::edit::{normalize_keystrokes, DayEdit};
use crate::libs::messages::Message;
use crate::libs::time::{parse_clamped, MinutePolicy, TimeValue};
use crate::libs::view::View;
use crate::libs::week::{monday_of_week, parse_date, to_display_date};
use crate::{msg_error_anyhow, msg_success};

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(help = "Project identifier")]
    project: String,

    #[arg(help = "Task identifier")]
    task: String,

    #[arg(help = "Day to set, dd-MMM-yyyy or yyyy-mm-dd")]
    date: String,

    #[arg(help = "Hours as HH:MM (loose input is normalized)")]
    hours: String,

    #[arg(short, long, help = "Description for the entry (required to save)")]
    description: String,
}

pub async fn cmd(set_args: SetArgs) -> Result<()> {
    let date = parse_date(&set_args.date)
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(set_args.date.clone())))?;

    let mut screen = load_screen(monday_of_week(date)).await?;

    // Run the raw argument through the same normalization and clamping the
    // interactive edit surface applies on blur.
    let hours = parse_clamped(&normalize_keystrokes(&set_args.hours), MinutePolicy::Cap60)
        .unwrap_or(TimeValue::default())
        .display();

    let edit = DayEdit {
        project_id: set_args.project.clone(),
        task_id: set_args.task.clone(),
        date,
        hours,
        description: set_args.description,
    };
    screen.save_line(&edit).await?;

    msg_success!(Message::LineSaved(format!(
        "{}:{} on {}",
        set_args.project,
        set_args.task,
        to_display_date(date)
    )));
    View::week(screen.header()?, screen.groups(), screen.leave_dates())?;

    Ok(())
}
