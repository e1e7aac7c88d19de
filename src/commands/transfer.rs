use anyhow::Result;
use clap::Args;

use super::{load_screen, week_start_arg};
use crate::libs::messages::Message;
use crate::libs::week::{monday_of_week, parse_date, to_display_date};
use crate::{msg_error_anyhow, msg_success};

#[derive(Debug, Args)]
pub struct TransferArgs {
    #[arg(required = true, help = "Task selectors as project:task")]
    groups: Vec<String>,

    #[arg(long, help = "Any date inside the source week (defaults to today)")]
    from: Option<String>,

    #[arg(long, help = "Any date inside the target week")]
    to: String,
}

pub async fn cmd(transfer_args: TransferArgs) -> Result<()> {
    let source_monday = week_start_arg(&transfer_args.from)?;
    let target_monday = monday_of_week(
        parse_date(&transfer_args.to)
            .ok_or_else(|| msg_error_anyhow!(Message::InvalidDate(transfer_args.to.clone())))?,
    );

    let mut screen = load_screen(source_monday).await?;

    for selector in &transfer_args.groups {
        if selector.split_once(':').is_none() {
            return Err(msg_error_anyhow!(Message::InvalidSelector(selector.clone())));
        }
        screen.toggle_selection(selector)?;
    }

    screen.transfer_selected(target_monday).await?;
    msg_success!(Message::TransferCompleted(to_display_date(target_monday)));

    Ok(())
}
