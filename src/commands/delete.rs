use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::{load_screen, week_start_arg};
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    #[arg(help = "Task selector as project:task")]
    group: String,

    #[arg(long, help = "Any date inside the week (defaults to today)")]
    date: Option<String>,

    #[arg(long, help = "Skip the confirmation prompt")]
    yes: bool,
}

pub async fn cmd(delete_args: DeleteArgs) -> Result<()> {
    let monday = week_start_arg(&delete_args.date)?;
    let mut screen = load_screen(monday).await?;

    let title = {
        let group = screen.request_delete(&delete_args.group)?;
        format!("{} / {}", group.project_title, group.task_title)
    };

    if !delete_args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteGroup(title).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            screen.cancel_delete();
            msg_info!(Message::DeleteCancelled);
            return Ok(());
        }
    }

    screen.confirm_delete().await?;
    msg_success!(Message::GroupDeleted(delete_args.group));

    Ok(())
}
