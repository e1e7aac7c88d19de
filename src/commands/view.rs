use anyhow::Result;
use clap::Args;

use super::{load_screen, week_start_arg};
use crate::libs::view::View;

#[derive(Debug, Args)]
pub struct ViewArgs {
    #[arg(long, help = "Any date inside the week to show (defaults to today)")]
    date: Option<String>,

    #[arg(long, help = "List task groups with their selection keys instead of the grid")]
    groups: bool,
}

pub async fn cmd(view_args: ViewArgs) -> Result<()> {
    let monday = week_start_arg(&view_args.date)?;
    let screen = load_screen(monday).await?;

    if view_args.groups {
        View::groups(screen.groups())?;
    } else {
        View::week(screen.header()?, screen.groups(), screen.leave_dates())?;
    }

    Ok(())
}
