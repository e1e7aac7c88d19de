use anyhow::Result;
use clap::Args;

use super::{load_screen, week_start_arg};
use crate::libs::messages::Message;
use crate::msg_success;

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long, help = "Any date inside the week to submit (defaults to today)")]
    date: Option<String>,
}

pub async fn cmd(submit_args: SubmitArgs) -> Result<()> {
    let monday = week_start_arg(&submit_args.date)?;
    let mut screen = load_screen(monday).await?;

    screen.submit().await?;

    msg_success!(Message::TimesheetSubmitted);
    println!("Status: {}", screen.header()?.status);

    Ok(())
}
