use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{load_screen, week_start_arg};
use crate::libs::export::{ExportFormat, Exporter};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format for the exported week
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Custom output file path; a name derived from the week is used when
    /// absent
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Any date inside the week to export (defaults to today)
    #[arg(long)]
    date: Option<String>,
}

pub async fn cmd(export_args: ExportArgs) -> Result<()> {
    let monday = week_start_arg(&export_args.date)?;
    let screen = load_screen(monday).await?;

    let exporter = Exporter::new(export_args.format, export_args.output, monday);
    exporter.export(screen.header()?, screen.groups())?;

    Ok(())
}
