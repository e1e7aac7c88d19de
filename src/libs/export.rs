//! Week export for external analysis and record keeping.
//!
//! Writes the grouped week (one row per task group, one column per day,
//! plus totals) to CSV, JSON or Excel. The export is a pure projection of
//! the fetched data; nothing here talks to the backend.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::libs::group::TaskGroup;
use crate::libs::messages::Message;
use crate::libs::time::format_minutes;
use crate::libs::timesheet::TimesheetHeader;
use crate::libs::week::to_api_date;
use crate::msg_success;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for spreadsheet tools.
    Csv,
    /// Structured JSON for programmatic processing.
    Json,
    /// Excel workbook with header formatting.
    Excel,
}

/// One exported day cell.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDay {
    pub date: String,
    pub hours: String,
}

/// One exported task group row.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportGroup {
    pub project: String,
    pub task: String,
    pub days: Vec<ExportDay>,
    pub total: String,
}

/// The complete exported week.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeekExport {
    pub employee: String,
    pub period_start: String,
    pub period_end: String,
    pub status: String,
    pub groups: Vec<ExportGroup>,
    pub total: String,
}

impl WeekExport {
    /// Projects the fetched week into export rows. Every group gets a cell
    /// for all seven days; absent entries export as `"00:00"`.
    pub fn build(header: &TimesheetHeader, groups: &[TaskGroup]) -> Self {
        let days: Vec<NaiveDate> = (0..7).map(|offset| header.period_start + Duration::days(offset)).collect();

        let export_groups: Vec<ExportGroup> = groups
            .iter()
            .map(|group| ExportGroup {
                project: group.project_title.clone(),
                task: group.task_title.clone(),
                days: days
                    .iter()
                    .map(|day| ExportDay {
                        date: to_api_date(*day),
                        hours: group.hours_for(*day).unwrap_or("00:00").to_string(),
                    })
                    .collect(),
                total: group.total_display(),
            })
            .collect();

        let total: u32 = groups.iter().map(|group| group.total_minutes).sum();

        WeekExport {
            employee: header.employee_name.clone(),
            period_start: to_api_date(header.period_start),
            period_end: to_api_date(header.period_end),
            status: header.status.to_string(),
            groups: export_groups,
            total: format_minutes(total),
        }
    }
}

/// Export handler: holds the chosen format and output path and writes the
/// projected week in that format.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter, generating a default filename from the period
    /// start when no path is given, e.g. `tsheet_week_2025-01-06.csv`.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>, period_start: NaiveDate) -> Self {
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        };
        let output_path = output_path
            .unwrap_or_else(|| PathBuf::from(format!("tsheet_week_{}.{}", to_api_date(period_start), extension)));

        Self { format, output_path }
    }

    pub fn export(&self, header: &TimesheetHeader, groups: &[TaskGroup]) -> Result<()> {
        let week = WeekExport::build(header, groups);

        match self.format {
            ExportFormat::Csv => self.export_csv(&week)?,
            ExportFormat::Json => self.export_json(&week)?,
            ExportFormat::Excel => self.export_excel(&week)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn export_csv(&self, week: &WeekExport) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;

        let mut header = vec!["Project".to_string(), "Task".to_string()];
        if let Some(first) = week.groups.first() {
            header.extend(first.days.iter().map(|day| day.date.clone()));
        }
        header.push("Total".to_string());
        wtr.write_record(&header)?;

        for group in &week.groups {
            let mut record = vec![group.project.clone(), group.task.clone()];
            record.extend(group.days.iter().map(|day| day.hours.clone()));
            record.push(group.total.clone());
            wtr.write_record(&record)?;
        }

        let day_count = week.groups.first().map(|group| group.days.len()).unwrap_or(0);
        let mut trailer = vec!["Week total".to_string(), String::new()];
        trailer.extend(std::iter::repeat(String::new()).take(day_count));
        trailer.push(week.total.clone());
        wtr.write_record(&trailer)?;

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, week: &WeekExport) -> Result<()> {
        let json = serde_json::to_string_pretty(week)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn export_excel(&self, week: &WeekExport) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        let header_format = Format::new().set_bold().set_background_color(rust_xlsxwriter::Color::Gray);
        let title_format = Format::new().set_bold().set_font_size(14.0);

        worksheet.write_string_with_format(
            0,
            0,
            &format!("{} - week of {} ({})", week.employee, week.period_start, week.status),
            &title_format,
        )?;

        worksheet.write_string_with_format(2, 0, "Project", &header_format)?;
        worksheet.write_string_with_format(2, 1, "Task", &header_format)?;
        let mut col = 2u16;
        if let Some(first) = week.groups.first() {
            for day in &first.days {
                worksheet.write_string_with_format(2, col, &day.date, &header_format)?;
                col += 1;
            }
        }
        worksheet.write_string_with_format(2, col, "Total", &header_format)?;

        let mut row = 3u32;
        for group in &week.groups {
            worksheet.write_string(row, 0, &group.project)?;
            worksheet.write_string(row, 1, &group.task)?;
            let mut col = 2u16;
            for day in &group.days {
                worksheet.write_string(row, col, &day.hours)?;
                col += 1;
            }
            worksheet.write_string(row, col, &group.total)?;
            row += 1;
        }

        row += 1;
        worksheet.write_string(row, 0, "Week total")?;
        worksheet.write_string(row, 1, &week.total)?;

        worksheet.autofit();
        workbook.save(&self.output_path)?;
        Ok(())
    }
}
