use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use prettytable::{Cell, Row, Table};

use super::group::TaskGroup;
use super::time::format_minutes;
use super::timesheet::{LeaveEntry, TimesheetHeader};
use super::week::to_display_date;

pub struct View {}

impl View {
    /// Renders the week grid: one row per task group, one column per day,
    /// per-day and per-group totals. Leave days are starred in the header.
    pub fn week(header: &TimesheetHeader, groups: &[TaskGroup], leave_dates: &[LeaveEntry]) -> Result<()> {
        println!(
            "\n{} - week of {} ({})",
            header.employee_name,
            to_display_date(header.period_start),
            header.status
        );

        let days: Vec<NaiveDate> = (0..7).map(|offset| header.period_start + Duration::days(offset)).collect();

        let mut table = Table::new();

        let mut header_row = vec![Cell::new("PROJECT / TASK")];
        for day in &days {
            let leave = leave_dates.iter().any(|entry| entry.date == *day);
            let label = format!("{} {:02}{}", day.weekday(), day.day(), if leave { " *" } else { "" });
            header_row.push(Cell::new(&label));
        }
        header_row.push(Cell::new("TOTAL"));
        table.add_row(Row::new(header_row));

        for group in groups {
            let mut row = vec![Cell::new(&format!("{} / {}", group.project_title, group.task_title))];
            for day in &days {
                row.push(Cell::new(group.hours_for(*day).unwrap_or("00:00")));
            }
            row.push(Cell::new(&group.total_display()));
            table.add_row(Row::new(row));
        }

        let mut totals = vec![Cell::new("TOTAL")];
        let mut week_total = 0u32;
        for day in &days {
            let day_total: u32 = groups
                .iter()
                .map(|group| super::time::sum_minutes(group.hours_for(*day).into_iter()))
                .sum();
            week_total += day_total;
            totals.push(Cell::new(&format_minutes(day_total)));
        }
        totals.push(Cell::new(&format_minutes(week_total)));
        table.add_row(Row::new(totals));

        table.printstd();

        if !leave_dates.is_empty() {
            let names: Vec<String> = leave_dates
                .iter()
                .map(|entry| format!("{} ({})", to_display_date(entry.date), entry.weekday_name))
                .collect();
            println!("* on leave: {}", names.join(", "));
        }

        Ok(())
    }

    /// Renders the task groups as a flat list with keys, for selection.
    pub fn groups(groups: &[TaskGroup]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("KEY"),
            Cell::new("PROJECT"),
            Cell::new("TASK"),
            Cell::new("FILLED DAYS"),
            Cell::new("TOTAL"),
        ]));
        for group in groups {
            table.add_row(Row::new(vec![
                Cell::new(&group.group_key()),
                Cell::new(&group.project_title),
                Cell::new(&group.task_title),
                Cell::new(&group.filled_line_count().to_string()),
                Cell::new(&group.total_display()),
            ]));
        }
        table.printstd();
        Ok(())
    }
}
