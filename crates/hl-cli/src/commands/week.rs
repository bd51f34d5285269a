//! Week command: seven columns with the selected day drawn wide.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use hl_core::{ColumnMode, layout_week};

use super::day::write_column;
use crate::view::ViewContext;

pub fn run<W: Write, Tz: TimeZone>(writer: &mut W, view: &ViewContext<Tz>, json: bool) -> Result<()> {
    let week = layout_week(
        &view.events,
        &view.subject,
        view.date,
        &view.tz,
        &view.timeline,
        view.now,
    );

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&week)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Week of {} ({}), subject {}",
        week.week_start, view.zone_name, view.subject
    )?;
    for column in &week.columns {
        let marker = match column.mode {
            ColumnMode::Wide => " (selected)",
            ColumnMode::Narrow => "",
        };
        writeln!(writer, "{} {}{marker}", column.date.format("%a"), column.date)?;
        write_column(writer, column)?;
    }
    Ok(())
}
