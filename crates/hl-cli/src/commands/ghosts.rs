//! Ghosts command: predicted feeds for one day.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::{NaiveDate, TimeZone};
use hl_core::{Ghost, GhostConfig, GhostMode, generate_ghosts};
use serde::Serialize;

use super::util::format_clock;
use crate::view::ViewContext;

/// Command-line overrides of the configured ghost settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub mode: Option<GhostMode>,
    pub interval_hours: Option<f64>,
}

#[derive(Serialize)]
struct GhostsOutput<'a> {
    date: NaiveDate,
    mode: GhostMode,
    ghosts: &'a [Ghost],
}

pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    view: &ViewContext<Tz>,
    overrides: Overrides,
    json: bool,
) -> Result<()> {
    let config = apply_overrides(&view.timeline.ghost, overrides)?;
    let ghosts = generate_ghosts(&view.events, &view.subject, &view.window(), &config, view.now);

    if json {
        let output = GhostsOutput {
            date: view.date,
            mode: config.mode,
            ghosts: &ghosts,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Predicted feeds for {} ({}), subject {}",
        view.date, view.zone_name, view.subject
    )?;
    writeln!(writer, "Mode: {}", mode_name(config.mode))?;
    if !config.show_ghost {
        writeln!(writer, "Predictions are disabled.")?;
        return Ok(());
    }
    if ghosts.is_empty() {
        writeln!(writer, "No predictions.")?;
        return Ok(());
    }

    for ghost in &ghosts {
        writeln!(writer, "{}", format_ghost(ghost))?;
    }
    Ok(())
}

fn format_ghost(ghost: &Ghost) -> String {
    let mut parts = vec![format!("- {}", format_clock(ghost.time_minute))];
    if let Some(ordinal) = ghost.ordinal {
        parts.push(format!("feed #{}", ordinal + 1));
    }
    if let Some(magnitude) = ghost.predicted_magnitude {
        parts.push(format!("~{magnitude:.0} ml"));
    }
    parts.join("  ")
}

fn apply_overrides(config: &GhostConfig, overrides: Overrides) -> Result<GhostConfig> {
    let mut config = config.clone();
    if let Some(mode) = overrides.mode {
        config.mode = mode;
    }
    if let Some(hours) = overrides.interval_hours {
        if !hours.is_finite() || hours <= 0.0 {
            bail!("Invalid interval: {hours}. Use a positive number of hours");
        }
        config.fixed_interval_hours = hours;
    }
    Ok(config)
}

const fn mode_name(mode: GhostMode) -> &'static str {
    match mode {
        GhostMode::NextOccurrence => "next-occurrence",
        GhostMode::HistoricalAverage => "historical-average",
    }
}
