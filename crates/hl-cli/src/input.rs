//! Reading event files exported by the persistence layer.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use hl_core::Event;

/// Loads events from a JSON array or JSON Lines file.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_events(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses event file contents.
///
/// Records that fail to parse are skipped with a warning so that one bad
/// entry does not hide the rest of the log.
pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    if content.trim_start().starts_with('[') {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(content).context("invalid JSON array")?;
        Ok(records
            .into_iter()
            .enumerate()
            .filter_map(|(idx, record)| match serde_json::from_value::<Event>(record) {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::warn!(index = idx, error = %err, "skipping invalid event");
                    None
                }
            })
            .collect())
    } else {
        parse_lines(content.as_bytes())
    }
}

fn parse_lines<R: BufRead>(reader: R) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Event>(trimmed) {
            Ok(event) => events.push(event),
            Err(err) => tracing::warn!(line = idx + 1, error = %err, "skipping invalid event"),
        }
    }
    Ok(events)
}
