//! Day command: the wide layout of one day.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use hl_core::{ColumnMode, DayColumn, LayoutItem, layout_column};

use super::util::{describe_tag, format_clock, format_duration};
use crate::view::ViewContext;

pub fn run<W: Write, Tz: TimeZone>(writer: &mut W, view: &ViewContext<Tz>, json: bool) -> Result<()> {
    let column = layout_column(
        &view.events,
        &view.subject,
        &view.window(),
        ColumnMode::Wide,
        &view.timeline,
        view.now,
    );

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&column)?)?;
        return Ok(());
    }

    writeln!(writer, "{} ({}), subject {}", column.date, view.zone_name, view.subject)?;
    write_column(writer, &column)
}

/// Writes the body of one column, indented under its header.
pub fn write_column<W: Write>(writer: &mut W, column: &DayColumn) -> Result<()> {
    if column.items.is_empty() {
        writeln!(writer, "  No events.")?;
    }
    for item in &column.items {
        writeln!(writer, "  {}", format_item(item, column.mode))?;
    }
    if let Some(minute) = column.now_minute {
        writeln!(writer, "  {}  now", format_clock(minute))?;
    }
    for ghost in &column.ghosts {
        match ghost.predicted_magnitude {
            Some(magnitude) => writeln!(
                writer,
                "  {}  predicted feed, ~{magnitude:.0} ml",
                format_clock(ghost.time_minute)
            )?,
            None => writeln!(writer, "  {}  predicted feed", format_clock(ghost.time_minute))?,
        }
    }
    writeln!(writer, "  Feed total: {} ml", column.feed_total)?;
    Ok(())
}

fn format_item(item: &LayoutItem, mode: ColumnMode) -> String {
    let description = describe_tag(&item.tag);
    if item.is_background() {
        let range = format!(
            "{}-{}",
            format_clock(item.start_minute),
            format_clock(item.start_minute + item.visible_minutes)
        );
        let duration = format_duration(item.visible_minutes);
        return match mode {
            ColumnMode::Wide => format!(
                "{range}  {description}  {duration}, label at {:.0}%",
                item.label_anchor_percent
            ),
            ColumnMode::Narrow => format!("{range}  {description}  {duration}"),
        };
    }

    let start = format_clock(item.start_minute);
    match mode {
        ColumnMode::Wide => format!(
            "{start}  {description}  width {:.0}%, offset {:.0}%",
            item.column_fraction, item.column_offset
        ),
        ColumnMode::Narrow => format!("{start}  {description}  lane {}", item.lane),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, Utc};
    use hl_core::{SubjectId, TimelineConfig};
    use insta::assert_snapshot;

    fn view(events: &str, now: &str) -> ViewContext<Utc> {
        ViewContext {
            events: crate::input::parse_events(events).unwrap(),
            subject: SubjectId::new("baby").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            now: now.parse().unwrap(),
            tz: Utc,
            zone_name: "UTC".to_string(),
            timeline: TimelineConfig::default(),
        }
    }

    const EVENTS: &str = r#"[
        {"id":"s1","subject":"baby","start":"2025-03-10T00:30:00Z","end":"2025-03-10T02:00:00Z","type":"sleep"},
        {"id":"f1","subject":"baby","start":"2025-03-10T01:00:00Z","type":"feed","magnitude":120},
        {"id":"d1","subject":"baby","start":"2025-03-10T01:05:00Z","type":"diaper","detail":"pee"}
    ]"#;

    #[test]
    fn day_command_outputs_wide_layout() {
        let mut output = Vec::new();
        run(&mut output, &view(EVENTS, "2025-03-10T03:00:00Z"), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        2025-03-10 (UTC), subject baby
          00:30-02:00  sleep  1h 30m, label at 83%
          01:00  feed 120 ml  width 50%, offset 0%
          01:05  diaper pee  width 50%, offset 50%
          03:00  now
          04:00  predicted feed
          Feed total: 120 ml
        ");
    }

    #[test]
    fn day_command_reports_empty_day() {
        let mut output = Vec::new();
        run(&mut output, &view("[]", "2025-03-12T03:00:00Z"), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        2025-03-10 (UTC), subject baby
          No events.
          Feed total: 0 ml
        ");
    }

    #[test]
    fn day_command_json_is_the_column() {
        let mut output = Vec::new();
        run(&mut output, &view(EVENTS, "2025-03-10T03:00:00Z"), true).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["mode"], "wide");
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["items"][0]["event_id"], "s1");
        assert_eq!(json["items"][0]["tag"]["type"], "sleep");
        assert_eq!(json["ghosts"][0]["time_minute"], 240);
        assert_eq!(json["now_minute"], 180);
    }

    #[test]
    fn other_subjects_are_ignored() {
        let mut view = view(EVENTS, "2025-03-10T03:00:00Z");
        view.subject = SubjectId::new("sibling").unwrap();

        let mut output = Vec::new();
        run(&mut output, &view, false).unwrap();
        assert!(String::from_utf8(output).unwrap().contains("No events."));
    }
}
