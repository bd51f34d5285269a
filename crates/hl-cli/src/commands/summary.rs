//! Summary command: daily totals.

use std::io::Write;

use anyhow::Result;
use chrono::TimeZone;
use hl_core::summarize_day;

use super::util::format_duration;
use crate::view::ViewContext;

pub fn run<W: Write, Tz: TimeZone>(writer: &mut W, view: &ViewContext<Tz>, json: bool) -> Result<()> {
    let summary = summarize_day(&view.events, &view.subject, &view.window(), view.now);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    writeln!(
        writer,
        "Summary for {} ({}), subject {}",
        summary.date, view.zone_name, view.subject
    )?;
    writeln!(writer, "Sleep:  {}", format_duration(summary.sleep_minutes))?;
    writeln!(writer, "Awake:  {}", format_duration(summary.awake_minutes))?;
    writeln!(
        writer,
        "Feeds:  {} ({} ml)",
        summary.feed_count, summary.feed_total
    )?;
    writeln!(
        writer,
        "Diapers: {} pee, {} poop, {} unknown",
        summary.pee_count, summary.poop_count, summary.unknown_diaper_count
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, Utc};
    use hl_core::{SubjectId, TimelineConfig};
    use insta::assert_snapshot;

    const EVENTS: &str = r#"[
        {"id":"s1","subject":"baby","start":"2025-03-10T01:00:00Z","end":"2025-03-10T04:30:00Z","type":"sleep"},
        {"id":"s2","subject":"baby","start":"2025-03-10T20:00:00Z","type":"sleep"},
        {"id":"f1","subject":"baby","start":"2025-03-10T05:00:00Z","type":"feed","magnitude":120},
        {"id":"f2","subject":"baby","start":"2025-03-10T09:00:00Z","type":"feed","amount":80.5},
        {"id":"d1","subject":"baby","start":"2025-03-10T05:10:00Z","type":"diaper","detail":"both"},
        {"id":"d2","subject":"baby","start":"2025-03-10T09:10:00Z","type":"diaper","note":"{\"type\":\"pee\"}"},
        {"id":"d3","subject":"baby","start":"2025-03-10T12:00:00Z","type":"diaper"}
    ]"#;

    fn view() -> ViewContext<Utc> {
        ViewContext {
            events: crate::input::parse_events(EVENTS).unwrap(),
            subject: SubjectId::new("baby").unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            now: "2025-03-10T21:00:00Z".parse().unwrap(),
            tz: Utc,
            zone_name: "UTC".to_string(),
            timeline: TimelineConfig::default(),
        }
    }

    #[test]
    fn summary_command_outputs_totals() {
        let mut output = Vec::new();
        run(&mut output, &view(), false).unwrap();

        // 3h 30m finished sleep plus 1h of the ongoing one
        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        Summary for 2025-03-10 (UTC), subject baby
        Sleep:  4h 30m
        Awake:  19h 30m
        Feeds:  2 (200.5 ml)
        Diapers: 2 pee, 1 poop, 1 unknown
        ");
    }

    #[test]
    fn summary_command_json() {
        let mut output = Vec::new();
        run(&mut output, &view(), true).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["date"], "2025-03-10");
        assert_eq!(json["sleep_minutes"], 270);
        assert_eq!(json["feed_count"], 2);
    }
}
