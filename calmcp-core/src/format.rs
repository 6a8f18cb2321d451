//! Deterministic text rendering of event lists.

use std::collections::BTreeMap;

use crate::event::Event;

const NOTES_EXCERPT_MAX_CHARS: usize = 100;

/// Render events grouped by start date, with per-day and grand totals.
///
/// Output is byte-identical across runs for the same input sequence: dates
/// ascend in ISO order, and events within a day sort by start time with a
/// stable sort, so equal starts keep their input order.
pub fn format_event_list(events: &[Event]) -> String {
    let mut events_by_date: BTreeMap<String, Vec<&Event>> = BTreeMap::new();
    for event in events {
        events_by_date
            .entry(event.start_time.format("%Y-%m-%d").to_string())
            .or_default()
            .push(event);
    }

    let mut lines = Vec::new();
    let mut total_minutes = 0;

    for (date, day_events) in &mut events_by_date {
        day_events.sort_by_key(|event| event.start_time);

        lines.push(format!("\n{date}:"));
        let mut day_minutes = 0;
        for event in day_events.iter() {
            lines.push(format!("  {}", event.summary_line()));
            if let Some(notes) = event.notes.as_deref().filter(|notes| !notes.is_empty()) {
                lines.push(format!("    Notes: {}", excerpt(notes)));
            }
            day_minutes += event.duration_minutes();
        }
        total_minutes += day_minutes;
        lines.push(format!(
            "  Daily total: {} minutes ({:.1} hours)",
            day_minutes,
            day_minutes as f64 / 60.0
        ));
    }

    lines.push(format!(
        "\nTotal time: {} minutes ({:.1} hours)",
        total_minutes,
        total_minutes as f64 / 60.0
    ));

    lines.join("\n")
}

/// First `NOTES_EXCERPT_MAX_CHARS` characters, with a marker when truncated.
fn excerpt(notes: &str) -> String {
    if notes.chars().count() > NOTES_EXCERPT_MAX_CHARS {
        let head: String = notes.chars().take(NOTES_EXCERPT_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        notes.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn dt(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn make_event(title: &str, start: NaiveDateTime, end: NaiveDateTime, calendar: &str) -> Event {
        Event {
            title: title.to_string(),
            start_time: start,
            end_time: end,
            identifier: format!("{title}-id"),
            calendar_name: calendar.to_string(),
            notes: None,
            location: None,
            url: None,
            all_day: false,
        }
    }

    #[test]
    fn test_groups_by_date_and_sorts_by_start_time() {
        // Deliberately out of order: the formatter owns the ordering.
        let events = vec![
            make_event("Lunch", dt(5, 12, 0), dt(5, 13, 0), "Personal"),
            make_event("Meeting", dt(5, 10, 0), dt(5, 11, 0), "Work"),
        ];

        let output = format_event_list(&events);
        assert!(output.contains("2025-11-05:"));
        assert!(output.find("Meeting").unwrap() < output.find("Lunch").unwrap());
        assert!(output.contains("Daily total: 120 minutes (2.0 hours)"));
        assert!(output.contains("Total time: 120 minutes (2.0 hours)"));
    }

    #[test]
    fn test_exact_output_for_single_event() {
        let events = vec![make_event("Meeting", dt(5, 10, 0), dt(5, 11, 0), "Work")];
        let expected = "\n2025-11-05:\n  Meeting (10:00 - 11:00) [Work]\n  Daily total: 60 minutes (1.0 hours)\n\nTotal time: 60 minutes (1.0 hours)";
        assert_eq!(format_event_list(&events), expected);
    }

    #[test]
    fn test_dates_ascend_and_grand_total_sums_days() {
        let events = vec![
            make_event("Later", dt(6, 9, 0), dt(6, 10, 30), "Work"),
            make_event("Earlier", dt(5, 9, 0), dt(5, 10, 0), "Work"),
        ];

        let output = format_event_list(&events);
        assert!(output.find("2025-11-05:").unwrap() < output.find("2025-11-06:").unwrap());
        assert!(output.contains("Daily total: 60 minutes (1.0 hours)"));
        assert!(output.contains("Daily total: 90 minutes (1.5 hours)"));
        assert!(output.contains("Total time: 150 minutes (2.5 hours)"));
    }

    #[test]
    fn test_output_is_byte_identical_across_runs() {
        let events = vec![
            make_event("Lunch", dt(5, 12, 0), dt(5, 13, 0), "Personal"),
            make_event("Meeting", dt(5, 10, 0), dt(5, 11, 0), "Work"),
            make_event("Review", dt(6, 9, 0), dt(6, 9, 30), "Work"),
        ];
        assert_eq!(format_event_list(&events), format_event_list(&events));
    }

    #[test]
    fn test_notes_rendered_indented() {
        let mut event = make_event("Meeting", dt(5, 10, 0), dt(5, 11, 0), "Work");
        event.notes = Some("Bring the roadmap".to_string());

        let output = format_event_list(&[event]);
        assert!(output.contains("    Notes: Bring the roadmap"));
    }

    #[test]
    fn test_long_notes_truncate_at_100_chars() {
        let mut event = make_event("Meeting", dt(5, 10, 0), dt(5, 11, 0), "Work");
        event.notes = Some("x".repeat(150));

        let output = format_event_list(&[event]);
        let expected_excerpt = format!("    Notes: {}...", "x".repeat(100));
        assert!(output.contains(&expected_excerpt));
        assert!(!output.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_empty_notes_render_no_line() {
        let mut event = make_event("Meeting", dt(5, 10, 0), dt(5, 11, 0), "Work");
        event.notes = Some(String::new());

        let output = format_event_list(&[event]);
        assert!(!output.contains("Notes:"));
    }
}
