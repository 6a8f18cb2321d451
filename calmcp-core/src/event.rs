//! Portable event representation.
//!
//! `Event` is what callers receive: a plain value carrying no store types.
//! It is materialized fresh on every read; the core caches nothing.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::store::NativeEvent;

/// A calendar event, materialized from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Store-assigned identifier; opaque and immutable.
    pub identifier: String,
    pub calendar_name: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub all_day: bool,
}

impl Event {
    /// Convert a store record into the portable representation.
    pub fn from_native(native: &NativeEvent) -> Self {
        Event {
            title: native.title.clone(),
            start_time: native.start_time,
            end_time: native.end_time,
            identifier: native.identifier.clone().unwrap_or_default(),
            calendar_name: native
                .calendar
                .as_ref()
                .map(|calendar| calendar.title.clone())
                .unwrap_or_default(),
            notes: native.notes.clone(),
            location: native.location.clone(),
            url: native.url.clone(),
            all_day: native.all_day,
        }
    }

    /// Event length in minutes (end minus start).
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// One-line rendering: title, time range, calendar.
    pub fn summary_line(&self) -> String {
        if self.all_day {
            format!("{} (all day) [{}]", self.title, self.calendar_name)
        } else {
            format!(
                "{} ({} - {}) [{}]",
                self.title,
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M"),
                self.calendar_name
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CalendarHandle;
    use chrono::NaiveDate;

    fn dt(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 5)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn make_native() -> NativeEvent {
        let mut native = NativeEvent::new("Team Meeting", dt(10, 0), dt(11, 30));
        native.identifier = Some("abc-123".to_string());
        native.calendar = Some(CalendarHandle {
            identifier: "cal-1".to_string(),
            title: "Work".to_string(),
        });
        native
    }

    #[test]
    fn test_from_native_copies_all_fields() {
        let mut native = make_native();
        native.notes = Some("Quarterly planning".to_string());
        native.location = Some("Room A".to_string());

        let event = Event::from_native(&native);
        assert_eq!(event.title, "Team Meeting");
        assert_eq!(event.identifier, "abc-123");
        assert_eq!(event.calendar_name, "Work");
        assert_eq!(event.notes.as_deref(), Some("Quarterly planning"));
        assert_eq!(event.location.as_deref(), Some("Room A"));
        assert!(!event.all_day);
    }

    #[test]
    fn test_duration_is_end_minus_start_in_minutes() {
        let event = Event::from_native(&make_native());
        assert_eq!(event.duration_minutes(), 90);
    }

    #[test]
    fn test_summary_line_shows_time_range_and_calendar() {
        let event = Event::from_native(&make_native());
        assert_eq!(event.summary_line(), "Team Meeting (10:00 - 11:30) [Work]");
    }

    #[test]
    fn test_summary_line_marks_all_day_events() {
        let mut native = make_native();
        native.all_day = true;
        let event = Event::from_native(&native);
        assert_eq!(event.summary_line(), "Team Meeting (all day) [Work]");
    }
}
