//! In-memory event store.
//!
//! Implements the same narrow contract an OS-backed store would, so the rest
//! of the crate can be exercised without one. Backs the server binary and the
//! test suites.

use std::sync::Mutex;

use uuid::Uuid;

use chrono::NaiveDateTime;

use super::{AccessCompletion, CalendarHandle, EntityKind, EventStore, NativeEvent, Span};

/// How the store answers access requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Grant,
    Deny,
    /// Hold the completion without ever invoking it.
    NoResponse,
}

pub struct MemoryEventStore {
    access_mode: AccessMode,
    inner: Mutex<StoreState>,
}

struct StoreState {
    calendars: Vec<CalendarHandle>,
    events: Vec<NativeEvent>,
    pending_completions: Vec<AccessCompletion>,
}

impl MemoryEventStore {
    /// A granting store with the given calendar titles. The first title is
    /// the default calendar for new events; at least one is required.
    pub fn with_calendars(titles: &[&str]) -> Self {
        Self::with_access_mode(titles, AccessMode::Grant)
    }

    pub fn with_access_mode(titles: &[&str], access_mode: AccessMode) -> Self {
        assert!(
            !titles.is_empty(),
            "MemoryEventStore needs at least one calendar"
        );
        let calendars = titles
            .iter()
            .map(|title| CalendarHandle {
                identifier: Uuid::new_v4().to_string(),
                title: (*title).to_string(),
            })
            .collect();

        MemoryEventStore {
            access_mode,
            inner: Mutex::new(StoreState {
                calendars,
                events: Vec::new(),
                pending_completions: Vec::new(),
            }),
        }
    }

    /// Number of access completions held unanswered (`NoResponse` mode).
    pub fn pending_access_requests(&self) -> usize {
        self.inner.lock().unwrap().pending_completions.len()
    }
}

impl EventStore for MemoryEventStore {
    fn request_access(&self, _kind: EntityKind, completion: AccessCompletion) {
        match self.access_mode {
            AccessMode::Grant => completion(true, None),
            AccessMode::Deny => completion(false, Some("access denied by user".to_string())),
            AccessMode::NoResponse => {
                self.inner.lock().unwrap().pending_completions.push(completion);
            }
        }
    }

    fn calendars(&self) -> Vec<CalendarHandle> {
        self.inner.lock().unwrap().calendars.clone()
    }

    fn default_calendar_for_new_events(&self) -> CalendarHandle {
        self.inner.lock().unwrap().calendars[0].clone()
    }

    fn query_events(
        &self,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        calendars: Option<&[CalendarHandle]>,
    ) -> Vec<NativeEvent> {
        let state = self.inner.lock().unwrap();
        state
            .events
            .iter()
            .filter(|event| event.start_time <= end_time && event.end_time >= start_time)
            .filter(|event| match calendars {
                Some(wanted) => event
                    .calendar
                    .as_ref()
                    .is_some_and(|c| wanted.iter().any(|w| w.identifier == c.identifier)),
                None => true,
            })
            .cloned()
            .collect()
    }

    fn event_with_identifier(&self, identifier: &str) -> Option<NativeEvent> {
        let state = self.inner.lock().unwrap();
        state
            .events
            .iter()
            .find(|event| event.identifier.as_deref() == Some(identifier))
            .cloned()
    }

    fn save_event(&self, mut event: NativeEvent, _span: Span) -> Result<NativeEvent, String> {
        let mut state = self.inner.lock().unwrap();

        if event.calendar.is_none() {
            return Err("event has no calendar".to_string());
        }

        match event.identifier.clone() {
            Some(id) => {
                let slot = state
                    .events
                    .iter_mut()
                    .find(|stored| stored.identifier.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| format!("no stored event with identifier {id}"))?;
                *slot = event.clone();
            }
            None => {
                event.identifier = Some(Uuid::new_v4().to_string());
                state.events.push(event.clone());
            }
        }

        Ok(event)
    }

    fn remove_event(&self, event: NativeEvent, _span: Span) -> Result<(), String> {
        let mut state = self.inner.lock().unwrap();

        let Some(id) = event.identifier else {
            return Err("event has no identifier".to_string());
        };

        let before = state.events.len();
        state
            .events
            .retain(|stored| stored.identifier.as_deref() != Some(id.as_str()));
        if state.events.len() == before {
            return Err(format!("no stored event with identifier {id}"));
        }
        Ok(())
    }
}
