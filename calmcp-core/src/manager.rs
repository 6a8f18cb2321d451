//! Calendar operations against the store.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tracing::{debug, error, info};

use crate::alarm::to_native_alarms;
use crate::directory::CalendarDirectory;
use crate::error::{CalendarError, CalendarResult};
use crate::event::Event;
use crate::permission::{self, DEFAULT_ACCESS_TIMEOUT};
use crate::request::{CreateEventRequest, UpdateEventRequest};
use crate::store::{EntityKind, EventStore, NativeEvent, Span};

/// CRUD surface over the store's events.
///
/// `connect` requests calendar access before returning, so no operation
/// exists on an instance whose access was not granted.
pub struct CalendarManager {
    store: Arc<dyn EventStore>,
    directory: CalendarDirectory,
}

impl std::fmt::Debug for CalendarManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarManager").finish_non_exhaustive()
    }
}

impl CalendarManager {
    /// Connect with the default permission wait.
    pub fn connect(store: Arc<dyn EventStore>) -> CalendarResult<Self> {
        Self::connect_with_timeout(store, DEFAULT_ACCESS_TIMEOUT)
    }

    /// Connect, waiting at most `timeout` for the store's access decision.
    pub fn connect_with_timeout(
        store: Arc<dyn EventStore>,
        timeout: Duration,
    ) -> CalendarResult<Self> {
        permission::request_access(store.as_ref(), EntityKind::Event, timeout)?;
        let directory = CalendarDirectory::new(store.clone());
        Ok(CalendarManager { store, directory })
    }

    pub fn directory(&self) -> &CalendarDirectory {
        &self.directory
    }

    /// Display titles of all calendars.
    pub fn list_calendar_names(&self) -> Vec<String> {
        self.directory.list_names()
    }

    /// Events whose interval intersects `[start_time, end_time]`, optionally
    /// restricted to one calendar by name. Ordering is left to the caller.
    pub fn list_events(
        &self,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        calendar_name: Option<&str>,
    ) -> CalendarResult<Vec<Event>> {
        let calendar = match calendar_name {
            Some(name) => Some(
                self.directory
                    .find_by_name(name)
                    .ok_or_else(|| CalendarError::NoSuchCalendar(name.to_string()))?,
            ),
            None => None,
        };

        info!(
            "Listing events between {start_time} - {end_time}, searching in: {}",
            calendar_name.unwrap_or("all calendars")
        );

        let restriction = calendar.as_ref().map(std::slice::from_ref);
        let natives = self.store.query_events(start_time, end_time, restriction);
        Ok(natives.iter().map(Event::from_native).collect())
    }

    /// Single event by store identifier; absence is not an error.
    pub fn find_event_by_id(&self, identifier: &str) -> Option<Event> {
        match self.store.event_with_identifier(identifier) {
            Some(native) => Some(Event::from_native(&native)),
            None => {
                info!("No event found with ID: {identifier}");
                None
            }
        }
    }

    /// Create a new event and return it with its store-assigned identifier.
    pub fn create_event(&self, request: &CreateEventRequest) -> CalendarResult<Event> {
        let mut native = NativeEvent::new(&request.title, request.start_time, request.end_time);

        if let Some(ref notes) = request.notes {
            native.notes = Some(notes.clone());
        }
        if let Some(ref location) = request.location {
            native.location = Some(location.clone());
        }
        if let Some(ref url) = request.url {
            native.url = Some(url.clone());
        }
        if request.all_day {
            native.all_day = true;
        }

        if let Some(ref offsets) = request.alarms_minutes_offsets {
            native.alarms = to_native_alarms(offsets, request.all_day);
        }

        if let Some(ref rule) = request.recurrence_rule {
            native.recurrence = Some(rule.to_native());
        }

        native.calendar = Some(match request.calendar_name {
            Some(ref name) => self.directory.find_by_name(name).ok_or_else(|| {
                error!("Failed to create event: the calendar '{name}' does not exist");
                CalendarError::NoSuchCalendar(name.clone())
            })?,
            None => {
                let default = self.directory.default_for_new_events();
                debug!("Using default calendar '{}' for new event", default.title);
                default
            }
        });

        let saved = self
            .store
            .save_event(native, Span::ThisEvent)
            .map_err(|diagnostic| {
                error!("Failed to save event: {diagnostic}");
                CalendarError::Save(diagnostic)
            })?;

        info!("Successfully created event: {}", request.title);
        Ok(Event::from_native(&saved))
    }

    /// Apply the provided fields to an existing event. Everything absent from
    /// the request keeps its stored value.
    pub fn update_event(
        &self,
        event_id: &str,
        request: &UpdateEventRequest,
    ) -> CalendarResult<Event> {
        let mut native = self
            .store
            .event_with_identifier(event_id)
            .ok_or_else(|| CalendarError::NoSuchEvent(event_id.to_string()))?;

        if let Some(ref title) = request.title {
            native.title = title.clone();
        }
        if let Some(start_time) = request.start_time {
            native.start_time = start_time;
        }
        if let Some(end_time) = request.end_time {
            native.end_time = end_time;
        }
        if let Some(ref location) = request.location {
            native.location = Some(location.clone());
        }
        if let Some(ref notes) = request.notes {
            native.notes = Some(notes.clone());
        }
        if let Some(ref url) = request.url {
            native.url = Some(url.clone());
        }
        if let Some(all_day) = request.all_day {
            native.all_day = all_day;
        }

        if let Some(ref name) = request.calendar_name {
            let calendar = self
                .directory
                .find_by_name(name)
                .ok_or_else(|| CalendarError::NoSuchCalendar(name.clone()))?;
            native.calendar = Some(calendar);
        }

        if let Some(ref rule) = request.recurrence_rule {
            native.recurrence = Some(rule.to_native());
        }

        // The alarm reference point depends on the all-day flag the event
        // ends up with, which the lines above have already settled.
        if let Some(ref offsets) = request.alarms_minutes_offsets {
            native.alarms = to_native_alarms(offsets, native.all_day);
        }

        let saved = self
            .store
            .save_event(native, Span::FutureEvents)
            .map_err(|diagnostic| {
                error!("Failed to update event: {diagnostic}");
                CalendarError::Save(diagnostic)
            })?;

        info!("Successfully updated event: {}", saved.title);
        Ok(Event::from_native(&saved))
    }

    /// Delete an event; later occurrences of a recurring series go with it.
    pub fn delete_event(&self, event_id: &str) -> CalendarResult<()> {
        let native = self
            .store
            .event_with_identifier(event_id)
            .ok_or_else(|| CalendarError::NoSuchEvent(event_id.to_string()))?;

        let title = native.title.clone();
        self.store
            .remove_event(native, Span::FutureEvents)
            .map_err(|diagnostic| {
                error!("Failed to delete event: {diagnostic}");
                CalendarError::Remove(diagnostic)
            })?;

        info!("Successfully deleted event: {title}");
        Ok(())
    }
}
