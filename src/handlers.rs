//! Tool handlers: structured params in, text out.
//!
//! Every handler catches core errors and renders them as text; the transport
//! never sees a raised fault. Permission failures render remediation steps,
//! all other errors are scoped to the one call that triggered them.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDateTime;
use indoc::indoc;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use calmcp_core::store::EventStore;
use calmcp_core::{
    CalendarError, CalendarManager, CreateEventRequest, UpdateEventRequest, format_event_list,
};

const PERMISSION_REMEDIATION: &str = indoc! {"
    Calendar access is not granted. Please follow these steps:

    1. Open System Preferences/Settings
    2. Go to Privacy & Security > Calendar
    3. Check the box next to your terminal application or agent host
    4. Restart the application

    Once you've granted access, try your calendar operation again.
"};

/// Shared server state.
///
/// The manager is connected on first use, so the store's permission request
/// happens on the first calendar tool call instead of at process launch. A
/// failed connection is not cached; the next call retries it.
pub struct ServerState {
    store: Arc<dyn EventStore>,
    access_timeout: Duration,
    manager: Mutex<Option<Arc<CalendarManager>>>,
}

impl ServerState {
    pub fn new(store: Arc<dyn EventStore>, access_timeout: Duration) -> Self {
        ServerState {
            store,
            access_timeout,
            manager: Mutex::new(None),
        }
    }

    fn manager(&self) -> Result<Arc<CalendarManager>, CalendarError> {
        let mut slot = self.manager.lock().unwrap();
        if let Some(manager) = slot.as_ref() {
            return Ok(manager.clone());
        }

        debug!("connecting calendar manager");
        let manager = Arc::new(CalendarManager::connect_with_timeout(
            self.store.clone(),
            self.access_timeout,
        )?);
        *slot = Some(manager.clone());
        Ok(manager)
    }
}

/// Route a `tools/call` to its handler; `None` if the tool name is unknown.
pub fn call_tool(state: &ServerState, name: &str, arguments: &Value) -> Option<String> {
    match name {
        "list_calendars" => Some(list_calendars(state, arguments)),
        "list_events" => Some(list_events(state, arguments)),
        "create_event" => Some(create_event(state, arguments)),
        "update_event" => Some(update_event(state, arguments)),
        "delete_event" => Some(delete_event(state, arguments)),
        _ => None,
    }
}

/// Render an error the way the caller should see it.
fn error_text(error: &CalendarError) -> String {
    match error {
        CalendarError::PermissionDenied => PERMISSION_REMEDIATION.to_string(),
        other => other.to_string(),
    }
}

pub fn list_calendars(state: &ServerState, _params: &Value) -> String {
    match state.manager() {
        Ok(manager) => {
            let calendars = manager.list_calendar_names();
            if calendars.is_empty() {
                return "No calendars found".to_string();
            }
            let listing = calendars
                .iter()
                .map(|calendar| format!("- {calendar}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Available calendars:\n{listing}")
        }
        Err(error) => format!("Error listing calendars: {}", error_text(&error)),
    }
}

#[derive(Debug, Deserialize)]
struct ListEventsParams {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    #[serde(default)]
    calendar_name: Option<String>,
}

pub fn list_events(state: &ServerState, params: &Value) -> String {
    match try_list_events(state, params) {
        Ok(text) => text,
        Err(text) => format!("Error listing events: {text}"),
    }
}

fn try_list_events(state: &ServerState, params: &Value) -> Result<String, String> {
    let params: ListEventsParams =
        serde_json::from_value(params.clone()).map_err(|error| error.to_string())?;
    let manager = state.manager().map_err(|error| error_text(&error))?;

    let events = manager
        .list_events(
            params.start_date,
            params.end_date,
            params.calendar_name.as_deref(),
        )
        .map_err(|error| error_text(&error))?;

    if events.is_empty() {
        return Ok("No events found in the specified date range".to_string());
    }
    Ok(format_event_list(&events))
}

pub fn create_event(state: &ServerState, params: &Value) -> String {
    match try_create_event(state, params) {
        Ok(text) => text,
        Err(text) => format!("Error creating event: {text}"),
    }
}

fn try_create_event(state: &ServerState, params: &Value) -> Result<String, String> {
    let request: CreateEventRequest =
        serde_json::from_value(params.clone()).map_err(|error| error.to_string())?;
    let manager = state.manager().map_err(|error| error_text(&error))?;

    let event = manager
        .create_event(&request)
        .map_err(|error| error_text(&error))?;
    Ok(format!(
        "Successfully created event: {} (ID: {})",
        event.title, event.identifier
    ))
}

pub fn update_event(state: &ServerState, params: &Value) -> String {
    let Some(event_id) = params.get("event_id").and_then(Value::as_str) else {
        return "Error: Missing required parameter (event_id)".to_string();
    };
    match try_update_event(state, event_id, params) {
        Ok(text) => text,
        Err(text) => format!("Error updating event: {text}"),
    }
}

fn try_update_event(state: &ServerState, event_id: &str, params: &Value) -> Result<String, String> {
    let request: UpdateEventRequest =
        serde_json::from_value(params.clone()).map_err(|error| error.to_string())?;
    let manager = state.manager().map_err(|error| error_text(&error))?;

    let event = manager
        .update_event(event_id, &request)
        .map_err(|error| error_text(&error))?;
    Ok(format!("Successfully updated event: {}", event.title))
}

pub fn delete_event(state: &ServerState, params: &Value) -> String {
    let Some(event_id) = params.get("event_id").and_then(Value::as_str) else {
        return "Error: Missing required parameter (event_id)".to_string();
    };
    match try_delete_event(state, event_id) {
        Ok(text) => text,
        Err(text) => format!("Error deleting event: {text}"),
    }
}

fn try_delete_event(state: &ServerState, event_id: &str) -> Result<String, String> {
    let manager = state.manager().map_err(|error| error_text(&error))?;

    // Fetch the title first so the confirmation can name the event.
    let Some(event) = manager.find_event_by_id(event_id) else {
        return Ok(format!("Event with ID {event_id} not found"));
    };

    manager
        .delete_event(event_id)
        .map_err(|error| error_text(&error))?;
    Ok(format!("Successfully deleted event: {}", event.title))
}
