//! Tool declarations exposed through `tools/list`.

use serde_json::{Value, json};

/// A declared tool: name, description, and a JSON Schema for its arguments.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// All tools this server exposes.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "list_calendars",
            description: "List all available calendars that can be used with calendar operations.",
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        },
        ToolSpec {
            name: "list_events",
            description: "List calendar events in a date range. Returns events grouped by date with time totals. Use for daily summaries, weekly reviews, and planning.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "start_date": {
                        "type": "string",
                        "description": "Start date in ISO8601 format (YYYY-MM-DDTHH:MM:SS). For full day queries, use 00:00:00 for the time.",
                    },
                    "end_date": {
                        "type": "string",
                        "description": "End date in ISO8601 format (YYYY-MM-DDTHH:MM:SS). For full day queries, use 23:59:59 for the time.",
                    },
                    "calendar_name": {
                        "type": "string",
                        "description": "Optional calendar name to filter by. Use list_calendars to see available calendars.",
                    },
                },
                "required": ["start_date", "end_date"],
            }),
        },
        ToolSpec {
            name: "create_event",
            description: "Create a new calendar event with title, time, location, notes, and other metadata.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "description": "Event title" },
                    "start_time": {
                        "type": "string",
                        "description": "Start time in ISO format (YYYY-MM-DDTHH:MM:SS)",
                    },
                    "end_time": {
                        "type": "string",
                        "description": "End time in ISO format (YYYY-MM-DDTHH:MM:SS)",
                    },
                    "calendar_name": {
                        "type": "string",
                        "description": "Optional calendar name. If not specified, uses default calendar.",
                    },
                    "location": { "type": "string", "description": "Optional event location" },
                    "notes": { "type": "string", "description": "Optional event notes/description" },
                    "alarms_minutes_offsets": {
                        "type": "array",
                        "items": { "type": "integer" },
                        "description": "Optional list of minutes before event to trigger reminders (e.g., [15, 60] for 15 min and 1 hour before)",
                    },
                    "url": { "type": "string", "description": "Optional URL associated with event" },
                    "all_day": {
                        "type": "boolean",
                        "description": "Whether this is an all-day event (default: false)",
                    },
                    "recurrence_rule": {
                        "type": "object",
                        "description": "Optional recurrence rule for repeating events",
                    },
                },
                "required": ["title", "start_time", "end_time"],
            }),
        },
        ToolSpec {
            name: "update_event",
            description: "Update an existing calendar event. Only provide the fields you want to change.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "event_id": {
                        "type": "string",
                        "description": "Unique identifier of the event to update (from list_events)",
                    },
                    "title": { "type": "string", "description": "New event title" },
                    "start_time": {
                        "type": "string",
                        "description": "New start time in ISO format (YYYY-MM-DDTHH:MM:SS)",
                    },
                    "end_time": {
                        "type": "string",
                        "description": "New end time in ISO format (YYYY-MM-DDTHH:MM:SS)",
                    },
                    "calendar_name": { "type": "string", "description": "New calendar name" },
                    "location": { "type": "string", "description": "New event location" },
                    "notes": { "type": "string", "description": "New event notes/description" },
                    "alarms_minutes_offsets": {
                        "type": "array",
                        "items": { "type": "integer" },
                        "description": "New list of reminder offsets in minutes",
                    },
                    "url": { "type": "string", "description": "New URL" },
                    "all_day": { "type": "boolean", "description": "New all-day flag" },
                    "recurrence_rule": {
                        "type": "object",
                        "description": "New recurrence rule",
                    },
                },
                "required": ["event_id"],
            }),
        },
        ToolSpec {
            name: "delete_event",
            description: "Delete a calendar event by its identifier.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "event_id": {
                        "type": "string",
                        "description": "Unique identifier of the event to delete (from list_events)",
                    },
                },
                "required": ["event_id"],
            }),
        },
    ]
}

/// The `tools/list` result payload.
pub fn tools_payload() -> Value {
    json!({
        "tools": tool_specs()
            .iter()
            .map(|tool| json!({
                "name": tool.name,
                "description": tool.description,
                "inputSchema": tool.input_schema,
            }))
            .collect::<Vec<_>>(),
    })
}
