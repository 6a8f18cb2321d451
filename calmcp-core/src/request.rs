//! Request types for event creation and update.
//!
//! Both types are ephemeral values built per call from the transport's JSON
//! arguments and discarded after translation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::recurrence::RecurrenceRule;

/// Fields for a new event.
///
/// Optional fields left unset are never forwarded to the store, so store
/// defaults survive. Start/end ordering is not validated here; the store is
/// authoritative on rejecting invalid ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub calendar_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Minutes before the event start to trigger reminders.
    #[serde(default)]
    pub alarms_minutes_offsets: Option<Vec<i64>>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRule>,
}

/// Partial update of an existing event.
///
/// `None` means "leave the stored value unchanged". Clearing a text field is
/// expressed with an explicit empty string, never with omission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub calendar_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// When present, replaces the entire alarm set.
    #[serde(default)]
    pub alarms_minutes_offsets: Option<Vec<i64>>,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRule>,
}
