//! The event store boundary.
//!
//! The store is an external, stateful service that persists calendars and
//! events and enforces its own access control. This module defines the narrow
//! contract any concrete backend implements, plus the store-native value
//! types the core translates into. The core issues one call at a time and
//! never keeps a handle beyond the call that produced it.

pub mod memory;

use chrono::NaiveDateTime;

/// Completion callback for an access request. The store invokes it exactly
/// once, possibly from another thread, with the grant decision and an
/// optional diagnostic.
pub type AccessCompletion = Box<dyn FnOnce(bool, Option<String>) + Send>;

/// Which entity class access is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Reminder,
}

impl EntityKind {
    /// The store's wire value for this entity class.
    pub fn native_value(self) -> u32 {
        match self {
            EntityKind::Event => 0,
            EntityKind::Reminder => 1,
        }
    }
}

/// How a mutation on one occurrence of a recurring series propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// Affect only the targeted occurrence.
    ThisEvent,
    /// Affect the targeted occurrence and all later ones.
    FutureEvents,
}

/// Opaque reference to a store-managed calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarHandle {
    pub identifier: String,
    /// Display title; not guaranteed unique across the store.
    pub title: String,
}

/// A relative alarm in the store's representation. Negative offsets fire
/// before the reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeAlarm {
    pub relative_offset_seconds: i64,
}

/// Recurrence rule in the store's representation.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeRecurrenceRule {
    /// Store frequency constant: 0 daily, 1 weekly, 2 monthly, 3 yearly.
    pub frequency: u32,
    pub interval: u32,
    /// Weekday ordinals (1 = Sunday .. 7 = Saturday); weekly rules only.
    pub days_of_week: Option<Vec<u32>>,
    /// Absent means the rule recurs without end.
    pub end: Option<NativeRecurrenceEnd>,
}

/// Termination condition of a native recurrence rule.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeRecurrenceEnd {
    Until(NaiveDateTime),
    Count(u32),
}

/// The store's mutable event record.
///
/// `identifier` is assigned by the store on first save and immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeEvent {
    pub identifier: Option<String>,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub calendar: Option<CalendarHandle>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    pub all_day: bool,
    pub alarms: Vec<NativeAlarm>,
    pub recurrence: Option<NativeRecurrenceRule>,
}

impl NativeEvent {
    /// A fresh, unsaved event record.
    pub fn new(title: &str, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        NativeEvent {
            identifier: None,
            title: title.to_string(),
            start_time,
            end_time,
            calendar: None,
            notes: None,
            location: None,
            url: None,
            all_day: false,
            alarms: Vec::new(),
            recurrence: None,
        }
    }
}

/// The external calendar store.
pub trait EventStore: Send + Sync {
    /// Ask the store for permission to touch `kind` entities. The completion
    /// is invoked exactly once.
    fn request_access(&self, kind: EntityKind, completion: AccessCompletion);

    /// All calendars known to the store, in store enumeration order.
    fn calendars(&self) -> Vec<CalendarHandle>;

    /// The store's own choice of calendar for events created without one.
    fn default_calendar_for_new_events(&self) -> CalendarHandle;

    /// Events whose interval intersects `[start_time, end_time]`, restricted
    /// to `calendars` when given.
    fn query_events(
        &self,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        calendars: Option<&[CalendarHandle]>,
    ) -> Vec<NativeEvent>;

    /// Single lookup by store identifier.
    fn event_with_identifier(&self, identifier: &str) -> Option<NativeEvent>;

    /// Persist `event` with the given span. Success returns the stored
    /// record with its identifier assigned; failure returns the store's
    /// diagnostic verbatim.
    fn save_event(&self, event: NativeEvent, span: Span) -> Result<NativeEvent, String>;

    /// Remove `event` with the given span; failure returns the diagnostic.
    fn remove_event(&self, event: NativeEvent, span: Span) -> Result<(), String>;
}
