//! Error types for calendar operations.

use thiserror::Error;

/// Errors that can occur when operating on the calendar store.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(
        "Calendar access not granted. Please check System Settings > Privacy & Security > Calendar."
    )]
    PermissionDenied,

    #[error("Calendar access request timed out after {0}s")]
    PermissionTimeout(u64),

    #[error("Calendar: {0} does not exist")]
    NoSuchCalendar(String),

    #[error("Event with id: {0} does not exist")]
    NoSuchEvent(String),

    #[error("Failed to save event: {0}")]
    Save(String),

    #[error("Failed to delete event: {0}")]
    Remove(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRecurrence(String),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
