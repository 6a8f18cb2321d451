//! Recurrence rules and their translation to the store's representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::store::{NativeRecurrenceEnd, NativeRecurrenceRule};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// The store's frequency constant. These numbers are part of the store's
    /// wire contract, not an internal detail.
    pub fn native_value(self) -> u32 {
        match self {
            Frequency::Daily => 0,
            Frequency::Weekly => 1,
            Frequency::Monthly => 2,
            Frequency::Yearly => 3,
        }
    }
}

/// Day of week, numbered the way the store numbers them: 1 = Sunday through
/// 7 = Saturday. Serialized as that ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl Weekday {
    /// The store's weekday ordinal.
    pub fn native_value(self) -> u32 {
        self as u32
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day as u8
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Weekday::Sunday),
            2 => Ok(Weekday::Monday),
            3 => Ok(Weekday::Tuesday),
            4 => Ok(Weekday::Wednesday),
            5 => Ok(Weekday::Thursday),
            6 => Ok(Weekday::Friday),
            7 => Ok(Weekday::Saturday),
            other => Err(format!("weekday ordinal out of range: {other} (expected 1-7)")),
        }
    }
}

/// Termination of a recurrence: never, on a date, or after a number of
/// occurrences.
#[derive(Debug, Clone, PartialEq)]
pub enum RecurrenceEnd {
    Never,
    OnDate(NaiveDateTime),
    AfterOccurrences(u32),
}

/// A portable recurrence rule.
///
/// Constructed values hold exactly one end condition; wire input carrying
/// both an end date and an occurrence count is rejected when the rule is
/// built, before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecurrenceRuleParts", into = "RecurrenceRuleParts")]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub interval: u32,
    /// Only meaningful for weekly rules.
    pub days_of_week: Option<Vec<Weekday>>,
    end: RecurrenceEnd,
}

impl RecurrenceRule {
    /// A rule recurring at `frequency` every period, without end.
    pub fn new(frequency: Frequency) -> Self {
        RecurrenceRule {
            frequency,
            interval: 1,
            days_of_week: None,
            end: RecurrenceEnd::Never,
        }
    }

    /// Repeat every `interval` periods instead of every one.
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    /// Restrict a weekly rule to specific days.
    pub fn on_days(mut self, days: Vec<Weekday>) -> Self {
        self.days_of_week = Some(days);
        self
    }

    /// Terminate on a date, replacing any other end condition.
    pub fn ending_on(mut self, date: NaiveDateTime) -> Self {
        self.end = RecurrenceEnd::OnDate(date);
        self
    }

    /// Terminate after `count` occurrences, replacing any other end
    /// condition.
    pub fn ending_after(mut self, count: u32) -> Self {
        self.end = RecurrenceEnd::AfterOccurrences(count);
        self
    }

    pub fn end(&self) -> &RecurrenceEnd {
        &self.end
    }

    /// Build a rule from independently supplied parts. This is the path wire
    /// input takes; it rejects an end date and an occurrence count supplied
    /// together, and a zero interval.
    pub fn from_parts(
        frequency: Frequency,
        interval: u32,
        days_of_week: Option<Vec<Weekday>>,
        end_date: Option<NaiveDateTime>,
        occurrence_count: Option<u32>,
    ) -> CalendarResult<Self> {
        if interval == 0 {
            return Err(CalendarError::InvalidRecurrence(
                "interval must be a positive integer".to_string(),
            ));
        }

        let end = match (end_date, occurrence_count) {
            (Some(_), Some(_)) => {
                return Err(CalendarError::InvalidRecurrence(
                    "Only one of end_date or occurrence_count may be set".to_string(),
                ));
            }
            (Some(date), None) => RecurrenceEnd::OnDate(date),
            (None, Some(count)) => RecurrenceEnd::AfterOccurrences(count),
            (None, None) => RecurrenceEnd::Never,
        };

        Ok(RecurrenceRule {
            frequency,
            interval,
            days_of_week,
            end,
        })
    }

    /// Translate to the store's representation.
    pub fn to_native(&self) -> NativeRecurrenceRule {
        NativeRecurrenceRule {
            frequency: self.frequency.native_value(),
            interval: self.interval,
            days_of_week: self
                .days_of_week
                .as_ref()
                .map(|days| days.iter().map(|day| day.native_value()).collect()),
            end: match self.end {
                RecurrenceEnd::Never => None,
                RecurrenceEnd::OnDate(date) => Some(NativeRecurrenceEnd::Until(date)),
                RecurrenceEnd::AfterOccurrences(count) => Some(NativeRecurrenceEnd::Count(count)),
            },
        }
    }
}

/// Wire shape of a recurrence rule, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecurrenceRuleParts {
    frequency: Frequency,
    #[serde(default = "default_interval")]
    interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    days_of_week: Option<Vec<Weekday>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    occurrence_count: Option<u32>,
}

fn default_interval() -> u32 {
    1
}

impl TryFrom<RecurrenceRuleParts> for RecurrenceRule {
    type Error = CalendarError;

    fn try_from(parts: RecurrenceRuleParts) -> CalendarResult<Self> {
        RecurrenceRule::from_parts(
            parts.frequency,
            parts.interval,
            parts.days_of_week,
            parts.end_date,
            parts.occurrence_count,
        )
    }
}

impl From<RecurrenceRule> for RecurrenceRuleParts {
    fn from(rule: RecurrenceRule) -> Self {
        let (end_date, occurrence_count) = match rule.end {
            RecurrenceEnd::Never => (None, None),
            RecurrenceEnd::OnDate(date) => (Some(date), None),
            RecurrenceEnd::AfterOccurrences(count) => (None, Some(count)),
        };
        RecurrenceRuleParts {
            frequency: rule.frequency,
            interval: rule.interval,
            days_of_week: rule.days_of_week,
            end_date,
            occurrence_count,
        }
    }
}
