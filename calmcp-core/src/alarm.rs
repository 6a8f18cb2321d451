//! Translation of reminder offsets to the store's alarm representation.

use crate::store::NativeAlarm;

/// Minutes between midnight and the nominal start that the store uses as the
/// alarm reference point for all-day events.
const ALL_DAY_REFERENCE_SHIFT_MINUTES: i64 = 1440;

/// Convert reminder offsets (minutes before event start, positive = before)
/// into the store's relative-offset alarms.
///
/// For all-day events the store anchors alarms at midnight of the start day
/// rather than the nominal start time, so each offset shifts back by one
/// day before conversion.
pub fn to_native_alarms(offsets_minutes: &[i64], all_day: bool) -> Vec<NativeAlarm> {
    offsets_minutes
        .iter()
        .map(|&minutes| {
            let effective = if all_day {
                minutes - ALL_DAY_REFERENCE_SHIFT_MINUTES
            } else {
                minutes
            };
            NativeAlarm {
                relative_offset_seconds: -60 * effective,
            }
        })
        .collect()
}
