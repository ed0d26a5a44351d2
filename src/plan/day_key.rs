//! Day-key resolution: which template slot applies to a date.

use jiff::civil::Date;

use crate::model::{DayKey, days_between};

/// Number of day slots in every template table.
pub const TEMPLATE_DAYS: i64 = 6;

/// Maps `target` onto a template slot, counting from `trip_start`.
///
/// Without a trip every date resolves to `day0`. Trips longer than
/// [`TEMPLATE_DAYS`] cycle through the slots again. Dates before the trip
/// start wrap backwards (`day5` for the day before), so the result always
/// names a slot in `0..TEMPLATE_DAYS`.
pub fn resolve_day_key(target: Date, trip_start: Option<Date>) -> DayKey {
    let Some(start) = trip_start else {
        return DayKey::new(0);
    };
    let diff = days_between(start, target);
    DayKey::new(diff.rem_euclid(TEMPLATE_DAYS))
}
