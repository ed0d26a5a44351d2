//! Trip types: the journey a daily plan is derived from.

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A trip as stored under the `currentTrip` key.
///
/// Only `start_date` and `end_date` are required when reading; the rest
/// fall back to defaults so older or partial records still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub destination: String,

    #[serde(deserialize_with = "deserialize_trip_date")]
    pub start_date: Date,

    #[serde(deserialize_with = "deserialize_trip_date")]
    pub end_date: Date,

    #[serde(default)]
    pub status: TripStatus,

    #[serde(default = "Timestamp::now")]
    pub created_at: Timestamp,

    #[serde(default)]
    pub preferences: TripPreferences,
}

/// Why a trip could not be created.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TripError {
    #[error("trip name is empty")]
    EmptyName,

    #[error("trip destination is empty")]
    EmptyDestination,

    #[error("trip ends ({end}) before it starts ({start})")]
    EndBeforeStart { start: Date, end: Date },
}

/// What the traveller fills in when creating a trip.
#[derive(Debug, Clone, Default)]
pub struct NewTrip {
    pub name: String,
    pub description: Option<String>,
    pub destination: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub preferences: TripPreferences,
}

impl Trip {
    /// Validates `new` and stamps it with a fresh id.
    ///
    /// A missing end date means a one-day trip.
    pub fn create(new: NewTrip, today: Date) -> Result<Self, TripError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(TripError::EmptyName);
        }
        let destination = new.destination.trim();
        if destination.is_empty() {
            return Err(TripError::EmptyDestination);
        }
        let start = new.start_date.unwrap_or(today);
        let end = new.end_date.unwrap_or(start);
        if end < start {
            return Err(TripError::EndBeforeStart { start, end });
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: new.description.filter(|d| !d.trim().is_empty()),
            destination: destination.to_string(),
            start_date: start,
            end_date: end,
            status: TripStatus::Planned,
            created_at: Timestamp::now(),
            preferences: new.preferences,
        })
    }

    /// Number of calendar days covered, counting both ends.
    pub fn length_days(&self) -> i64 {
        days_between(self.start_date, self.end_date) + 1
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// 1-based position of `date` within the trip, `None` outside it.
    pub fn day_number(&self, date: Date) -> Option<i64> {
        self.contains(date)
            .then(|| days_between(self.start_date, date) + 1)
    }
}

/// Lifecycle of a trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Planned,
    Active,
    Completed,
    Cancelled,
}

/// What the traveller asked the itinerary to lean towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripPreferences {
    pub culture: bool,
    pub nature: bool,
    pub gastronomy: bool,
    pub wellness: bool,
    pub shopping: bool,
    pub intensive: bool,
    pub good_mood: bool,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self {
            culture: true,
            nature: true,
            gastronomy: true,
            wellness: false,
            shopping: false,
            intensive: false,
            good_mood: true,
        }
    }
}

/// Whole days from `from` to `to`; negative when `to` comes first.
pub fn days_between(from: Date, to: Date) -> i64 {
    i64::from((to - from).get_days())
}

/// Parses a trip date from either a plain ISO date (`2024-01-01`) or a full
/// ISO timestamp (`2024-01-01T09:30:00.000Z`).
///
/// Timestamps are reduced to their calendar date in the system time zone.
pub fn parse_trip_date(s: &str) -> Result<Date, jiff::Error> {
    if s.contains('T') {
        let ts: Timestamp = s.parse()?;
        return Ok(ts.to_zoned(TimeZone::system()).date());
    }
    s.parse()
}

fn deserialize_trip_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_trip_date(&s).map_err(serde::de::Error::custom)
}
