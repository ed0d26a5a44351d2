//! Session context: who is travelling and on which trip.

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::Trip;

/// Identifies a traveller profile, e.g. `"user1"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub const DEFAULT: &'static str = "user1";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProfileId {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a daily plan needs to know about its surroundings.
///
/// Passed explicitly into the planner rather than looked up globally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub profile: ProfileId,

    /// `None` until a trip has been created.
    pub trip: Option<Trip>,
}

impl Session {
    pub fn new(profile: ProfileId, trip: Option<Trip>) -> Self {
        Self { profile, trip }
    }

    pub fn trip_start(&self) -> Option<Date> {
        self.trip.as_ref().map(|t| t.start_date)
    }
}
