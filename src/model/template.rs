//! Day keys and template tables.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DayActivities;

/// Identifies a slot in a template table: `"day0"`, `"day1"`, ...
///
/// Serialized as its string form so it can key a JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(i64);

impl DayKey {
    pub const fn new(index: i64) -> Self {
        Self(index)
    }

    pub const fn index(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day{}", self.0)
    }
}

impl FromStr for DayKey {
    type Err = String;

    /// Accepts negative indices (`"day-1"`) so that data written by older
    /// versions still loads. Only the canonical spelling is accepted, so two
    /// strings never name the same key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("day")
            .and_then(|n| n.parse::<i64>().ok())
            .map(Self)
            .filter(|key| key.to_string() == s)
            .ok_or_else(|| format!("invalid day key: {s}"))
    }
}

impl TryFrom<String> for DayKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

/// Day templates of one profile, keyed by day slot.
pub type TemplateTable = BTreeMap<DayKey, DayActivities>;
