//! Local persistence for trips, plans, and energy levels.
//!
//! Everything is kept in a flat key-value store with JSON-encoded values,
//! under the keys listed in [`keys`]. The store itself is behind
//! [`KeyValueStore`]; [`PlanRepository`] knows which keys mean what.
//!
//! ```text
//! tripCreated          "true" | absent
//! currentTrip          Trip JSON
//! currentUser          "user1" | "user2" | ...
//! dailyPlanActivities  { "day0": DayActivities, ... }
//! energyLevelsPerDay   { "YYYY-MM-DD": level, ... }
//! ```

#[cfg(test)]
mod memory;
mod repository;
mod sqlite;

use std::io;

#[cfg(test)]
pub use memory::MemoryStore;
pub use repository::{ActivateError, PlanRepository};
pub use sqlite::SqliteStore;

/// Storage keys.
pub mod keys {
    pub const TRIP_CREATED: &str = "tripCreated";
    pub const CURRENT_TRIP: &str = "currentTrip";
    pub const CURRENT_USER: &str = "currentUser";
    pub const DAILY_PLAN_ACTIVITIES: &str = "dailyPlanActivities";
    pub const ENERGY_LEVELS_PER_DAY: &str = "energyLevelsPerDay";

    /// Written by older versions; only ever removed.
    pub const CURRENT_ENERGY_LEVEL: &str = "currentEnergyLevel";
}

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// A string-keyed, string-valued store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Writes several entries. Implementations that can should make this
    /// all-or-nothing.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
