//! Energy ledger: remaining stamina per calendar date.

use std::collections::BTreeMap;
use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ActivityStatus;

pub const ENERGY_MIN: u8 = 0;
pub const ENERGY_MAX: u8 = 100;

/// Level of a date nobody has touched yet.
pub const DEFAULT_ENERGY: u8 = ENERGY_MAX;

/// Clamps any level into `ENERGY_MIN..=ENERGY_MAX`.
pub fn clamp_energy(level: i64) -> u8 {
    let clamped = level.clamp(i64::from(ENERGY_MIN), i64::from(ENERGY_MAX));
    // In range after the clamp above.
    u8::try_from(clamped).unwrap_or(ENERGY_MAX)
}

/// Energy change caused by moving an activity from `previous` to `next`.
///
/// Completing spends the cost; leaving `completed` refunds it. Every other
/// move is free.
#[allow(clippy::match_same_arms)] // One arm per transition.
pub fn energy_delta(previous: ActivityStatus, next: ActivityStatus, cost: u32) -> i64 {
    use ActivityStatus::{Completed, Pending, Skipped};

    let cost = i64::from(cost);
    match (previous, next) {
        (Pending, Completed) => -cost,
        (Pending, Skipped) => 0,
        (Completed, Pending) => cost,
        (Completed, Skipped) => cost,
        (Skipped, Completed) => -cost,
        (Skipped, Pending) => 0,
        (Pending, Pending) | (Completed, Completed) | (Skipped, Skipped) => 0,
    }
}

/// Coarse reading of an energy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyBand {
    Low,
    Medium,
    High,
}

impl EnergyBand {
    pub fn of(level: u8) -> Self {
        match level {
            0..=35 => Self::Low,
            36..=65 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl fmt::Display for EnergyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Energy level per calendar date, persisted as `{"YYYY-MM-DD": level}`.
///
/// Dates without an entry are at [`DEFAULT_ENERGY`]. Every stored level is
/// within `ENERGY_MIN..=ENERGY_MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EnergyLedger {
    levels: BTreeMap<Date, u8>,
}

impl EnergyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: Date) -> u8 {
        self.levels.get(&date).copied().unwrap_or(DEFAULT_ENERGY)
    }

    /// Adds `delta` to the level of `date`, clamped, and returns the new level.
    pub fn apply_delta(&mut self, date: Date, delta: i64) -> u8 {
        let level = clamp_energy(i64::from(self.get(date)).saturating_add(delta));
        self.levels.insert(date, level);
        level
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<'de> Deserialize<'de> for EnergyLedger {
    /// Lenient: keys that are not dates are dropped and out-of-range levels
    /// are clamped, each with a warning.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, i64>::deserialize(deserializer)?;
        let mut levels = BTreeMap::new();
        for (key, level) in raw {
            let Ok(date) = key.parse::<Date>() else {
                tracing::warn!(%key, "dropping energy entry with an invalid date");
                continue;
            };
            let clamped = clamp_energy(level);
            if i64::from(clamped) != level {
                tracing::warn!(%date, level, clamped, "clamping stored energy level");
            }
            levels.insert(date, clamped);
        }
        Ok(Self { levels })
    }
}
