//! Daily-plan derivation.
//!
//! Maps calendar dates onto cyclic day templates, keeps a per-date energy
//! balance, and applies activity status changes with their energy deltas.

mod day_key;
mod energy;
mod planner;
mod templates;

use jiff::civil::Date;

use crate::model::{DayKey, ProfileId, TimeOfDay};

pub use day_key::{TEMPLATE_DAYS, resolve_day_key};
pub use energy::{DEFAULT_ENERGY, ENERGY_MAX, EnergyBand, EnergyLedger, clamp_energy, energy_delta};
pub use planner::{DailyPlan, DaySummary, StatusChange};
pub use templates::TemplateRegistry;

/// Errors raised while deriving or mutating a daily plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(
        "cannot complete activities on {date}: it is in the future. \
         Only activities up to today can be completed."
    )]
    FutureCompletion { date: Date },

    #[error("no activity '{id}' in the {time_of_day} of {day_key}")]
    UnknownActivity {
        day_key: DayKey,
        time_of_day: TimeOfDay,
        id: String,
    },

    #[error("no template for {0}")]
    MissingTemplate(DayKey),

    #[error("unknown profile: {0}")]
    UnknownProfile(ProfileId),

    #[error("invalid built-in template for {profile}: {source}")]
    InvalidTemplate {
        profile: ProfileId,
        source: serde_json::Error,
    },
}

pub type Result<T> = core::result::Result<T, PlanError>;
