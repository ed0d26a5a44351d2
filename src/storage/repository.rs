//! Plan repository: what the storage keys mean.
//!
//! Reads are forgiving: malformed values are logged and replaced by defaults
//! rather than failing the activation. Writes are whole-value replacements.

use std::collections::btree_map::Entry;

use jiff::civil::Date;
use serde::de::DeserializeOwned;

use crate::model::{ProfileId, Session, TemplateTable, Trip};
use crate::plan::{DailyPlan, EnergyLedger, TemplateRegistry};

use super::{KeyValueStore, Result, StorageError, keys};

/// Errors raised while activating a plan from storage.
#[derive(Debug, thiserror::Error)]
pub enum ActivateError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Plan(#[from] crate::plan::PlanError),
}

/// Typed access to the plan state held in a [`KeyValueStore`].
pub struct PlanRepository<S> {
    store: S,
}

impl<S: KeyValueStore> PlanRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Session ──

    /// Reads the current profile and trip.
    ///
    /// The trip is only present when `tripCreated` is `"true"` and
    /// `currentTrip` holds a readable trip.
    pub fn load_session(&self, default_profile: &ProfileId) -> Result<Session> {
        let profile = self
            .store
            .get(keys::CURRENT_USER)?
            .filter(|p| !p.is_empty())
            .map_or_else(|| default_profile.clone(), ProfileId::new);

        let trip = if self.store.get(keys::TRIP_CREATED)?.as_deref() == Some("true") {
            self.read_json::<Trip>(keys::CURRENT_TRIP)?
        } else {
            None
        };

        Ok(Session::new(profile, trip))
    }

    pub fn set_profile(&self, profile: &ProfileId) -> Result<()> {
        self.store.set(keys::CURRENT_USER, profile.as_str())
    }

    /// Whether an activity overlay is stored. The overlay is not tied to a
    /// profile, so it keeps driving the plan across profile switches.
    pub fn has_saved_plan(&self) -> Result<bool> {
        Ok(self.store.get(keys::DAILY_PLAN_ACTIVITIES)?.is_some())
    }

    // ── Trip ──

    /// Stores `trip` as the current trip.
    pub fn create_trip(&self, trip: &Trip) -> Result<()> {
        let json = serde_json::to_string(trip)?;
        self.store
            .set_many(&[(keys::TRIP_CREATED, "true"), (keys::CURRENT_TRIP, json.as_str())])?;
        tracing::info!(trip = %trip.id, start = %trip.start_date, end = %trip.end_date, "trip created");
        Ok(())
    }

    /// Forgets the current trip along with all plan state derived from it.
    pub fn clear_trip(&self) -> Result<()> {
        for key in [
            keys::TRIP_CREATED,
            keys::CURRENT_TRIP,
            keys::DAILY_PLAN_ACTIVITIES,
            keys::CURRENT_ENERGY_LEVEL,
            keys::ENERGY_LEVELS_PER_DAY,
        ] {
            self.store.remove(key)?;
        }
        tracing::info!("trip cleared");
        Ok(())
    }

    // ── Plan ──

    /// Rebuilds the daily plan from storage.
    ///
    /// Falls back to the profile's templates when no activity overlay is
    /// stored, and to an empty ledger when no energy levels are stored. Day
    /// slots missing from a stored overlay are taken from the templates.
    pub fn activate(
        &self,
        registry: &TemplateRegistry,
        default_profile: &ProfileId,
        today: Date,
    ) -> core::result::Result<DailyPlan, ActivateError> {
        let session = self.load_session(default_profile)?;

        let table = match self.read_json::<TemplateTable>(keys::DAILY_PLAN_ACTIVITIES)? {
            Some(mut table) => {
                if let Ok(templates) = registry.table(&session.profile) {
                    fill_missing_days(&mut table, templates);
                }
                table
            }
            None => registry.table(&session.profile)?.clone(),
        };
        let ledger = self
            .read_json::<EnergyLedger>(keys::ENERGY_LEVELS_PER_DAY)?
            .unwrap_or_default();

        tracing::debug!(
            profile = %session.profile,
            has_trip = session.trip.is_some(),
            days = table.len(),
            energy_entries = ledger.len(),
            "activated daily plan"
        );
        Ok(DailyPlan::new(session, table, ledger, today))
    }

    /// Writes the activity overlay and energy ledger in full.
    ///
    /// Both keys are written together; on error neither is guaranteed to
    /// have changed and `plan` is untouched.
    pub fn save(&self, plan: &DailyPlan) -> Result<()> {
        let activities = serde_json::to_string(plan.table())?;
        let energy = serde_json::to_string(plan.ledger())?;
        self.store.set_many(&[
            (keys::DAILY_PLAN_ACTIVITIES, activities.as_str()),
            (keys::ENERGY_LEVELS_PER_DAY, energy.as_str()),
        ])?;
        tracing::info!(energy = plan.current_energy(), "plan saved");
        Ok(())
    }

    /// Reads and parses a JSON value. Absent and unreadable values are `None`.
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring malformed stored value");
                Ok(None)
            }
        }
    }
}

/// Copies every template slot the stored table lacks.
fn fill_missing_days(table: &mut TemplateTable, templates: &TemplateTable) {
    for (day_key, day) in templates {
        if let Entry::Vacant(slot) = table.entry(*day_key) {
            tracing::warn!(%day_key, "stored plan lacks a day; using its template");
            slot.insert(day.clone());
        }
    }
}
