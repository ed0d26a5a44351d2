//! The daily plan of one activation: assembly, navigation, and status changes.

use jiff::ToSpan;
use jiff::civil::Date;

use crate::model::{ActivityStatus, DayActivities, DayKey, Session, TemplateTable, TimeOfDay};

use super::{EnergyBand, EnergyLedger, PlanError, Result, energy_delta, resolve_day_key};

/// Live state behind the daily-plan view.
///
/// Holds a mutable copy of the profile's templates (with statuses) and the
/// energy ledger. Nothing here touches storage; see
/// [`PlanRepository`](crate::storage::PlanRepository) for loading and saving.
#[derive(Debug, Clone)]
pub struct DailyPlan {
    session: Session,
    table: TemplateTable,
    ledger: EnergyLedger,
    today: Date,
    focused: Date,
}

/// An accepted status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub day_key: DayKey,
    pub previous: ActivityStatus,
    pub next: ActivityStatus,
    pub delta: i64,

    /// Energy of the activity's date after the change.
    pub energy: u8,
}

/// Progress through one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummary {
    pub day_key: DayKey,
    pub pending: usize,
    pub completed: usize,
    pub skipped: usize,
    pub planned_cost: u32,
    pub spent_cost: u32,
    pub energy: u8,
    pub band: EnergyBand,
}

impl DailyPlan {
    /// Starts focused on the trip's first day, or on `today` without a trip.
    pub fn new(session: Session, table: TemplateTable, ledger: EnergyLedger, today: Date) -> Self {
        let focused = session.trip_start().unwrap_or(today);
        Self {
            session,
            table,
            ledger,
            today,
            focused,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn table(&self) -> &TemplateTable {
        &self.table
    }

    pub fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn day_key(&self, date: Date) -> DayKey {
        resolve_day_key(date, self.session.trip_start())
    }

    /// The activities to show for `date`.
    pub fn activities(&self, date: Date) -> Result<&DayActivities> {
        let key = self.day_key(date);
        self.table.get(&key).ok_or(PlanError::MissingTemplate(key))
    }

    // ── Navigation ──

    pub fn focused(&self) -> Date {
        self.focused
    }

    pub fn focus_on(&mut self, date: Date) {
        self.focused = date;
    }

    pub fn previous_day(&mut self) -> Date {
        self.focused = self.focused.saturating_sub(1.day());
        self.focused
    }

    pub fn next_day(&mut self) -> Date {
        self.focused = self.focused.saturating_add(1.day());
        self.focused
    }

    /// Energy of the focused date, read from the ledger on every call.
    pub fn current_energy(&self) -> u8 {
        self.ledger.get(self.focused)
    }

    pub fn energy_on(&self, date: Date) -> u8 {
        self.ledger.get(date)
    }

    // ── Mutation ──

    /// Moves one activity of `date` to `status`, adjusting that date's energy.
    ///
    /// Completing an activity on a date after today is rejected. On any error
    /// neither the activity nor the ledger is touched.
    pub fn set_status(
        &mut self,
        date: Date,
        time_of_day: TimeOfDay,
        activity_id: &str,
        status: ActivityStatus,
    ) -> Result<StatusChange> {
        if status == ActivityStatus::Completed && date > self.today {
            tracing::info!(%date, today = %self.today, activity_id, "rejected completion of a future activity");
            return Err(PlanError::FutureCompletion { date });
        }

        let day_key = self.day_key(date);
        let activity = self
            .table
            .get_mut(&day_key)
            .and_then(|day| day.find_mut(time_of_day, activity_id))
            .ok_or_else(|| PlanError::UnknownActivity {
                day_key,
                time_of_day,
                id: activity_id.to_string(),
            })?;

        let previous = activity.status;
        let delta = energy_delta(previous, status, activity.energy_cost);
        activity.status = status;
        let energy = self.ledger.apply_delta(date, delta);

        tracing::debug!(%date, %day_key, activity_id, %previous, next = %status, delta, energy, "status changed");

        Ok(StatusChange {
            day_key,
            previous,
            next: status,
            delta,
            energy,
        })
    }

    /// Puts every activity of `date` back to pending, refunding spent energy.
    pub fn reset_day(&mut self, date: Date) -> Result<Vec<StatusChange>> {
        let day = self.activities(date)?;
        let touched: Vec<(TimeOfDay, String)> = day
            .iter()
            .filter(|(_, a)| a.status != ActivityStatus::Pending)
            .map(|(t, a)| (t, a.id.clone()))
            .collect();

        touched
            .into_iter()
            .map(|(time_of_day, id)| self.set_status(date, time_of_day, &id, ActivityStatus::Pending))
            .collect()
    }

    pub fn summary(&self, date: Date) -> Result<DaySummary> {
        let day = self.activities(date)?;
        let energy = self.ledger.get(date);
        Ok(DaySummary {
            day_key: self.day_key(date),
            pending: day.count(ActivityStatus::Pending),
            completed: day.count(ActivityStatus::Completed),
            skipped: day.count(ActivityStatus::Skipped),
            planned_cost: day.total_cost(),
            spent_cost: day.completed_cost(),
            energy,
            band: EnergyBand::of(energy),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::model::{ProfileId, Trip};
    use crate::plan::TemplateRegistry;

    use ActivityStatus::{Completed, Pending, Skipped};

    fn trip_from(start: Date) -> Trip {
        serde_json::from_value(serde_json::json!({
            "id": "trip-1",
            "name": "Cracow",
            "destination": "Cracow, Poland",
            "start_date": start.to_string(),
            "end_date": start.saturating_add(5.days()).to_string(),
        }))
        .unwrap()
    }

    fn plan_with_trip(start: Date, today: Date) -> DailyPlan {
        let registry = TemplateRegistry::builtin().unwrap();
        let profile = ProfileId::new("user1");
        let table = registry.table(&profile).unwrap().clone();
        let session = Session::new(profile, Some(trip_from(start)));
        DailyPlan::new(session, table, EnergyLedger::new(), today)
    }

    fn plan_without_trip(today: Date) -> DailyPlan {
        let registry = TemplateRegistry::builtin().unwrap();
        let profile = ProfileId::new("user1");
        let table = registry.table(&profile).unwrap().clone();
        DailyPlan::new(Session::new(profile, None), table, EnergyLedger::new(), today)
    }

    #[test]
    fn completing_morning_activity_spends_its_cost() {
        let today = date(2024, 1, 3);
        let mut plan = plan_with_trip(date(2024, 1, 1), today);

        assert_eq!(plan.day_key(today).to_string(), "day2");
        let first = plan.activities(today).unwrap().morning[0].clone();
        assert_eq!(first.energy_cost, 15);

        let change = plan
            .set_status(today, TimeOfDay::Morning, &first.id, Completed)
            .unwrap();

        assert_eq!(change.previous, Pending);
        assert_eq!(change.delta, -15);
        assert_eq!(change.energy, 85);
        assert_eq!(plan.energy_on(today), 85);
        assert_eq!(
            plan.activities(today).unwrap().morning[0].status,
            Completed
        );
    }

    #[test]
    fn completing_future_activity_is_rejected_without_mutation() {
        let today = date(2024, 1, 3);
        let tomorrow = date(2024, 1, 4);
        let mut plan = plan_with_trip(date(2024, 1, 1), today);
        let id = plan.activities(tomorrow).unwrap().morning[0].id.clone();

        let err = plan
            .set_status(tomorrow, TimeOfDay::Morning, &id, Completed)
            .unwrap_err();

        assert!(matches!(err, PlanError::FutureCompletion { date } if date == tomorrow));
        assert_eq!(plan.activities(tomorrow).unwrap().morning[0].status, Pending);
        assert!(plan.ledger().is_empty());
    }

    #[test]
    fn future_activity_may_still_be_skipped() {
        let today = date(2024, 1, 3);
        let tomorrow = date(2024, 1, 4);
        let mut plan = plan_with_trip(date(2024, 1, 1), today);
        let id = plan.activities(tomorrow).unwrap().evening[0].id.clone();

        let change = plan
            .set_status(tomorrow, TimeOfDay::Evening, &id, Skipped)
            .unwrap();

        assert_eq!(change.delta, 0);
        assert_eq!(plan.energy_on(tomorrow), 100);
    }

    #[test]
    fn past_activity_may_be_completed() {
        let today = date(2024, 1, 3);
        let yesterday = date(2024, 1, 2);
        let mut plan = plan_with_trip(date(2024, 1, 1), today);
        let id = plan.activities(yesterday).unwrap().afternoon[0].id.clone();

        plan.set_status(yesterday, TimeOfDay::Afternoon, &id, Completed)
            .unwrap();

        assert!(plan.energy_on(yesterday) < 100);
        assert_eq!(plan.energy_on(today), 100);
    }

    #[test]
    fn undoing_a_completion_restores_energy() {
        let today = date(2024, 1, 1);
        let mut plan = plan_with_trip(today, today);
        let id = plan.activities(today).unwrap().morning[1].id.clone();

        plan.set_status(today, TimeOfDay::Morning, &id, Completed)
            .unwrap();
        plan.set_status(today, TimeOfDay::Morning, &id, Pending)
            .unwrap();

        assert_eq!(plan.energy_on(today), 100);
    }

    #[test]
    fn skipping_before_completing_costs_the_same() {
        let today = date(2024, 1, 1);
        let mut direct = plan_with_trip(today, today);
        let mut via_skip = plan_with_trip(today, today);
        let id = direct.activities(today).unwrap().evening[0].id.clone();

        direct
            .set_status(today, TimeOfDay::Evening, &id, Completed)
            .unwrap();
        via_skip
            .set_status(today, TimeOfDay::Evening, &id, Skipped)
            .unwrap();
        via_skip
            .set_status(today, TimeOfDay::Evening, &id, Completed)
            .unwrap();

        assert_eq!(direct.energy_on(today), via_skip.energy_on(today));
        assert_eq!(direct.table(), via_skip.table());
    }

    #[test]
    fn unknown_activity_changes_nothing() {
        let today = date(2024, 1, 1);
        let mut plan = plan_with_trip(today, today);
        let before = plan.table().clone();

        let err = plan
            .set_status(today, TimeOfDay::Morning, "nope", Completed)
            .unwrap_err();

        assert!(matches!(err, PlanError::UnknownActivity { .. }));
        assert_eq!(plan.table(), &before);
        assert!(plan.ledger().is_empty());
    }

    #[test]
    fn activity_is_looked_up_in_the_named_bucket() {
        let today = date(2024, 1, 1);
        let mut plan = plan_with_trip(today, today);
        let morning_id = plan.activities(today).unwrap().morning[0].id.clone();

        let err = plan
            .set_status(today, TimeOfDay::Evening, &morning_id, Completed)
            .unwrap_err();

        assert!(matches!(err, PlanError::UnknownActivity { .. }));
    }

    #[test]
    fn energy_bottoms_out_at_zero() {
        let today = date(2024, 1, 1);
        let mut plan = plan_with_trip(today, today);
        let ids: Vec<_> = plan
            .activities(today)
            .unwrap()
            .iter()
            .map(|(t, a)| (t, a.id.clone()))
            .collect();
        assert!(plan.activities(today).unwrap().total_cost() > 100);

        for (t, id) in &ids {
            plan.set_status(today, *t, id, Completed).unwrap();
        }
        assert_eq!(plan.energy_on(today), 0);

        // Refunds start from the clamped level, not from below zero.
        let (t, id) = &ids[0];
        let change = plan.set_status(today, *t, id, Skipped).unwrap();
        assert_eq!(change.energy, 15);
    }

    #[test]
    fn without_trip_every_date_shows_day0() {
        let today = date(2024, 1, 3);
        let plan = plan_without_trip(today);

        assert_eq!(plan.focused(), today);
        for offset in [-10_i64, 0, 1, 7, 365] {
            let target = today.saturating_add(offset.days());
            assert_eq!(plan.day_key(target), DayKey::new(0));
        }
        assert_eq!(
            plan.activities(date(2030, 6, 1)).unwrap().morning[0].id,
            "m1-d0"
        );
    }

    #[test]
    fn starts_on_trip_start_and_navigates() {
        let start = date(2024, 1, 1);
        let mut plan = plan_with_trip(start, date(2024, 1, 3));

        assert_eq!(plan.focused(), start);
        assert_eq!(plan.next_day(), date(2024, 1, 2));
        assert_eq!(plan.previous_day(), start);
        assert_eq!(plan.previous_day(), date(2023, 12, 31));
        assert_eq!(plan.day_key(plan.focused()), DayKey::new(5));
    }

    #[test]
    fn current_energy_follows_focus() {
        let today = date(2024, 1, 2);
        let mut plan = plan_with_trip(date(2024, 1, 1), today);
        let id = plan.activities(today).unwrap().morning[0].id.clone();
        plan.set_status(today, TimeOfDay::Morning, &id, Completed)
            .unwrap();

        assert_eq!(plan.current_energy(), 100);
        plan.next_day();
        assert_eq!(plan.current_energy(), 85);
        plan.next_day();
        assert_eq!(plan.current_energy(), 100);
    }

    #[test]
    fn reset_day_refunds_completions() {
        let today = date(2024, 1, 1);
        let mut plan = plan_with_trip(today, today);
        let day = plan.activities(today).unwrap().clone();
        plan.set_status(today, TimeOfDay::Morning, &day.morning[0].id, Completed)
            .unwrap();
        plan.set_status(today, TimeOfDay::Afternoon, &day.afternoon[0].id, Skipped)
            .unwrap();

        let changes = plan.reset_day(today).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(plan.energy_on(today), 100);
        assert_eq!(plan.activities(today).unwrap(), &day);
    }

    #[test]
    fn summary_counts_statuses() {
        let today = date(2024, 1, 1);
        let mut plan = plan_with_trip(today, today);
        let day = plan.activities(today).unwrap().clone();
        plan.set_status(today, TimeOfDay::Morning, &day.morning[0].id, Completed)
            .unwrap();
        plan.set_status(today, TimeOfDay::Morning, &day.morning[1].id, Skipped)
            .unwrap();

        let summary = plan.summary(today).unwrap();
        assert_eq!(summary.day_key, DayKey::new(0));
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.pending, day.iter().count() - 2);
        assert_eq!(summary.spent_cost, 15);
        assert_eq!(summary.planned_cost, day.total_cost());
        assert_eq!(summary.energy, 85);
        assert_eq!(summary.band, EnergyBand::High);
    }

    #[test]
    fn missing_template_is_reported() {
        let today = date(2024, 1, 1);
        let mut table = TemplateTable::new();
        table.insert(DayKey::new(0), DayActivities::default());
        let session = Session::new(ProfileId::default(), Some(trip_from(today)));
        let plan = DailyPlan::new(session, table, EnergyLedger::new(), today);

        let err = plan.activities(date(2024, 1, 2)).unwrap_err();
        assert!(matches!(err, PlanError::MissingTemplate(key) if key == DayKey::new(1)));
    }
}
