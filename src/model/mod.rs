//! Core data model for BioSync.
//!
//! These types mirror what is persisted in the key-value store:
//! activities grouped into days, day templates, trips, and the session
//! that ties a profile to its current trip.

mod activity;
mod session;
mod template;
mod trip;

pub use activity::{Activity, ActivityStatus, DayActivities, TimeOfDay};
pub use session::{ProfileId, Session};
pub use template::{DayKey, TemplateTable};
pub use trip::{
    NewTrip, Trip, TripError, TripPreferences, TripStatus, days_between, parse_trip_date,
};
