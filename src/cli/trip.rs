//! Trip commands: new, show, clear.

use jiff::civil::Date;

use crate::model::{NewTrip, Trip, TripPreferences};
use crate::storage::KeyValueStore;

use super::Context;
use super::format::{format_date, format_trip_position};

pub(super) fn cmd_new<S: KeyValueStore>(
    ctx: &Context<'_, S>,
    name: String,
    destination: String,
    start: Option<Date>,
    end: Option<Date>,
    description: Option<String>,
) -> Result<(), String> {
    let trip = Trip::create(
        NewTrip {
            name,
            description,
            destination,
            start_date: start,
            end_date: end,
            preferences: TripPreferences::default(),
        },
        ctx.today,
    )
    .map_err(|e| format!("invalid trip: {e}"))?;

    ctx.repo
        .create_trip(&trip)
        .map_err(|e| format!("failed to create trip: {e}"))?;

    println!("{}", trip.id);
    eprintln!(
        "Trip to {} from {} to {} ({} days)",
        trip.destination,
        format_date(trip.start_date),
        format_date(trip.end_date),
        trip.length_days()
    );
    Ok(())
}

pub(super) fn cmd_show<S: KeyValueStore>(ctx: &Context<'_, S>) -> Result<(), String> {
    let session = ctx
        .repo
        .load_session(&ctx.config.default_profile)
        .map_err(|e| format!("failed to load session: {e}"))?;

    let Some(trip) = session.trip else {
        println!("No trip");
        return Ok(());
    };

    println!("{}  {}", trip.name, trip.destination);
    if let Some(description) = &trip.description {
        println!("{description}");
    }
    println!(
        "{} – {} ({} days)",
        format_date(trip.start_date),
        format_date(trip.end_date),
        trip.length_days()
    );
    println!("{}", format_trip_position(&trip, ctx.today));
    println!("Profile: {}", session.profile);
    Ok(())
}

pub(super) fn cmd_clear<S: KeyValueStore>(ctx: &Context<'_, S>) -> Result<(), String> {
    ctx.repo
        .clear_trip()
        .map_err(|e| format!("failed to clear trip: {e}"))?;
    eprintln!("Trip cleared");
    Ok(())
}
