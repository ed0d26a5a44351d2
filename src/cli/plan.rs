//! Plan commands: show, mark, reset, and the energy readout.

use jiff::civil::Date;

use crate::model::{ActivityStatus, TimeOfDay};
use crate::plan::{DailyPlan, EnergyBand};
use crate::storage::KeyValueStore;

use super::Context;
use super::format::{format_activity, format_date, format_summary};

pub(super) fn cmd_show<S: KeyValueStore>(
    ctx: &Context<'_, S>,
    date: Option<Date>,
) -> Result<(), String> {
    let mut plan = ctx.activate()?;
    plan.focus_on(date.unwrap_or(ctx.today));
    print_day(&plan)
}

pub(super) fn cmd_mark<S: KeyValueStore>(
    ctx: &Context<'_, S>,
    date: Option<Date>,
    time_of_day: TimeOfDay,
    activity_id: &str,
    status: ActivityStatus,
) -> Result<(), String> {
    let date = date.unwrap_or(ctx.today);
    let mut plan = ctx.activate()?;
    plan.focus_on(date);
    let before = plan.energy_on(date);

    let change = plan
        .set_status(date, time_of_day, activity_id, status)
        .map_err(|e| e.to_string())?;

    ctx.repo
        .save(&plan)
        .map_err(|e| format!("failed to save plan: {e}"))?;

    let title = plan
        .activities(date)
        .ok()
        .and_then(|day| day.find(time_of_day, activity_id))
        .map_or(activity_id, |a| a.title.as_str());
    eprintln!(
        "{title}: {} → {} (energy {before}% → {}%)",
        change.previous, change.next, change.energy
    );
    Ok(())
}

pub(super) fn cmd_reset<S: KeyValueStore>(
    ctx: &Context<'_, S>,
    date: Option<Date>,
) -> Result<(), String> {
    let date = date.unwrap_or(ctx.today);
    let mut plan = ctx.activate()?;
    plan.focus_on(date);

    let changes = plan.reset_day(date).map_err(|e| e.to_string())?;
    if changes.is_empty() {
        eprintln!("Nothing to reset on {}", format_date(date));
        return Ok(());
    }

    ctx.repo
        .save(&plan)
        .map_err(|e| format!("failed to save plan: {e}"))?;
    eprintln!(
        "Reset {} activities on {} (energy {}%)",
        changes.len(),
        format_date(date),
        plan.current_energy()
    );
    Ok(())
}

pub(super) fn cmd_energy<S: KeyValueStore>(
    ctx: &Context<'_, S>,
    date: Option<Date>,
) -> Result<(), String> {
    let mut plan = ctx.activate()?;
    plan.focus_on(date.unwrap_or(ctx.today));

    let energy = plan.current_energy();
    println!("{energy}% ({})", EnergyBand::of(energy));
    Ok(())
}

fn print_day(plan: &DailyPlan) -> Result<(), String> {
    let date = plan.focused();
    let summary = plan.summary(date).map_err(|e| e.to_string())?;
    let day = plan.activities(date).map_err(|e| e.to_string())?;

    println!("{}", format_date(date));
    if plan.session().trip.is_none() {
        println!("No trip yet; showing the first day's template.");
    }
    println!("{}", format_summary(&summary));

    for time_of_day in TimeOfDay::ALL {
        let activities = day.bucket(time_of_day);
        if activities.is_empty() {
            continue;
        }
        println!();
        println!("{}", capitalize(time_of_day.as_str()));
        for activity in activities {
            println!("{}", format_activity(activity));
        }
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
