//! Output formatting for CLI display.

use jiff::civil::Date;

use crate::model::{Activity, ActivityStatus, Trip};
use crate::plan::DaySummary;

/// `Wednesday, Jan 3 2024`
pub(super) fn format_date(date: Date) -> String {
    date.strftime("%A, %b %-d %Y").to_string()
}

pub(super) fn format_status_marker(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Pending => "[ ]",
        ActivityStatus::Completed => "[x]",
        ActivityStatus::Skipped => "[-]",
    }
}

/// One activity as a short block: status, id, time, title, then details.
pub(super) fn format_activity(activity: &Activity) -> String {
    let mut out = format!(
        "  {} {:<10} {:<22} {} ({} energy)",
        format_status_marker(activity.status),
        activity.id,
        activity.time,
        activity.title,
        activity.energy_cost,
    );
    if !activity.tags.is_empty() {
        out.push_str(&format!("\n      tags: {}", activity.tags.join(", ")));
    }
    if !activity.alternatives.is_empty() {
        out.push_str(&format!(
            "\n      alternatives: {}",
            activity.alternatives.join(", ")
        ));
    }
    out
}

pub(super) fn format_summary(summary: &DaySummary) -> String {
    format!(
        "{}  energy {}% ({})  done {}  skipped {}  pending {}  spent {}/{}",
        summary.day_key,
        summary.energy,
        summary.band,
        summary.completed,
        summary.skipped,
        summary.pending,
        summary.spent_cost,
        summary.planned_cost,
    )
}

/// Where `today` falls relative to the trip.
pub(super) fn format_trip_position(trip: &Trip, today: Date) -> String {
    match trip.day_number(today) {
        Some(n) => format!("Day {n} of {}", trip.length_days()),
        None if today < trip.start_date => "Not started yet".to_string(),
        None => "Finished".to_string(),
    }
}
