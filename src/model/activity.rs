//! Activity types: the unit of a daily plan.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an activity stands for the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    /// Not yet done. Every template activity starts here.
    #[default]
    Pending,

    /// Done; its energy cost has been spent.
    Completed,

    /// Deliberately left out.
    Skipped,
}

impl ActivityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The part of the day an activity is scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Display order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single planned activity.
///
/// Created from a day template; afterwards only `status` ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique within its day and time-of-day bucket.
    pub id: String,
    pub title: String,

    /// Display string, e.g. `"8:00 - 10:00 AM"`.
    pub time: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub alternatives: Vec<String>,

    #[serde(default)]
    pub status: ActivityStatus,

    /// Energy units consumed when the activity is completed.
    pub energy_cost: u32,
}

/// Activities of one day, grouped by time of day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivities {
    #[serde(default)]
    pub morning: Vec<Activity>,

    #[serde(default)]
    pub afternoon: Vec<Activity>,

    #[serde(default)]
    pub evening: Vec<Activity>,
}

impl DayActivities {
    pub fn bucket(&self, time_of_day: TimeOfDay) -> &[Activity] {
        match time_of_day {
            TimeOfDay::Morning => &self.morning,
            TimeOfDay::Afternoon => &self.afternoon,
            TimeOfDay::Evening => &self.evening,
        }
    }

    pub fn bucket_mut(&mut self, time_of_day: TimeOfDay) -> &mut Vec<Activity> {
        match time_of_day {
            TimeOfDay::Morning => &mut self.morning,
            TimeOfDay::Afternoon => &mut self.afternoon,
            TimeOfDay::Evening => &mut self.evening,
        }
    }

    pub fn find(&self, time_of_day: TimeOfDay, id: &str) -> Option<&Activity> {
        self.bucket(time_of_day).iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, time_of_day: TimeOfDay, id: &str) -> Option<&mut Activity> {
        self.bucket_mut(time_of_day).iter_mut().find(|a| a.id == id)
    }

    /// All activities in display order, tagged with their bucket.
    pub fn iter(&self) -> impl Iterator<Item = (TimeOfDay, &Activity)> {
        TimeOfDay::ALL
            .into_iter()
            .flat_map(move |t| self.bucket(t).iter().map(move |a| (t, a)))
    }

    /// Sum of the energy cost of every activity in the day.
    pub fn total_cost(&self) -> u32 {
        self.iter().map(|(_, a)| a.energy_cost).sum()
    }

    /// Sum of the energy cost of completed activities.
    pub fn completed_cost(&self) -> u32 {
        self.iter()
            .filter(|(_, a)| a.status == ActivityStatus::Completed)
            .map(|(_, a)| a.energy_cost)
            .sum()
    }

    pub fn count(&self, status: ActivityStatus) -> usize {
        self.iter().filter(|(_, a)| a.status == status).count()
    }

    pub fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty() && self.evening.is_empty()
    }
}
