//! CLI interface for BioSync.
//!
//! Each invocation is one activation of the daily plan: state is read from the
//! store, at most one action is applied, and changes are written back only by
//! commands that save.
//!
//! - `biosync trip new|show|clear`: the current trip.
//! - `biosync profile list|use`: which traveller's templates apply.
//! - `biosync plan show|mark|reset`: the daily plan for a date.
//! - `biosync energy`: the energy level for a date.
//!
//! Dates are ISO dates (`2024-01-03`) and default to today.

mod format;
mod plan;
mod trip;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Zoned;
use jiff::civil::Date;

use crate::config::Config;
use crate::model::{ActivityStatus, ProfileId, TimeOfDay};
use crate::plan::{DailyPlan, TemplateRegistry};
use crate::storage::{KeyValueStore, PlanRepository};

/// BioSync: daily travel plans that keep track of your energy.
#[derive(Debug, Parser)]
#[command(name = "biosync", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: a trip day by day
  1. biosync trip new --name "Cracow" --destination "Cracow, Poland" --start 2024-01-01 --end 2024-01-06
  2. biosync plan show
  3. biosync plan mark morning m1-d0 completed
  4. biosync energy

Other days:
  biosync plan show --date 2024-01-04
  biosync plan mark evening e1-d2 skipped --date 2024-01-04"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the current trip.
    Trip {
        #[command(subcommand)]
        command: TripCommand,
    },

    /// Choose whose itinerary templates are used.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Show and update the daily plan.
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },

    /// Show the energy level for a date.
    Energy {
        /// Date to show (defaults to today).
        #[arg(long)]
        date: Option<Date>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TripCommand {
    /// Create the current trip, replacing any existing one.
    New {
        #[arg(long)]
        name: String,

        #[arg(long)]
        destination: String,

        /// First day of the trip (defaults to today).
        #[arg(long)]
        start: Option<Date>,

        /// Last day of the trip (defaults to the first day).
        #[arg(long)]
        end: Option<Date>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Show the current trip.
    Show,

    /// Delete the current trip and all of its plan state.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// List the available profiles.
    List,

    /// Switch to a profile.
    Use {
        /// Profile id, e.g. `user2`.
        profile: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlanCommand {
    /// Show the activities for a date.
    Show {
        /// Date to show (defaults to today).
        #[arg(long)]
        date: Option<Date>,
    },

    /// Change the status of one activity and save the plan.
    ///
    /// Activities on future dates cannot be completed.
    Mark {
        #[arg(value_enum)]
        time_of_day: TimeOfDayArg,

        /// Activity id, as shown by `plan show`.
        activity: String,

        #[arg(value_enum)]
        status: StatusArg,

        /// Date the activity belongs to (defaults to today).
        #[arg(long)]
        date: Option<Date>,
    },

    /// Put every activity of a date back to pending and save the plan.
    Reset {
        /// Date to reset (defaults to today).
        #[arg(long)]
        date: Option<Date>,
    },
}

/// CLI-facing time of day, mapped to the domain `TimeOfDay`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimeOfDayArg {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDayArg {
    fn to_domain(self) -> TimeOfDay {
        match self {
            Self::Morning => TimeOfDay::Morning,
            Self::Afternoon => TimeOfDay::Afternoon,
            Self::Evening => TimeOfDay::Evening,
        }
    }
}

/// CLI-facing activity status, mapped to the domain `ActivityStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// Not done yet.
    Pending,
    /// Done; spends the activity's energy.
    Completed,
    /// Left out.
    Skipped,
}

impl StatusArg {
    fn to_domain(self) -> ActivityStatus {
        match self {
            Self::Pending => ActivityStatus::Pending,
            Self::Completed => ActivityStatus::Completed,
            Self::Skipped => ActivityStatus::Skipped,
        }
    }
}

/// What every command runs against.
struct Context<'a, S> {
    config: &'a Config,
    registry: &'a TemplateRegistry,
    repo: &'a PlanRepository<S>,
    today: Date,
}

impl<S: KeyValueStore> Context<'_, S> {
    /// Loads the daily plan as it stands in the store.
    fn activate(&self) -> Result<DailyPlan, String> {
        self.repo
            .activate(self.registry, &self.config.default_profile, self.today)
            .map_err(|e| format!("failed to load plan: {e}"))
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run<S: KeyValueStore>(
    config: &Config,
    registry: &TemplateRegistry,
    repo: &PlanRepository<S>,
) -> Result<(), String> {
    let cli = Cli::parse();
    let ctx = Context {
        config,
        registry,
        repo,
        today: Zoned::now().date(),
    };

    match cli.command {
        Command::Trip { command } => match command {
            TripCommand::New {
                name,
                destination,
                start,
                end,
                description,
            } => trip::cmd_new(&ctx, name, destination, start, end, description),
            TripCommand::Show => trip::cmd_show(&ctx),
            TripCommand::Clear => trip::cmd_clear(&ctx),
        },
        Command::Profile { command } => match command {
            ProfileCommand::List => cmd_profile_list(&ctx),
            ProfileCommand::Use { profile } => cmd_profile_use(&ctx, &profile),
        },
        Command::Plan { command } => match command {
            PlanCommand::Show { date } => plan::cmd_show(&ctx, date),
            PlanCommand::Mark {
                time_of_day,
                activity,
                status,
                date,
            } => plan::cmd_mark(
                &ctx,
                date,
                time_of_day.to_domain(),
                &activity,
                status.to_domain(),
            ),
            PlanCommand::Reset { date } => plan::cmd_reset(&ctx, date),
        },
        Command::Energy { date } => plan::cmd_energy(&ctx, date),
    }
}

fn cmd_profile_list<S: KeyValueStore>(ctx: &Context<'_, S>) -> Result<(), String> {
    let session = ctx
        .repo
        .load_session(&ctx.config.default_profile)
        .map_err(|e| format!("failed to load session: {e}"))?;

    for profile in ctx.registry.profiles() {
        let marker = if *profile == session.profile { "*" } else { " " };
        println!("{marker} {profile}");
    }
    Ok(())
}

fn cmd_profile_use<S: KeyValueStore>(ctx: &Context<'_, S>, profile: &str) -> Result<(), String> {
    let profile = ProfileId::new(profile);
    if !ctx.registry.contains(&profile) {
        let known: Vec<&str> = ctx.registry.profiles().map(ProfileId::as_str).collect();
        return Err(format!(
            "unknown profile '{profile}' (available: {})",
            known.join(", ")
        ));
    }

    let previous = ctx
        .repo
        .load_session(&ctx.config.default_profile)
        .map_err(|e| format!("failed to load session: {e}"))?
        .profile;
    let saved_plan = ctx
        .repo
        .has_saved_plan()
        .map_err(|e| format!("failed to read plan: {e}"))?;

    ctx.repo
        .set_profile(&profile)
        .map_err(|e| format!("failed to switch profile: {e}"))?;
    eprintln!("Now planning as {profile}");
    if saved_plan && previous != profile {
        eprintln!(
            "Note: the saved plan from {previous} is kept and still applies; \
             run `biosync trip clear` to start from {profile}'s templates."
        );
    }
    Ok(())
}
