//! `famcal` CLI - query calendar windows, selections, participant stats, and
//! day layouts from a JSON snapshot.
//!
//! ## Usage
//!
//! ```sh
//! # Window a view displays for an anchor date
//! famcal window --view week --anchor 2025-12-02
//!
//! # Step the anchor (prev / next / today)
//! famcal advance --view month --anchor 2025-01-31 --direction next
//!
//! # Events visible to u1 and u2 this week
//! famcal select --data family.json --participants u1,u2 --view week --anchor 2025-12-02
//!
//! # Per-participant counts for the month
//! famcal stats --data family.json --view month --anchor 2025-12-02
//!
//! # Overlap layout for one day
//! famcal layout --data family.json --day 2025-12-01 --clustering connected
//!
//! # View models
//! famcal day --data family.json --anchor 2025-12-01
//! famcal month --data family.json --anchor 2025-12-02
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `-v`/`-vv`) to see engine decisions on stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use famcal_engine::stats::apply_stats;
use famcal_engine::views::{
    day_list, month_grid, next_week_range, schedule_day, week_columns, DayColumn,
};
use famcal_engine::{
    advance, aggregate_participant_stats, layout_day_with, parse_instant, resolve_window,
    select_by_participants, select_in_window, CalendarSnapshot, ClusterMode, Direction,
    LayoutOptions, ViewMode,
};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "famcal",
    version,
    about = "Family calendar engine CLI: windows, selection, stats, and day layout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Snapshot input plus the participant filter.
#[derive(Args)]
struct DataArgs {
    /// JSON file with `participants` and `events`
    #[arg(short, long)]
    data: PathBuf,
    /// Comma-separated active participant ids (all roster participants if omitted)
    #[arg(short, long)]
    participants: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the window a view displays for an anchor
    Window {
        #[arg(long, default_value = "Schedule")]
        view: ViewMode,
        /// Anchor date or datetime (YYYY-MM-DD[THH:MM[:SS]])
        #[arg(long)]
        anchor: String,
    },
    /// Step an anchor by one view unit, or reset it to now
    Advance {
        #[arg(long, default_value = "Schedule")]
        view: ViewMode,
        #[arg(long)]
        anchor: String,
        /// prev, next, or today
        #[arg(long)]
        direction: Direction,
        /// Pinned "current" instant (defaults to the local clock)
        #[arg(long)]
        now: Option<String>,
    },
    /// Print the events that pass the participant filter (and window, if given)
    Select {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long, requires = "anchor")]
        view: Option<ViewMode>,
        #[arg(long, requires = "view")]
        anchor: Option<String>,
    },
    /// Per-participant event counts over a view window
    Stats {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(long, default_value = "Schedule")]
        view: ViewMode,
        #[arg(long)]
        anchor: String,
    },
    /// Overlap layout of one day's timed events
    Layout {
        #[command(flatten)]
        data: DataArgs,
        /// Day to lay out (YYYY-MM-DD)
        #[arg(long)]
        day: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Day view list: events starting on the anchor day, all-day first
    Day {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        anchor: String,
    },
    /// Month grid view model
    Month {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        anchor: String,
        #[arg(long)]
        now: Option<String>,
    },
    /// Week columns view model
    Week {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        anchor: String,
        #[arg(long)]
        now: Option<String>,
    },
    /// Schedule day view model (all-day strip plus timed layout)
    Schedule {
        #[command(flatten)]
        data: DataArgs,
        #[arg(long)]
        anchor: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Pixels per hour in the day grid
    #[arg(long, default_value_t = famcal_engine::layout::DEFAULT_HOUR_HEIGHT)]
    hour_height: f64,
    /// per-event (default) or connected
    #[arg(long, default_value = "per-event")]
    clustering: ClusterMode,
}

impl LayoutArgs {
    fn options(&self) -> Result<LayoutOptions> {
        LayoutOptions::new(self.hour_height, self.clustering).context("Invalid --hour-height")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WeekOutput {
    columns: Vec<DayColumn>,
    next_week: (chrono::NaiveDate, chrono::NaiveDate),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Window { view, anchor } => {
            let anchor = instant(&anchor)?;
            print_json(&resolve_window(anchor, view))?;
        }
        Commands::Advance {
            view,
            anchor,
            direction,
            now,
        } => {
            let anchor = instant(&anchor)?;
            let now = now_or_clock(now.as_deref())?;
            print_json(&advance(anchor, view, direction, now))?;
        }
        Commands::Select { data, view, anchor } => {
            let snapshot = load_snapshot(&data.data)?;
            let mut events = active_events(&snapshot, data.participants.as_deref());
            if let (Some(view), Some(anchor)) = (view, anchor) {
                let window = resolve_window(instant(&anchor)?, view);
                events = select_in_window(&events, &window);
            }
            print_json(&events)?;
        }
        Commands::Stats { data, view, anchor } => {
            let snapshot = load_snapshot(&data)?;
            let window = resolve_window(instant(&anchor)?, view);
            let stats =
                aggregate_participant_stats(&snapshot.events, &window, &snapshot.participants);
            print_json(&apply_stats(&snapshot.participants, &stats))?;
        }
        Commands::Layout { data, day, layout } => {
            let snapshot = load_snapshot(&data.data)?;
            let events = active_events(&snapshot, data.participants.as_deref());
            let day = instant(&day)?.date();
            print_json(&layout_day_with(&events, day, &layout.options()?))?;
        }
        Commands::Day { data, anchor } => {
            let snapshot = load_snapshot(&data.data)?;
            let events = active_events(&snapshot, data.participants.as_deref());
            print_json(&day_list(instant(&anchor)?.date(), &events))?;
        }
        Commands::Month { data, anchor, now } => {
            let snapshot = load_snapshot(&data.data)?;
            let events = active_events(&snapshot, data.participants.as_deref());
            let today = now_or_clock(now.as_deref())?.date();
            print_json(&month_grid(instant(&anchor)?.date(), &events, today))?;
        }
        Commands::Week { data, anchor, now } => {
            let snapshot = load_snapshot(&data.data)?;
            let events = active_events(&snapshot, data.participants.as_deref());
            let today = now_or_clock(now.as_deref())?.date();
            let anchor = instant(&anchor)?.date();
            print_json(&WeekOutput {
                columns: week_columns(anchor, &events, today),
                next_week: next_week_range(anchor),
            })?;
        }
        Commands::Schedule {
            data,
            anchor,
            layout,
        } => {
            let snapshot = load_snapshot(&data.data)?;
            let events = active_events(&snapshot, data.participants.as_deref());
            let day = instant(&anchor)?.date();
            print_json(&schedule_day(day, &events, &layout.options()?))?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` flags pick the level (warn by default).
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn instant(s: &str) -> Result<NaiveDateTime> {
    parse_instant(s).with_context(|| format!("Invalid date/time: {}", s))
}

fn now_or_clock(now: Option<&str>) -> Result<NaiveDateTime> {
    match now {
        Some(s) => instant(s),
        None => Ok(Local::now().naive_local()),
    }
}

fn load_snapshot(path: &Path) -> Result<CalendarSnapshot> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    CalendarSnapshot::from_json(&json)
        .with_context(|| format!("Failed to parse calendar snapshot: {}", path.display()))
}

/// Apply the `--participants` filter.
///
/// Omitted means every roster participant is active; an empty string means
/// nobody is.
fn active_events(
    snapshot: &CalendarSnapshot,
    participants: Option<&str>,
) -> Vec<famcal_engine::Event> {
    let active: Vec<String> = match participants {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => snapshot.participant_ids(),
    };
    log::info!("active participants: {:?}", active);
    select_by_participants(&snapshot.events, &active)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", pretty);
    Ok(())
}
