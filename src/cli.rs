//! CLI interface for fleetdeck.
//!
//! With no subcommand (or `dash`) the interactive dashboard opens.
//! The other subcommands are headless: they seed a fresh fleet, do one
//! thing to it, and print the result.

mod format;

use std::io;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Timestamp;

use crate::command::{Command as FleetCommand, Outcome};
use crate::config::Config;
use crate::engine::{Engine, SharedEngine, Ticker};
use crate::fleet::Fleet;
use crate::model::{FilterKey, SortKey};
use crate::tui;
use crate::view::derive_view;

use format::TextRender;

/// fleetdeck — watch and steer a simulated robot fleet.
#[derive(Debug, Parser)]
#[command(name = "fleetdeck", after_long_help = USAGE_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

const USAGE_HELP: &str = r"Dashboard keys:
  ↑↓ select robot   ⏎ details   s sort   f filter
  p pause   r resume   e e-stop   g set goal
  n notifications (d dismiss, c clear all)   q quit

Headless:
  fleetdeck list --sort battery --filter online
  fleetdeck goal robot-milo 10 10 'Deliver package'
  fleetdeck watch --ticks 5 --interval-ms 500 --pause robot-maid";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive dashboard (default).
    Dash,

    /// Print the filtered, sorted robot list.
    List {
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        #[arg(long, value_enum)]
        filter: Option<FilterArg>,
    },

    /// Print the detail view for one robot.
    Show {
        /// Robot id, e.g. `robot-milo`.
        robot: String,
    },

    /// Run the simulation headless, printing the dashboard after each tick.
    Watch {
        /// How many ticks to run before exiting.
        #[arg(long, default_value_t = 3)]
        ticks: u64,

        /// Tick period. Defaults to `tick-interval-ms` from the config.
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Pause this robot before the first tick. Repeatable.
        #[arg(long)]
        pause: Vec<String>,

        /// Emergency-stop this robot before the first tick. Repeatable.
        #[arg(long)]
        stop: Vec<String>,
    },

    /// Run some ticks immediately and print the fleet as JSON.
    Snapshot {
        #[arg(long, default_value_t = 0)]
        ticks: u64,
    },

    /// Assign a goal to a robot and print the outcome.
    Goal {
        robot: String,
        x: String,
        y: String,
        task: String,
    },
}

/// CLI-facing sort key, mapped to the domain `SortKey`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Battery,
    Status,
}

impl SortArg {
    fn to_domain(self) -> SortKey {
        match self {
            Self::Name => SortKey::Name,
            Self::Battery => SortKey::Battery,
            Self::Status => SortKey::Status,
        }
    }
}

/// CLI-facing filter, mapped to the domain `FilterKey`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    Online,
    Offline,
    Error,
    Maintenance,
}

impl FilterArg {
    fn to_domain(self) -> FilterKey {
        match self {
            Self::All => FilterKey::All,
            Self::Online => FilterKey::Online,
            Self::Offline => FilterKey::Offline,
            Self::Error => FilterKey::Error,
            Self::Maintenance => FilterKey::Maintenance,
        }
    }
}

impl Cli {
    /// Whether this invocation opens the terminal UI.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Dash))
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    match cli.command.unwrap_or(Command::Dash) {
        Command::Dash => tui::run(config).map_err(|e| format!("dashboard failed: {e}")),
        Command::List { sort, filter } => cmd_list(config, sort, filter),
        Command::Show { robot } => cmd_show(config, &robot),
        Command::Watch {
            ticks,
            interval_ms,
            pause,
            stop,
        } => {
            let period = interval_ms.map_or_else(|| config.tick_interval(), Duration::from_millis);
            let commands: Vec<FleetCommand> = pause
                .into_iter()
                .map(|robot_id| FleetCommand::Pause { robot_id })
                .chain(
                    stop.into_iter()
                        .map(|robot_id| FleetCommand::EmergencyStop { robot_id }),
                )
                .collect();
            cmd_watch(config, ticks, period, &commands)
        }
        Command::Snapshot { ticks } => cmd_snapshot(config, ticks),
        Command::Goal { robot, x, y, task } => cmd_goal(config, robot, x, y, task),
    }
}

fn seeded_fleet(config: &Config) -> Fleet {
    Fleet::seeded(Timestamp::now()).with_preferences(config.preferences())
}

fn cmd_list(
    config: &Config,
    sort: Option<SortArg>,
    filter: Option<FilterArg>,
) -> Result<(), String> {
    let fleet = seeded_fleet(config);
    let mut prefs = fleet.preferences();
    if let Some(sort) = sort {
        prefs.sort = sort.to_domain();
    }
    if let Some(filter) = filter {
        prefs.filter = filter.to_domain();
    }

    let view = derive_view(fleet.robots(), &prefs);
    let mut out = TextRender::new(io::stdout().lock());
    out.robot_list(&view).map_err(|e| format!("failed to write: {e}"))
}

fn cmd_show(config: &Config, robot_id: &str) -> Result<(), String> {
    let fleet = seeded_fleet(config);
    let robot = fleet
        .robot(robot_id)
        .ok_or_else(|| format!("no robot with id '{robot_id}'"))?;
    let mut out = TextRender::new(io::stdout().lock());
    out.robot_detail(robot)
        .map_err(|e| format!("failed to write: {e}"))
}

fn cmd_watch(
    config: &Config,
    ticks: u64,
    period: Duration,
    commands: &[FleetCommand],
) -> Result<(), String> {
    if period.is_zero() {
        return Err("--interval-ms must be greater than zero".to_string());
    }
    let engine = Engine::new(seeded_fleet(config), config.rng(), TextRender::new(io::stdout()));
    let shared = SharedEngine::new(engine);

    for command in commands {
        if shared.dispatch(command).map_err(|e| e.to_string())? == Outcome::Ignored {
            eprintln!("Ignoring {command:?}: no such robot");
        }
    }

    let fired = Ticker::spawn(shared.clone(), period, Some(ticks))
        .wait()
        .map_err(|e| e.to_string())?;
    tracing::info!(fired, "watch finished");

    match shared.with(|e| e.renderer().error()) {
        Some(err) => Err(format!("failed to write: {err}")),
        None => Ok(()),
    }
}

fn cmd_snapshot(config: &Config, ticks: u64) -> Result<(), String> {
    let mut engine = Engine::new(seeded_fleet(config), config.rng(), TextRender::new(io::sink()));
    for _ in 0..ticks {
        engine.tick();
    }

    let json = serde_json::to_string_pretty(engine.fleet())
        .map_err(|e| format!("failed to serialize fleet: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_goal(
    config: &Config,
    robot: String,
    x: String,
    y: String,
    task: String,
) -> Result<(), String> {
    let mut engine = Engine::new(seeded_fleet(config), config.rng(), TextRender::new(io::sink()));
    let command = FleetCommand::SetGoal {
        robot_id: robot.clone(),
        x,
        y,
        task,
    };

    match engine.dispatch(&command).map_err(|e| e.to_string())? {
        Outcome::Ignored => Err(format!("no robot with id '{robot}'")),
        Outcome::Applied => {
            let mut out = TextRender::new(io::stdout().lock());
            let fleet = engine.fleet();
            out.notification_list(&fleet.notifications()[..1])
                .and_then(|()| match fleet.robot(&robot) {
                    Some(r) => out.robot_detail(r),
                    None => Ok(()),
                })
                .map_err(|e| format!("failed to write: {e}"))
        }
    }
}
