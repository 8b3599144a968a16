//! Command handlers: the operator's synchronous state transitions.
//!
//! Each handler is a single atomic update to the fleet. Robot commands
//! append a notification describing what happened. Commands that name an
//! unknown robot or notification do nothing and report [`Outcome::Ignored`].

use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fleet::Fleet;
use crate::model::{
    FilterKey, GRID_SIZE, NOMINAL_SPEED, Notification, NotificationKind, Point, RobotStatus,
    SortKey, Task,
};

/// ETA range, in seconds, drawn for a new goal.
///
/// A placeholder estimate; there is no path planning behind it.
const GOAL_ETA_SECS: std::ops::Range<u32> = 60..360;

/// Rejected operator input. Nothing was mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingField,

    #[error("Coordinates must be between 0 and 30")]
    OutOfRange,
}

/// Whether a command changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The target id matched nothing; the fleet is unchanged.
    Ignored,
}

/// Every operation an operator can issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Command {
    Pause { robot_id: String },
    Resume { robot_id: String },
    EmergencyStop { robot_id: String },

    /// Raw goal form input; validated before anything changes.
    SetGoal {
        robot_id: String,
        x: String,
        y: String,
        task: String,
    },

    DismissNotification { id: Uuid },
    ClearAllNotifications,

    SetSort { sort: SortKey },
    SetFilter { filter: FilterKey },

    /// Open the detail view for a robot.
    Select { robot_id: String },
    CloseDetail,
}

/// Apply a command to the fleet.
pub fn apply(
    fleet: &mut Fleet,
    command: &Command,
    rng: &mut impl Rng,
    now: Timestamp,
) -> Result<Outcome, ValidationError> {
    let outcome = match command {
        Command::Pause { robot_id } => pause(fleet, robot_id, now),
        Command::Resume { robot_id } => resume(fleet, robot_id, now),
        Command::EmergencyStop { robot_id } => emergency_stop(fleet, robot_id, now),
        Command::SetGoal {
            robot_id,
            x,
            y,
            task,
        } => {
            let request = GoalRequest::parse(robot_id, x, y, task)?;
            set_goal(fleet, &request, rng, now)
        }
        Command::DismissNotification { id } => dismiss_notification(fleet, *id),
        Command::ClearAllNotifications => clear_all_notifications(fleet),
        Command::SetSort { sort } => {
            fleet.preferences_mut().sort = *sort;
            Outcome::Applied
        }
        Command::SetFilter { filter } => {
            fleet.preferences_mut().filter = *filter;
            Outcome::Applied
        }
        Command::Select { robot_id } => {
            if fleet.robot(robot_id).is_none() {
                Outcome::Ignored
            } else {
                fleet.set_selected(Some(robot_id.clone()));
                Outcome::Applied
            }
        }
        Command::CloseDetail => {
            fleet.set_selected(None);
            Outcome::Applied
        }
    };

    if outcome == Outcome::Ignored {
        tracing::debug!(?command, "command target not found");
    }
    Ok(outcome)
}

/// Take a robot offline and stop it.
pub fn pause(fleet: &mut Fleet, robot_id: &str, now: Timestamp) -> Outcome {
    transition(
        fleet,
        robot_id,
        RobotStatus::Offline,
        0.0,
        NotificationKind::Info,
        |name| format!("Robot {name} has been paused"),
        now,
    )
}

/// Bring a robot back online at nominal speed. The only recovery from an emergency stop.
pub fn resume(fleet: &mut Fleet, robot_id: &str, now: Timestamp) -> Outcome {
    transition(
        fleet,
        robot_id,
        RobotStatus::Online,
        NOMINAL_SPEED,
        NotificationKind::Success,
        |name| format!("Robot {name} has been resumed"),
        now,
    )
}

/// Halt a robot and put it in the error state.
pub fn emergency_stop(fleet: &mut Fleet, robot_id: &str, now: Timestamp) -> Outcome {
    transition(
        fleet,
        robot_id,
        RobotStatus::Error,
        0.0,
        NotificationKind::Error,
        |name| format!("Emergency stop activated for {name}"),
        now,
    )
}

fn transition(
    fleet: &mut Fleet,
    robot_id: &str,
    status: RobotStatus,
    speed: f64,
    kind: NotificationKind,
    message: impl FnOnce(&str) -> String,
    now: Timestamp,
) -> Outcome {
    let Some(robot) = fleet.robot_mut(robot_id) else {
        return Outcome::Ignored;
    };
    robot.status = status;
    robot.speed = speed;
    let message = message(&robot.name);

    tracing::info!(id = robot_id, %status, "robot status changed");
    fleet.push_notification(Notification::new(kind, message, Some(robot_id), now));
    Outcome::Applied
}

/// A validated goal assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalRequest {
    pub robot_id: String,
    pub x: i64,
    pub y: i64,
    pub task: String,
}

impl GoalRequest {
    /// Validate raw form input.
    ///
    /// Coordinates are read the way a browser form reads them: a leading
    /// integer, so `"12"` and `"12.7"` both give 12 and `"abc"` is missing.
    pub fn parse(robot_id: &str, x: &str, y: &str, task: &str) -> Result<Self, ValidationError> {
        let robot_id = robot_id.trim();
        let task = task.trim();
        let (Some(x), Some(y)) = (parse_leading_int(x), parse_leading_int(y)) else {
            return Err(ValidationError::MissingField);
        };
        if robot_id.is_empty() || task.is_empty() {
            return Err(ValidationError::MissingField);
        }

        let bound = 0..=GRID_SIZE as i64;
        if !bound.contains(&x) || !bound.contains(&y) {
            return Err(ValidationError::OutOfRange);
        }

        Ok(Self {
            robot_id: robot_id.to_string(),
            x,
            y,
            task: task.to_string(),
        })
    }
}

/// Assign a new goal and task to a robot.
pub fn set_goal(
    fleet: &mut Fleet,
    request: &GoalRequest,
    rng: &mut impl Rng,
    now: Timestamp,
) -> Outcome {
    let Some(robot) = fleet.robot_mut(&request.robot_id) else {
        return Outcome::Ignored;
    };

    robot.goal = Point::new(request.x as f64, request.y as f64);
    robot.current_task.clone_from(&request.task);
    robot.eta = rng.random_range(GOAL_ETA_SECS);
    robot.task_history.insert(0, Task::in_progress(&request.task, now));
    let message = format!("New goal set for {}: {}", robot.name, request.task);

    tracing::info!(
        id = %request.robot_id,
        x = request.x,
        y = request.y,
        eta = robot.eta,
        "goal assigned"
    );
    fleet.push_notification(Notification::new(
        NotificationKind::Info,
        message,
        Some(&request.robot_id),
        now,
    ));
    Outcome::Applied
}

/// Remove one notification. Dismissing an absent id is not an error.
pub fn dismiss_notification(fleet: &mut Fleet, id: Uuid) -> Outcome {
    if fleet.remove_notification(id) {
        Outcome::Applied
    } else {
        Outcome::Ignored
    }
}

pub fn clear_all_notifications(fleet: &mut Fleet) -> Outcome {
    fleet.clear_notifications();
    Outcome::Applied
}

/// Read a leading, optionally signed, base-10 integer after any whitespace.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // A run of digits only fails to parse by overflowing; saturate so it reads as out of range.
    Some(rest[..digits].parse::<i64>().map_or(sign * i64::MAX, |n| sign * n))
}
