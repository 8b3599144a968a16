//! Robot types: the fleet's telemetry records.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side length of the square operating grid. Every coordinate lives in `[0, GRID_SIZE]`.
pub const GRID_SIZE: f64 = 30.0;

/// Speed restored by a resume command.
pub const NOMINAL_SPEED: f64 = 1.2;

/// A simulated robot and its live telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Robot {
    /// Stable unique key, e.g. `robot-milo`.
    pub id: String,

    /// Display label.
    pub name: String,

    /// Charge percentage in `[0, 100]`.
    pub battery: f64,

    pub status: RobotStatus,

    pub position: Point,

    pub goal: Point,

    /// Non-negative scalar; zeroed on pause and stop.
    pub speed: f64,

    /// Compass bearing in degrees, `[0, 360)`.
    pub heading: f64,

    /// Seconds remaining to the goal.
    pub eta: u32,

    pub current_task: String,

    /// Newest first.
    pub task_history: Vec<Task>,
}

impl Robot {
    pub fn is_online(&self) -> bool {
        self.status == RobotStatus::Online
    }
}

/// Operational state of a robot.
///
/// Drives whether the simulation advances motion and which controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RobotStatus {
    Online,
    Offline,
    Error,
    Maintenance,
}

impl RobotStatus {
    /// The lowercase wire name, also used as the status sort key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Error => "error",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coordinate on the operating grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into the grid bound.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, GRID_SIZE),
            y: self.y.clamp(0.0, GRID_SIZE),
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An entry in a robot's task history.
///
/// Immutable once created, except for `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub task: String,
    pub timestamp: Timestamp,
    pub status: TaskStatus,
}

impl Task {
    /// A freshly assigned task, stamped now.
    pub fn in_progress(task: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            task: task.into(),
            timestamp,
            status: TaskStatus::InProgress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Completed,
    InProgress,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
        }
    }
}
