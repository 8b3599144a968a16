//! Core data model for fleetdeck.
//!
//! Plain records: robots with their telemetry and task history,
//! notifications, and the UI preferences that shape the derived view.
//! Nothing here mutates itself; changes flow through commands and the tick.

mod notification;
mod preferences;
mod robot;

pub use notification::{Notification, NotificationKind};
pub use preferences::{FilterKey, Preferences, SortKey};
pub use robot::{GRID_SIZE, NOMINAL_SPEED, Point, Robot, RobotStatus, Task, TaskStatus};
