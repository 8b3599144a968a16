//! Seed data: the fixed fleet the dashboard starts with.

use jiff::{SignedDuration, Timestamp};

use crate::model::{
    Notification, NotificationKind, Point, Robot, RobotStatus, Task, TaskStatus,
};

use super::Fleet;

impl Fleet {
    /// The demo fleet, with timestamps placed relative to `now`.
    pub fn seeded(now: Timestamp) -> Self {
        let ago = |minutes: i64| now - SignedDuration::from_mins(minutes);

        let robots = vec![
            Robot {
                id: "robot-maid".into(),
                name: "maid".into(),
                battery: 67.0,
                status: RobotStatus::Online,
                position: Point::new(8.0, 12.0),
                goal: Point::new(15.0, 18.0),
                speed: 0.9,
                heading: 65.0,
                eta: 280,
                current_task: "Cleaning living room area".into(),
                task_history: vec![
                    history("Working in food restaurant", ago(10), TaskStatus::InProgress),
                    history("Clean dining area", ago(30), TaskStatus::Completed),
                    history("Prepare food orders", ago(40), TaskStatus::Completed),
                ],
            },
            Robot {
                id: "robot-milo".into(),
                name: "milo".into(),
                battery: 89.0,
                status: RobotStatus::Online,
                position: Point::new(22.0, 8.0),
                goal: Point::new(18.0, 14.0),
                speed: 1.1,
                heading: 225.0,
                eta: 150,
                current_task: "Working in warehouse".into(),
                task_history: vec![
                    history("Working in warehouse", ago(5), TaskStatus::InProgress),
                    history("Package sorting", ago(15), TaskStatus::Completed),
                    history("Inventory management", ago(30), TaskStatus::Completed),
                ],
            },
        ];

        let notifications = vec![
            Notification::new(
                NotificationKind::Info,
                "milo started package delivery task",
                Some("robot-milo"),
                ago(5),
            ),
            Notification::new(
                NotificationKind::Success,
                "maid completed kitchen cleaning",
                Some("robot-maid"),
                ago(10),
            ),
            Notification::new(
                NotificationKind::Warning,
                "maid battery level moderate (67%)",
                Some("robot-maid"),
                ago(15),
            ),
            Notification::new(
                NotificationKind::Success,
                "milo navigation checkpoint reached",
                Some("robot-milo"),
                ago(20),
            ),
        ];

        Self::new(robots, notifications)
    }
}

fn history(task: &str, timestamp: Timestamp, status: TaskStatus) -> Task {
    Task {
        status,
        ..Task::in_progress(task, timestamp)
    }
}
