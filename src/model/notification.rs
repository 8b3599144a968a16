//! Notifications: the operator-facing event feed.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the notification feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub message: String,

    pub timestamp: Timestamp,

    /// The robot this notification concerns. Lookup only; the feed never owns robots.
    pub robot_id: Option<String>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        robot_id: Option<&str>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            timestamp,
            robot_id: robot_id.map(String::from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}
