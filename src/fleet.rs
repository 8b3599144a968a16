//! The fleet: the single state container for everything the dashboard shows.
//!
//! One `Fleet` is built at startup and handed by reference to the
//! derivation layer, the command handlers and the simulation tick.
//! Fields are private; readers use the accessors, writers go through
//! `command` and `simulation`.

mod seed;

use serde::Serialize;
use uuid::Uuid;

use crate::model::{Notification, Preferences, Robot};

/// Robots, notifications, view preferences and the detail selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fleet {
    robots: Vec<Robot>,
    notifications: Vec<Notification>,
    preferences: Preferences,
    selected: Option<String>,
}

impl Fleet {
    /// Builds a fleet from explicit parts.
    ///
    /// Robot ids must be unique; duplicates after the first are dropped.
    pub fn new(robots: Vec<Robot>, notifications: Vec<Notification>) -> Self {
        let mut unique: Vec<Robot> = Vec::with_capacity(robots.len());
        for robot in robots {
            if unique.iter().any(|r| r.id == robot.id) {
                tracing::warn!(id = %robot.id, "dropping robot with duplicate id");
                continue;
            }
            unique.push(robot);
        }
        Self {
            robots: unique,
            notifications,
            preferences: Preferences::default(),
            selected: None,
        }
    }

    /// Sets the initial view preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    // ── Reads ──

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    /// Newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    pub fn robot(&self, id: &str) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == id)
    }

    /// Id of the robot in the detail view, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Resolves the selection against the current records.
    ///
    /// Returns `None` if nothing is selected or the id no longer matches a robot.
    pub fn selected(&self) -> Option<&Robot> {
        self.selected_id().and_then(|id| self.robot(id))
    }

    // ── Writes (crate-internal) ──

    pub(crate) fn robot_mut(&mut self, id: &str) -> Option<&mut Robot> {
        self.robots.iter_mut().find(|r| r.id == id)
    }

    pub(crate) fn robots_mut(&mut self) -> &mut [Robot] {
        &mut self.robots
    }

    /// Inserts at the front, keeping the feed newest first.
    pub(crate) fn push_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    /// Removes one notification. Returns whether anything was removed.
    pub(crate) fn remove_notification(&mut self, id: Uuid) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    pub(crate) fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub(crate) fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub(crate) fn set_selected(&mut self, id: Option<String>) {
        self.selected = id;
    }
}
