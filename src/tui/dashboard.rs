//! The terminal UI's render target: the latest synced snapshot.

use crate::model::{Notification, Robot};
use crate::render::Render;

/// What the screen shows, as of the last sync.
///
/// Holds copies, so drawing never needs to look into the fleet.
#[derive(Debug, Default)]
pub struct Dashboard {
    robots: Vec<Robot>,
    notifications: Vec<Notification>,
    detail: Option<Robot>,
    error: Option<String>,
}

impl Dashboard {
    /// The derived robot list.
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn detail(&self) -> Option<&Robot> {
        self.detail.as_ref()
    }

    /// A validation message waiting to be acknowledged.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

impl Render for Dashboard {
    fn render_robot_list(&mut self, robots: &[&Robot]) {
        self.robots = robots.iter().map(|r| (*r).clone()).collect();
    }

    fn render_notification_list(&mut self, notifications: &[Notification]) {
        self.notifications = notifications.to_vec();
    }

    fn render_robot_detail(&mut self, robot: Option<&Robot>) {
        self.detail = robot.cloned();
    }

    fn show_validation_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::fleet::Fleet;
    use crate::render::sync;

    #[test]
    fn sync_replaces_snapshot() {
        let mut fleet = Fleet::seeded(Timestamp::now());
        let mut dashboard = Dashboard::default();
        sync(&fleet, &mut dashboard);
        assert_eq!(dashboard.robots().len(), 2);
        assert_eq!(dashboard.notifications().len(), 4);
        assert!(dashboard.detail().is_none());

        fleet.clear_notifications();
        fleet.set_selected(Some("robot-milo".into()));
        sync(&fleet, &mut dashboard);
        assert!(dashboard.notifications().is_empty());
        assert_eq!(dashboard.detail().unwrap().name, "milo");
    }

    #[test]
    fn error_waits_until_dismissed() {
        let mut dashboard = Dashboard::default();
        dashboard.show_validation_error("Please fill in all fields");
        assert_eq!(dashboard.error(), Some("Please fill in all fields"));
        dashboard.dismiss_error();
        assert!(dashboard.error().is_none());
    }
}
