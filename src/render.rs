//! Render/sync layer: the interface every view implements.
//!
//! The core never draws anything itself. After each mutation it derives
//! fresh view state and hands it to a [`Render`] implementation through
//! [`sync`]. Renderers only read; they never touch the fleet.

use crate::fleet::Fleet;
use crate::model::{Notification, Robot};
use crate::view::derive_view;

/// A view that can display the dashboard.
pub trait Render {
    /// Replace the displayed robot list. An empty slice means the empty state.
    fn render_robot_list(&mut self, robots: &[&Robot]);

    /// Replace the displayed notification feed (newest first).
    fn render_notification_list(&mut self, notifications: &[Notification]);

    /// Show the detail view for `robot`, or hide it when `None`.
    fn render_robot_detail(&mut self, robot: Option<&Robot>);

    /// Tell the operator their input was rejected.
    fn show_validation_error(&mut self, message: &str);
}

/// Derive the current view from `fleet` and push it to `renderer`.
///
/// The detail view is resolved by id on every sync, so it follows the
/// live record rather than a stale copy.
pub fn sync(fleet: &Fleet, renderer: &mut impl Render) {
    let view = derive_view(fleet.robots(), &fleet.preferences());
    renderer.render_robot_list(&view);
    renderer.render_notification_list(fleet.notifications());
    renderer.render_robot_detail(fleet.selected());
}

/// Whether pause and resume are offered for `robot`.
pub fn motion_controls_enabled(robot: &Robot) -> bool {
    robot.is_online()
}

/// Records every call, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub robot_lists: Vec<Vec<String>>,
    pub notification_counts: Vec<usize>,
    pub details: Vec<Option<Robot>>,
    pub errors: Vec<String>,
}

#[cfg(test)]
impl Render for Recorder {
    fn render_robot_list(&mut self, robots: &[&Robot]) {
        self.robot_lists
            .push(robots.iter().map(|r| r.id.clone()).collect());
    }

    fn render_notification_list(&mut self, notifications: &[Notification]) {
        self.notification_counts.push(notifications.len());
    }

    fn render_robot_detail(&mut self, robot: Option<&Robot>) {
        self.details.push(robot.cloned());
    }

    fn show_validation_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::model::RobotStatus;

    #[test]
    fn sync_pushes_all_three_views() {
        let mut fleet = Fleet::seeded(Timestamp::now());
        fleet.set_selected(Some("robot-milo".into()));
        let mut recorder = Recorder::default();

        sync(&fleet, &mut recorder);

        assert_eq!(recorder.robot_lists, [vec!["robot-maid", "robot-milo"]]);
        assert_eq!(recorder.notification_counts, [4]);
        assert_eq!(recorder.details.len(), 1);
        assert_eq!(recorder.details[0].as_ref().unwrap().id, "robot-milo");
    }

    #[test]
    fn sync_hides_detail_without_selection() {
        let fleet = Fleet::seeded(Timestamp::now());
        let mut recorder = Recorder::default();
        sync(&fleet, &mut recorder);
        assert!(recorder.details[0].is_none());
    }

    #[test]
    fn motion_controls_follow_online_status() {
        let fleet = Fleet::seeded(Timestamp::now());
        let mut robot = fleet.robots()[0].clone();
        assert!(motion_controls_enabled(&robot));
        robot.status = RobotStatus::Error;
        assert!(!motion_controls_enabled(&robot));
    }
}
