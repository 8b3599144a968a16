//! Plain-text rendering for headless output.

use std::io::{self, Write};

use jiff::Timestamp;

use crate::model::{Notification, Robot};
use crate::render::{Render, motion_controls_enabled};
use crate::view::format::{
    BatteryTier, battery_label, clock_time, compass, format_eta, notification_count,
    notification_icon, point, relative_time, status_badge,
};

/// Writes each sync as plain text.
///
/// The `Render` methods can't return errors, so the first write failure is
/// kept and reported by [`TextRender::error`].
pub struct TextRender<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextRender<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// The first write error seen, if any.
    pub fn error(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn robot_list(&mut self, robots: &[&Robot]) -> io::Result<()> {
        if robots.is_empty() {
            return writeln!(self.out, "No robots match the current filter");
        }
        for robot in robots {
            let (label, icon) = status_badge(robot.status);
            let tier = BatteryTier::of(robot.battery);
            writeln!(
                self.out,
                "{:<10} {icon} {:<11} {} {:>4}  ETA {:>5}  {:<2}  {} → {}",
                robot.name,
                label,
                tier.icon(),
                battery_label(robot.battery),
                format_eta(robot.eta),
                compass(robot.heading),
                point(robot.position),
                point(robot.goal),
            )?;
            writeln!(self.out, "           Current task: {}", robot.current_task)?;
        }
        Ok(())
    }

    pub fn notification_list(&mut self, notifications: &[Notification]) -> io::Result<()> {
        writeln!(self.out, "{}", notification_count(notifications.len()))?;
        if notifications.is_empty() {
            return writeln!(self.out, "  No notifications");
        }
        let now = Timestamp::now();
        for n in notifications {
            writeln!(
                self.out,
                "  {} {}  ({})",
                notification_icon(n.kind),
                n.message,
                relative_time(n.timestamp, now)
            )?;
        }
        Ok(())
    }

    pub fn robot_detail(&mut self, robot: &Robot) -> io::Result<()> {
        let (label, icon) = status_badge(robot.status);
        writeln!(self.out, "{}  {icon} {label}", robot.name)?;
        writeln!(
            self.out,
            "  Battery:  {} {}",
            BatteryTier::of(robot.battery).icon(),
            battery_label(robot.battery)
        )?;
        writeln!(self.out, "  ETA:      {}", format_eta(robot.eta))?;
        writeln!(
            self.out,
            "  Heading:  {} ({:.0}°)",
            compass(robot.heading),
            robot.heading
        )?;
        writeln!(self.out, "  Speed:    {:.1}", robot.speed)?;
        writeln!(self.out, "  Position: {}", point(robot.position))?;
        writeln!(self.out, "  Goal:     {}", point(robot.goal))?;
        writeln!(self.out, "  Current task: {}", robot.current_task)?;
        writeln!(self.out, "  Task history:")?;
        for task in &robot.task_history {
            writeln!(
                self.out,
                "    {}  {:<32} [{}]",
                clock_time(task.timestamp),
                task.task,
                task.status.as_str()
            )?;
        }
        let motion = if motion_controls_enabled(robot) {
            "pause, resume, e-stop"
        } else {
            "e-stop (pause/resume disabled)"
        };
        writeln!(self.out, "  Controls: {motion}")
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result
            && self.error.is_none()
        {
            tracing::warn!(error = %e, "text render failed");
            self.error = Some(e);
        }
    }
}

impl<W: Write> Render for TextRender<W> {
    fn render_robot_list(&mut self, robots: &[&Robot]) {
        let result = writeln!(self.out, "── Fleet ──").and_then(|()| self.robot_list(robots));
        self.record(result);
    }

    fn render_notification_list(&mut self, notifications: &[Notification]) {
        let result = self.notification_list(notifications);
        self.record(result);
    }

    fn render_robot_detail(&mut self, robot: Option<&Robot>) {
        if let Some(robot) = robot {
            let result = self.robot_detail(robot);
            self.record(result);
        }
    }

    fn show_validation_error(&mut self, message: &str) {
        let result = writeln!(self.out, "! {message}");
        self.record(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fleet::Fleet;
    use crate::model::RobotStatus;
    use crate::render::sync;

    fn rendered(f: impl FnOnce(&mut TextRender<Vec<u8>>)) -> String {
        let mut render = TextRender::new(Vec::new());
        f(&mut render);
        String::from_utf8(render.into_inner()).unwrap()
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let text = rendered(|r| r.robot_list(&[]).unwrap());
        assert_eq!(text, "No robots match the current filter\n");
    }

    #[test]
    fn robot_line_shows_telemetry() {
        let fleet = Fleet::seeded(Timestamp::now());
        let maid = fleet.robot("robot-maid").unwrap();
        let text = rendered(|r| r.robot_list(&[maid]).unwrap());

        assert!(text.contains("maid"));
        assert!(text.contains("Online"));
        assert!(text.contains("67%"));
        assert!(text.contains("4:40"));
        assert!(text.contains("(8.0, 12.0) → (15.0, 18.0)"));
        assert!(text.contains("Current task: Cleaning living room area"));
    }

    #[test]
    fn empty_feed_shows_placeholder() {
        let text = rendered(|r| r.notification_list(&[]).unwrap());
        assert_eq!(text, "0 notifications\n  No notifications\n");
    }

    #[test]
    fn feed_lists_newest_first_with_relative_time() {
        let fleet = Fleet::seeded(Timestamp::now());
        let text = rendered(|r| r.notification_list(fleet.notifications()).unwrap());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "4 notifications");
        assert!(lines[1].contains("milo started package delivery task"));
        assert!(lines[1].contains("5m ago"));
        assert!(lines[4].contains("milo navigation checkpoint reached"));
    }

    #[test]
    fn detail_disables_motion_controls_when_not_online() {
        let fleet = Fleet::seeded(Timestamp::now());
        let mut milo = fleet.robot("robot-milo").unwrap().clone();

        let online = rendered(|r| r.robot_detail(&milo).unwrap());
        assert!(online.contains("Controls: pause, resume, e-stop"));
        assert!(online.contains("Heading:  SW (225°)"));
        assert!(online.contains("[in-progress]"));

        milo.status = RobotStatus::Error;
        let stopped = rendered(|r| r.robot_detail(&milo).unwrap());
        assert!(stopped.contains("pause/resume disabled"));
    }

    #[test]
    fn sync_writes_list_and_feed() {
        let fleet = Fleet::seeded(Timestamp::now());
        let text = rendered(|r| sync(&fleet, r));
        assert!(text.starts_with("── Fleet ──\n"));
        assert!(text.contains("4 notifications"));
    }

    #[test]
    fn validation_error_is_written() {
        let text = rendered(|r| r.show_validation_error("Please fill in all fields"));
        assert_eq!(text, "! Please fill in all fields\n");
    }
}
