//! Display formatting for telemetry and notifications.
//!
//! Pure helpers shared by the terminal UI and the text renderer.

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::model::{GRID_SIZE, NotificationKind, Point, RobotStatus};

/// Battery charge band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryTier {
    High,
    Medium,
    Low,
}

impl BatteryTier {
    pub fn of(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Self::High
        } else if percentage >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::High | Self::Medium => "🔋",
            Self::Low => "🪫",
        }
    }
}

/// Battery percentage rounded for display, e.g. `"67%"`.
pub fn battery_label(percentage: f64) -> String {
    format!("{}%", percentage.round() as i64)
}

/// ETA as `minutes:seconds`, seconds zero-padded.
pub fn format_eta(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

const DIRECTIONS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Eight-point compass direction for a heading in degrees.
pub fn compass(degrees: f64) -> &'static str {
    let index = (degrees / 45.0).round().rem_euclid(8.0) as usize;
    DIRECTIONS[index % 8]
}

/// How long ago `timestamp` was, relative to `now`.
///
/// Under a minute reads "Just now", under an hour "`N`m ago", otherwise
/// the wall-clock time.
pub fn relative_time(timestamp: Timestamp, now: Timestamp) -> String {
    let minutes = now.duration_since(timestamp).as_secs() / 60;
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    clock_time(timestamp)
}

/// Wall-clock `HH:MM` in the system time zone.
pub fn clock_time(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::system())
        .strftime("%H:%M")
        .to_string()
}

/// Badge label and icon for a status.
pub fn status_badge(status: RobotStatus) -> (&'static str, &'static str) {
    match status {
        RobotStatus::Online => ("Online", "🟢"),
        RobotStatus::Offline => ("Offline", "⚫"),
        RobotStatus::Error => ("Error", "⚠️"),
        RobotStatus::Maintenance => ("Maintenance", "🔧"),
    }
}

pub fn notification_icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Info => "ℹ️",
        NotificationKind::Success => "✅",
        NotificationKind::Warning => "⚠️",
        NotificationKind::Error => "❌",
    }
}

pub fn notification_count(count: usize) -> String {
    format!("{count} notifications")
}

/// Coordinates as `(x, y)` with one decimal place.
pub fn point(p: Point) -> String {
    format!("({:.1}, {:.1})", p.x, p.y)
}

/// Project a grid point onto a `width` × `height` cell grid.
///
/// Returns `(column, row)`; both are clamped to the last cell.
pub fn minimap_cell(p: Point, width: u16, height: u16) -> (u16, u16) {
    let project = |v: f64, cells: u16| {
        if cells == 0 {
            return 0;
        }
        let max = cells - 1;
        let scaled = (v.clamp(0.0, GRID_SIZE) / GRID_SIZE * f64::from(max)).round();
        (scaled as u16).min(max)
    };
    (project(p.x, width), project(p.y, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::SignedDuration;

    #[test]
    fn battery_tiers_follow_thresholds() {
        assert_eq!(BatteryTier::of(100.0), BatteryTier::High);
        assert_eq!(BatteryTier::of(80.0), BatteryTier::High);
        assert_eq!(BatteryTier::of(79.9), BatteryTier::Medium);
        assert_eq!(BatteryTier::of(40.0), BatteryTier::Medium);
        assert_eq!(BatteryTier::of(39.9), BatteryTier::Low);
        assert_eq!(BatteryTier::of(0.0), BatteryTier::Low);
    }

    #[test]
    fn battery_label_rounds() {
        assert_eq!(battery_label(66.6), "67%");
        assert_eq!(battery_label(0.2), "0%");
    }

    #[test]
    fn eta_pads_seconds() {
        assert_eq!(format_eta(280), "4:40");
        assert_eq!(format_eta(65), "1:05");
        assert_eq!(format_eta(0), "0:00");
        assert_eq!(format_eta(9), "0:09");
    }

    #[test]
    fn compass_rounds_to_nearest_point() {
        assert_eq!(compass(0.0), "N");
        assert_eq!(compass(65.0), "NE");
        assert_eq!(compass(90.0), "E");
        assert_eq!(compass(112.4), "E");
        assert_eq!(compass(225.0), "SW");
        assert_eq!(compass(22.4), "N");
        assert_eq!(compass(22.5), "NE");
        assert_eq!(compass(350.0), "N");
    }

    #[test]
    fn relative_time_bands() {
        let now = Timestamp::now();
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(
            relative_time(now - SignedDuration::from_secs(59), now),
            "Just now"
        );
        assert_eq!(
            relative_time(now - SignedDuration::from_mins(5), now),
            "5m ago"
        );
        assert_eq!(
            relative_time(now - SignedDuration::from_mins(59), now),
            "59m ago"
        );

        let old = now - SignedDuration::from_mins(90);
        assert_eq!(relative_time(old, now), clock_time(old));
    }

    #[test]
    fn clock_time_is_hours_and_minutes() {
        let text = clock_time(Timestamp::now());
        assert_eq!(text.len(), 5);
        assert_eq!(text.as_bytes()[2], b':');
    }

    #[test]
    fn notification_count_label() {
        assert_eq!(notification_count(0), "0 notifications");
        assert_eq!(notification_count(4), "4 notifications");
    }

    #[test]
    fn minimap_corners_map_to_grid_corners() {
        assert_eq!(minimap_cell(Point::new(0.0, 0.0), 16, 8), (0, 0));
        assert_eq!(minimap_cell(Point::new(30.0, 30.0), 16, 8), (15, 7));
        assert_eq!(minimap_cell(Point::new(15.0, 15.0), 11, 11), (5, 5));
        assert_eq!(minimap_cell(Point::new(15.0, 15.0), 0, 0), (0, 0));
    }
}
