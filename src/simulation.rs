//! Simulation tick: the only autonomous mutator of robot telemetry.
//!
//! Each tick drains batteries a little, and jitters position and counts
//! down ETA for robots that are online. Robots in any other state keep
//! their position and ETA.

use rand::Rng;

use crate::fleet::Fleet;
use crate::model::{Point, Robot};

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 3000;

/// Largest battery drain per tick, in percentage points.
const MAX_DRAIN: f64 = 0.5;

/// Largest position jitter per axis per tick.
const MAX_JITTER: f64 = 0.25;

/// Why a robot was left out of a tick.
#[derive(Debug, thiserror::Error)]
pub enum TickFault {
    #[error("battery reading is not finite: {0}")]
    Battery(f64),

    #[error("position is not finite: ({}, {})", .0.x, .0.y)]
    Position(Point),
}

/// Summary of a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: usize,
    pub skipped: usize,
}

/// Advance every robot by one tick.
///
/// A robot whose telemetry is corrupt is skipped and logged; the rest still advance.
pub fn tick(fleet: &mut Fleet, rng: &mut impl Rng) -> TickReport {
    let mut report = TickReport::default();
    for robot in fleet.robots_mut() {
        match advance(robot, rng) {
            Ok(()) => report.advanced += 1,
            Err(fault) => {
                tracing::warn!(id = %robot.id, %fault, "skipping robot for this tick");
                report.skipped += 1;
            }
        }
    }
    tracing::debug!(advanced = report.advanced, skipped = report.skipped, "tick");
    report
}

/// Advance one robot. Leaves the robot untouched on error.
fn advance(robot: &mut Robot, rng: &mut impl Rng) -> Result<(), TickFault> {
    if !robot.battery.is_finite() {
        return Err(TickFault::Battery(robot.battery));
    }
    if !robot.position.is_finite() {
        return Err(TickFault::Position(robot.position));
    }

    let drain = rng.random_range(0.0..MAX_DRAIN);
    robot.battery = (robot.battery - drain).clamp(0.0, 100.0);

    if robot.is_online() {
        let dx = rng.random_range(-MAX_JITTER..MAX_JITTER);
        let dy = rng.random_range(-MAX_JITTER..MAX_JITTER);
        robot.position = Point::new(robot.position.x + dx, robot.position.y + dy).clamped();
        robot.eta = robot.eta.saturating_sub(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::model::RobotStatus;

    fn fleet_with_statuses(statuses: &[RobotStatus]) -> Fleet {
        let template = Fleet::seeded(Timestamp::now()).robots()[0].clone();
        let robots = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Robot {
                id: format!("robot-{i}"),
                name: format!("r{i}"),
                status: *status,
                ..template.clone()
            })
            .collect();
        Fleet::new(robots, Vec::new())
    }

    #[test]
    fn battery_stays_in_range_and_never_increases() {
        let mut fleet = Fleet::seeded(Timestamp::now());
        let mut rng = StdRng::seed_from_u64(7);

        let mut previous: Vec<f64> = fleet.robots().iter().map(|r| r.battery).collect();
        for _ in 0..500 {
            tick(&mut fleet, &mut rng);
            for (robot, before) in fleet.robots().iter().zip(&previous) {
                assert!((0.0..=100.0).contains(&robot.battery));
                assert!(robot.battery <= *before);
            }
            previous = fleet.robots().iter().map(|r| r.battery).collect();
        }
        // 500 ticks drain far more than 89%.
        assert!(fleet.robots().iter().all(|r| r.battery == 0.0));
    }

    #[test]
    fn non_online_robots_are_frozen() {
        let mut fleet = fleet_with_statuses(&[
            RobotStatus::Offline,
            RobotStatus::Error,
            RobotStatus::Maintenance,
        ]);
        let before: Vec<(Point, u32)> =
            fleet.robots().iter().map(|r| (r.position, r.eta)).collect();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..20 {
            tick(&mut fleet, &mut rng);
        }

        let after: Vec<(Point, u32)> =
            fleet.robots().iter().map(|r| (r.position, r.eta)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn online_robots_move_within_grid_and_count_down() {
        let mut fleet = fleet_with_statuses(&[RobotStatus::Online]);
        fleet.robots_mut()[0].position = Point::new(0.0, 30.0);
        fleet.robots_mut()[0].eta = 2;
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..5 {
            tick(&mut fleet, &mut rng);
            let p = fleet.robots()[0].position;
            assert!((0.0..=30.0).contains(&p.x));
            assert!((0.0..=30.0).contains(&p.y));
        }
        assert_eq!(fleet.robots()[0].eta, 0);
    }

    #[test]
    fn jitter_is_bounded_per_tick() {
        let mut fleet = fleet_with_statuses(&[RobotStatus::Online]);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let before = fleet.robots()[0].position;
            tick(&mut fleet, &mut rng);
            let after = fleet.robots()[0].position;
            assert!((after.x - before.x).abs() <= MAX_JITTER + 1e-9);
            assert!((after.y - before.y).abs() <= MAX_JITTER + 1e-9);
        }
    }

    #[test]
    fn corrupt_robot_is_skipped_and_others_advance() {
        let mut fleet = fleet_with_statuses(&[RobotStatus::Online, RobotStatus::Online]);
        fleet.robots_mut()[0].battery = f64::NAN;
        let eta_before = fleet.robots()[0].eta;
        let mut rng = StdRng::seed_from_u64(5);

        let report = tick(&mut fleet, &mut rng);

        assert_eq!(report, TickReport { advanced: 1, skipped: 1 });
        assert_eq!(fleet.robots()[0].eta, eta_before);
        assert_eq!(fleet.robots()[1].eta, eta_before - 1);
    }

    #[test]
    fn tick_emits_no_notifications() {
        let mut fleet = Fleet::seeded(Timestamp::now());
        let before = fleet.notifications().len();
        let mut rng = StdRng::seed_from_u64(9);
        tick(&mut fleet, &mut rng);
        assert_eq!(fleet.notifications().len(), before);
    }
}
