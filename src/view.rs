//! Derivation layer: the filtered, sorted robot list shown on screen.
//!
//! The derived view is never the system of record. It borrows from the
//! fleet and is recomputed after every mutation.

pub mod format;

use std::cmp::Ordering;

use crate::model::{Preferences, Robot, SortKey};

/// Filter then sort `robots` according to `prefs`.
///
/// Sorting is stable: robots with equal keys keep their fleet order.
pub fn derive_view<'a>(robots: &'a [Robot], prefs: &Preferences) -> Vec<&'a Robot> {
    let mut view: Vec<&Robot> = robots
        .iter()
        .filter(|r| prefs.filter.admits(r.status))
        .collect();

    view.sort_by(|a, b| compare(a, b, prefs.sort));
    view
}

fn compare(a: &Robot, b: &Robot, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Battery => b.battery.total_cmp(&a.battery),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::fleet::Fleet;
    use crate::model::{FilterKey, RobotStatus};

    fn robots() -> Vec<Robot> {
        let template = Fleet::seeded(Timestamp::now()).robots()[0].clone();
        let make = |id: &str, name: &str, battery: f64, status: RobotStatus| Robot {
            id: id.into(),
            name: name.into(),
            battery,
            status,
            ..template.clone()
        };
        vec![
            make("r1", "zeta", 50.0, RobotStatus::Online),
            make("r2", "alpha", 90.0, RobotStatus::Offline),
            make("r3", "mike", 50.0, RobotStatus::Error),
            make("r4", "bravo", 10.0, RobotStatus::Online),
            make("r5", "delta", 50.0, RobotStatus::Online),
        ]
    }

    fn ids(view: &[&Robot]) -> Vec<String> {
        view.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn filter_all_keeps_every_robot() {
        let robots = robots();
        let view = derive_view(&robots, &Preferences::default());
        assert_eq!(view.len(), robots.len());
    }

    #[test]
    fn filter_online_keeps_only_online() {
        let robots = robots();
        let prefs = Preferences {
            filter: FilterKey::Online,
            ..Preferences::default()
        };
        let view = derive_view(&robots, &prefs);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|r| r.status == RobotStatus::Online));
    }

    #[test]
    fn filter_with_no_matches_is_empty() {
        let robots = robots();
        let prefs = Preferences {
            filter: FilterKey::Maintenance,
            ..Preferences::default()
        };
        assert!(derive_view(&robots, &prefs).is_empty());
    }

    #[test]
    fn sort_by_name_is_ascending() {
        let robots = robots();
        let view = derive_view(&robots, &Preferences::default());
        let names: Vec<&str> = view.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alpha", "bravo", "delta", "mike", "zeta"]);
    }

    #[test]
    fn sort_by_battery_is_descending_and_stable() {
        let robots = robots();
        let prefs = Preferences {
            sort: SortKey::Battery,
            ..Preferences::default()
        };
        let view = derive_view(&robots, &prefs);
        assert!(view.windows(2).all(|w| w[0].battery >= w[1].battery));
        // The three 50% robots keep fleet order.
        assert_eq!(ids(&view), ["r2", "r1", "r3", "r5", "r4"]);
    }

    #[test]
    fn sort_by_status_is_ascending_and_stable() {
        let robots = robots();
        let prefs = Preferences {
            sort: SortKey::Status,
            ..Preferences::default()
        };
        let view = derive_view(&robots, &prefs);
        assert_eq!(ids(&view), ["r3", "r2", "r1", "r4", "r5"]);
    }

    #[test]
    fn derive_does_not_reorder_source() {
        let robots = robots();
        let before = ids(&robots.iter().collect::<Vec<_>>());
        let _ = derive_view(&robots, &Preferences::default());
        assert_eq!(ids(&robots.iter().collect::<Vec<_>>()), before);
    }
}
