//! UI preference state: how the robot list is filtered and ordered.

use serde::{Deserialize, Serialize};

use super::RobotStatus;

/// Process-wide, transient view preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Preferences {
    pub sort: SortKey,
    pub filter: FilterKey,
}

/// Ordering applied to the derived robot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Ascending by name.
    #[default]
    Name,
    /// Descending by battery.
    Battery,
    /// Ascending by status string.
    Status,
}

impl SortKey {
    /// The next key in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Battery,
            Self::Battery => Self::Status,
            Self::Status => Self::Name,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Battery => "battery",
            Self::Status => "status",
        }
    }
}

/// Which robots the derived list keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKey {
    #[default]
    All,
    Online,
    Offline,
    Error,
    Maintenance,
}

impl FilterKey {
    /// Whether a robot with `status` passes this filter.
    pub fn admits(self, status: RobotStatus) -> bool {
        match self {
            Self::All => true,
            Self::Online => status == RobotStatus::Online,
            Self::Offline => status == RobotStatus::Offline,
            Self::Error => status == RobotStatus::Error,
            Self::Maintenance => status == RobotStatus::Maintenance,
        }
    }

    /// The next filter in display order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Online,
            Self::Online => Self::Offline,
            Self::Offline => Self::Error,
            Self::Error => Self::Maintenance,
            Self::Maintenance => Self::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Error => "error",
            Self::Maintenance => "maintenance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_admits_every_status() {
        for status in [
            RobotStatus::Online,
            RobotStatus::Offline,
            RobotStatus::Error,
            RobotStatus::Maintenance,
        ] {
            assert!(FilterKey::All.admits(status));
        }
    }

    #[test]
    fn status_filter_admits_only_its_status() {
        assert!(FilterKey::Error.admits(RobotStatus::Error));
        assert!(!FilterKey::Error.admits(RobotStatus::Online));
        assert!(!FilterKey::Online.admits(RobotStatus::Maintenance));
    }

    #[test]
    fn cycling_returns_to_start() {
        let mut sort = SortKey::Name;
        for _ in 0..3 {
            sort = sort.next();
        }
        assert_eq!(sort, SortKey::Name);

        let mut filter = FilterKey::All;
        for _ in 0..5 {
            filter = filter.next();
        }
        assert_eq!(filter, FilterKey::All);
    }

    #[test]
    fn preferences_parse_from_kebab_case() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"sort":"battery","filter":"maintenance"}"#).unwrap();
        assert_eq!(prefs.sort, SortKey::Battery);
        assert_eq!(prefs.filter, FilterKey::Maintenance);
    }
}
