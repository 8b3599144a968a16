//! fleetdeck configuration.
//!
//! Loaded from `~/.fleetdeck/config.toml`. A missing file means defaults.
//!
//! ```toml
//! tick-interval-ms = 3000
//! rng-seed = 42
//! default-sort = "battery"
//! default-filter = "online"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::model::{FilterKey, Preferences, SortKey};
use crate::simulation::DEFAULT_TICK_INTERVAL_MS;

/// Environment variable that overrides `rng-seed`.
pub const SEED_ENV: &str = "FLEETDECK_SEED";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// fleetdeck configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Simulation tick period.
    pub tick_interval_ms: u64,

    /// Fixed seed for reproducible runs. Entropy when absent.
    pub rng_seed: Option<u64>,

    pub default_sort: SortKey,

    pub default_filter: FilterKey,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            rng_seed: None,
            default_sort: SortKey::default(),
            default_filter: FilterKey::default(),
        }
    }
}

impl Config {
    /// Load config from `~/.fleetdeck/config.toml`, then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(seed) = env::var(SEED_ENV)
            && !seed.is_empty()
        {
            let seed = seed
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{SEED_ENV}={seed:?}: {e}")))?;
            config.rng_seed = Some(seed);
        }

        Ok(config)
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(format!(
                "tick-interval-ms must be greater than zero in {}",
                path.display()
            )));
        }

        Ok(config)
    }

    /// The config directory: `~/.fleetdeck/`.
    pub fn dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fleetdeck"))
    }

    /// The config file path: `~/.fleetdeck/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            sort: self.default_sort,
            filter: self.default_filter,
        }
    }

    /// The random source for a run: seeded if configured, otherwise from entropy.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use tempfile::TempDir;

    fn write(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(3000));
    }

    #[test]
    fn parses_all_keys() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "tick-interval-ms = 500\n\
             rng-seed = 9\n\
             default-sort = \"battery\"\n\
             default-filter = \"online\"\n",
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tick_interval_ms, 500);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(
            config.preferences(),
            Preferences {
                sort: SortKey::Battery,
                filter: FilterKey::Online,
            }
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "default-sort = \"status\"\n");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_sort, SortKey::Status);
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn zero_interval_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tick-interval-ms = 0\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "tick-rate = 5\n");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = Config {
            rng_seed: Some(123),
            ..Config::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
