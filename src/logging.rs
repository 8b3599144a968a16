//! Tracing setup.
//!
//! The filter comes from `FLEETDECK_LOG` (e.g. `fleetdeck=debug`) and
//! defaults to `info`. The terminal UI owns the screen, so it logs to a
//! file; the plain CLI logs to stderr.

use std::fs;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_ENV: &str = "FLEETDECK_LOG";

/// Where log lines go.
pub enum Target {
    Stderr,
    /// `~/.fleetdeck/fleetdeck.log`, or nowhere if that can't be opened.
    File,
}

pub fn init(target: &Target) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match target {
        Target::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .try_init();
        }
        Target::File => match open_log_file() {
            Some(file) => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
            }
            None => {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(io::sink)
                    .try_init();
            }
        },
    }
}

fn open_log_file() -> Option<fs::File> {
    let dir = Config::dir()?;
    fs::create_dir_all(&dir).ok()?;
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("fleetdeck.log"))
        .ok()
}
