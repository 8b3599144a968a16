//! The engine: single writer for the fleet.
//!
//! Commands and ticks each run to completion against the whole model and
//! are followed by a sync to the renderer. [`Engine`] takes `&mut self`
//! for every mutation, so nothing can interleave. [`SharedEngine`] puts the
//! same engine behind a mutex so a [`Ticker`] thread and a command source
//! can share it, one transaction at a time.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use jiff::Timestamp;
use parking_lot::Mutex;
use rand::rngs::StdRng;

use crate::command::{self, Command, Outcome, ValidationError};
use crate::fleet::Fleet;
use crate::render::{self, Render};
use crate::simulation::{self, TickReport};

/// Owns the fleet, the random source and the renderer.
pub struct Engine<R> {
    fleet: Fleet,
    rng: StdRng,
    renderer: R,
}

impl<R: Render> Engine<R> {
    /// Builds the engine and performs the initial render.
    pub fn new(fleet: Fleet, rng: StdRng, renderer: R) -> Self {
        let mut engine = Self {
            fleet,
            rng,
            renderer,
        };
        engine.sync();
        engine
    }

    /// Apply one command, then re-render if anything changed.
    ///
    /// Validation failures are shown through the renderer and returned.
    pub fn dispatch(&mut self, command: &Command) -> Result<Outcome, ValidationError> {
        match command::apply(&mut self.fleet, command, &mut self.rng, Timestamp::now()) {
            Ok(Outcome::Applied) => {
                self.sync();
                Ok(Outcome::Applied)
            }
            Ok(Outcome::Ignored) => Ok(Outcome::Ignored),
            Err(e) => {
                tracing::info!(error = %e, "command rejected");
                self.renderer.show_validation_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Advance the simulation by one tick, then re-render.
    pub fn tick(&mut self) -> TickReport {
        let report = simulation::tick(&mut self.fleet, &mut self.rng);
        self.sync();
        report
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn sync(&mut self) {
        render::sync(&self.fleet, &mut self.renderer);
    }
}

/// An engine shared between threads behind a single mutex.
pub struct SharedEngine<R> {
    inner: Arc<Mutex<Engine<R>>>,
}

impl<R> Clone for SharedEngine<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Render> SharedEngine<R> {
    pub fn new(engine: Engine<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn dispatch(&self, command: &Command) -> Result<Outcome, ValidationError> {
        self.inner.lock().dispatch(command)
    }

    pub fn tick(&self) -> TickReport {
        self.inner.lock().tick()
    }

    /// Run `f` with exclusive access to the engine.
    pub fn with<T>(&self, f: impl FnOnce(&mut Engine<R>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}

/// The ticker thread panicked before reaching its limit.
#[derive(Debug, thiserror::Error)]
#[error("ticker thread panicked")]
pub struct TickerPanicked;

/// Background thread that ticks a shared engine on a fixed period.
///
/// Runs until dropped, or until `limit` ticks have fired.
pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl Ticker {
    pub fn spawn<R>(engine: SharedEngine<R>, period: Duration, limit: Option<u64>) -> Self
    where
        R: Render + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let mut fired = 0;
            while limit.is_none_or(|max| fired < max) {
                match stopped.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        engine.tick();
                        fired += 1;
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!(fired, "ticker stopped");
            fired
        });
        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Block until the ticker reaches its limit. Returns the number of ticks fired,
    /// or `TickerPanicked` if the thread died first.
    ///
    /// Without a limit this blocks until the thread is stopped elsewhere,
    /// which never happens; only call it on a limited ticker.
    pub fn wait(mut self) -> Result<u64, TickerPanicked> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| TickerPanicked),
            None => Ok(0),
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
