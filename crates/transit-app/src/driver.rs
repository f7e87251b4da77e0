//! Periodic driver threads: the position tick and the metrics refresh.
//!
//! Each driver owns its own thread and RNG and loops until it receives
//! `DriverCommand::Shutdown` or its command channel disconnects. A driver
//! runs one unit of work to completion before waiting again, so ticks for
//! the same vehicle never overlap.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info};

use transit_sim::{SimConfig, TickEngine};

use crate::error::Result;
use crate::state::{AppState, DriverCommand};

/// A running driver thread and the sender used to stop it.
pub struct DriverHandle {
    name: &'static str,
    command_tx: mpsc::Sender<DriverCommand>,
    join: JoinHandle<()>,
}

impl DriverHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ask the driver to stop and wait for its thread to exit.
    pub fn shutdown(self) {
        let _ = self.command_tx.send(DriverCommand::Shutdown);
        self.wait();
    }

    /// Block until the driver thread exits on its own.
    pub fn wait(self) {
        if self.join.join().is_err() {
            error!(driver = self.name, "driver thread panicked");
        }
    }
}

/// Whether a unit of work succeeded, deciding the next wait.
enum Outcome {
    Done,
    Failed,
}

/// Spawns the position tick driver.
pub fn spawn_tick_driver(state: &AppState) -> Result<DriverHandle> {
    let sim_config = SimConfig {
        seed: state.derived_seed(1),
        ..state.config.sim_config()
    };
    let mut engine = TickEngine::new(state.store.clone(), sim_config);
    let interval = state.config.tick_interval();
    let backoff = state.config.tick_error_backoff();

    spawn_driver("transit-tick", interval, backoff, move || {
        match engine.tick(Utc::now()) {
            Ok(_) => Outcome::Done,
            Err(err) => {
                error!("error updating vehicle positions: {err}");
                Outcome::Failed
            }
        }
    })
}

/// Spawns the aggregate metrics driver.
pub fn spawn_metrics_driver(state: &AppState) -> Result<DriverHandle> {
    let store = state.store.clone();
    let metrics = state.metrics.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(state.derived_seed(2));
    let interval = state.config.metrics_interval();
    let backoff = state.config.metrics_error_backoff();

    spawn_driver("transit-metrics", interval, backoff, move || {
        match metrics.refresh(store.as_ref(), &mut rng, Utc::now()) {
            Ok(snapshot) => {
                debug!(active_vehicles = snapshot.active_vehicles, "metrics refreshed");
                Outcome::Done
            }
            Err(err) => {
                error!("error updating system metrics: {err}");
                Outcome::Failed
            }
        }
    })
}

fn spawn_driver<F>(
    name: &'static str,
    interval: Duration,
    backoff: Duration,
    work: F,
) -> Result<DriverHandle>
where
    F: FnMut() -> Outcome + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel::<DriverCommand>();

    let join = std::thread::Builder::new()
        .name(name.into())
        .spawn(move || {
            run_driver(name, interval, backoff, command_rx, work);
        })?;

    info!(driver = name, interval_ms = interval.as_millis() as u64, "driver started");
    Ok(DriverHandle {
        name,
        command_tx,
        join,
    })
}

/// The driver loop. Runs until Shutdown or channel disconnect.
fn run_driver<F>(
    name: &'static str,
    interval: Duration,
    backoff: Duration,
    command_rx: mpsc::Receiver<DriverCommand>,
    mut work: F,
) where
    F: FnMut() -> Outcome,
{
    let mut next_run = Instant::now();

    loop {
        let outcome = work();

        let now = Instant::now();
        let wait = match outcome {
            Outcome::Done => {
                next_run += interval;
                if now > next_run && now - next_run > interval * 2 {
                    // Too far behind; reset rather than run back-to-back.
                    next_run = now;
                }
                next_run.saturating_duration_since(now)
            }
            Outcome::Failed => {
                next_run = now + backoff;
                backoff
            }
        };

        match command_rx.recv_timeout(wait) {
            Ok(DriverCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                info!(driver = name, "driver stopped");
                return;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::config::AppConfig;

    fn fast_config() -> AppConfig {
        AppConfig {
            tick_interval_secs: 0.01,
            tick_error_backoff_secs: 0.01,
            metrics_interval_secs: 0.01,
            metrics_error_backoff_secs: 0.01,
            ..Default::default()
        }
    }

    #[test]
    fn test_driver_runs_until_shutdown() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let handle = spawn_driver(
            "test-driver",
            Duration::from_millis(1),
            Duration::from_millis(1),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Outcome::Done
            },
        )
        .unwrap();

        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(handle.name(), "test-driver");
        handle.shutdown();

        let after_shutdown = count.load(Ordering::SeqCst);
        assert!(after_shutdown >= 2, "driver ran {after_shutdown} times");
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::SeqCst), after_shutdown);
    }

    #[test]
    fn test_failed_work_keeps_driver_alive() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let handle = spawn_driver(
            "test-failing",
            Duration::from_millis(1),
            Duration::from_millis(1),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Outcome::Failed
            },
        )
        .unwrap();

        std::thread::sleep(Duration::from_millis(50));
        handle.shutdown();
        assert!(count.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn test_tick_driver_moves_fleet() {
        let state = AppState::new(fast_config(), Utc::now());
        state.seed(Utc::now()).unwrap();
        let before = state.store.list_vehicles(None).unwrap();

        let handle = spawn_tick_driver(&state).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        handle.shutdown();

        for old in before {
            let new = state.store.get_vehicle(&old.id).unwrap().unwrap();
            assert_ne!(new.state.position, old.state.position);
            assert!(new.state.timestamp >= old.state.timestamp);
        }
    }

    #[test]
    fn test_metrics_driver_refreshes_counts() {
        let state = AppState::new(fast_config(), Utc::now());
        state.seed(Utc::now()).unwrap();
        state.metrics.set_active_vehicles(0);

        let handle = spawn_metrics_driver(&state).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        handle.shutdown();

        let snapshot = state.metrics.snapshot().unwrap();
        assert_eq!(snapshot.active_vehicles, 6);
        assert!(snapshot.api_requests >= 1);
        assert!(snapshot.database_queries >= 2);
    }
}
