use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_app::config::AppConfig;
use transit_app::driver;
use transit_app::error::{AppError, Result};
use transit_app::service::TransitService;
use transit_app::state::AppState;

/// Simulated bus fleet moving along demo routes.
#[derive(Debug, Parser)]
#[command(name = "transit-sim", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the simulation seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many seconds.
    #[arg(long)]
    run_for_secs: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if cli.run_for_secs.is_some() {
        config.run_for_secs = cli.run_for_secs;
    }
    config.validate()?;
    init_logging(&config.log_filter)?;

    let now = Utc::now();
    let state = AppState::new(config, now);
    state.seed(now)?;

    let service = TransitService::new(&state);
    info!("{} server starting", service.root());

    let tick = driver::spawn_tick_driver(&state)?;
    let metrics = driver::spawn_metrics_driver(&state)?;

    match state.config.run_for_secs {
        Some(secs) => {
            std::thread::sleep(Duration::from_secs_f64(secs));
            let health = service.health();
            info!(
                status = ?health.status,
                active_vehicles = health.active_vehicles,
                uptime = %health.system_uptime,
                "shutting down"
            );
            tick.shutdown();
            metrics.shutdown();
        }
        None => {
            tick.wait();
            metrics.wait();
        }
    }
    Ok(())
}

fn init_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| AppError::Logging(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}
