//! Engine binary for the GSAT scoring service.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `gsat-config.yaml` (or the path given as
//!    the first argument); defaults apply when the file is absent
//! 2. Initialize structured logging (tracing)
//! 3. Log the baseline strategy table
//! 4. Serve the HTTP API until `Ctrl-C`

mod error;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use gsat_core::ScoringConfig;
use gsat_observer::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "gsat-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the baseline evaluation, or the
/// server fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = ScoringConfig::load_or_default(&config_path)?;

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("gsat-engine starting");
    info!(
        config_path = %config_path.display(),
        option_count = config.scoring.option_count,
        default_rule = %config.scoring.default_rule,
        max_trial_count = config.simulation.max_trial_count,
        precision = config.display.precision,
        "Configuration loaded"
    );

    report::log_baseline(&config)?;

    let server_config = config.server.clone();
    let state = Arc::new(AppState::new(config));
    gsat_observer::start_server(&server_config, state).await?;

    info!("gsat-engine stopped");
    Ok(())
}
