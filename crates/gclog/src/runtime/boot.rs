//! Boot: logging init and config load.

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::GcLogConfig;
use crate::error::{GcLogError, Result};

/// Initialise the tracing / logging subsystem.
///
/// Logs go to stderr so stdout stays clean for the JSON report.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "gclog=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load and validate configuration.
pub fn boot() -> Result<GcLogConfig> {
    info!("Starting gclog v{}", env!("CARGO_PKG_VERSION"));

    let config = GcLogConfig::load()?;
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        GcLogError::Config(e)
    })?;

    info!(
        "Loaded configuration: throughput_threshold={}%, malformed_policy={}, max_concurrent_files={}",
        config.throughput_threshold, config.malformed_policy, config.max_concurrent_files
    );
    info!(
        "Preprocessing: enabled={}, max_record_lines={}",
        config.preprocess.enabled, config.preprocess.max_record_lines
    );
    Ok(config)
}
