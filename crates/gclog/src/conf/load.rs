//! Config loading from file and environment variables.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{info, warn};

use super::model::GcLogConfig;
use crate::error::Result;

const CONFIG_FILE_VAR: &str = "GCLOG_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "gclog.toml";

impl GcLogConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self> {
        let config_path = std::env::var(CONFIG_FILE_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let config = if Path::new(&config_path).exists() {
            info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            info!("Config file not found at {}, using environment variables", config_path);
            Self::default()
        };

        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: GcLogConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults for the rest
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `GCLOG_*` overrides found through `lookup`. Values that do not
    /// parse are ignored with a warning.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "GCLOG_THROUGHPUT_THRESHOLD", &mut self.throughput_threshold);
        override_from(&lookup, "GCLOG_MALFORMED_POLICY", &mut self.malformed_policy);
        override_from(&lookup, "GCLOG_MAX_CONCURRENT_FILES", &mut self.max_concurrent_files);
        override_from(&lookup, "GCLOG_PREPROCESS_ENABLED", &mut self.preprocess.enabled);
        override_from(&lookup, "GCLOG_MAX_RECORD_LINES", &mut self.preprocess.max_record_lines);
        self
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.throughput_threshold > 100 {
            return Err(format!(
                "throughput_threshold must be a percentage (0-100), got {}",
                self.throughput_threshold
            ));
        }
        if self.max_concurrent_files == 0 {
            return Err("max_concurrent_files must be > 0".to_string());
        }
        self.preprocess.validate()?;
        Ok(())
    }
}

fn override_from<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(_) => warn!("Ignoring {}={:?}: not a valid value", key, raw),
    }
}
