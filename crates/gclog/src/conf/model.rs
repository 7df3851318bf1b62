//! GcLogConfig and related structs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::{MAX_LINE_SIZE, MAX_RECORD_LINES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcLogConfig {
    /// Percent of wall time the application must run for the log not to be
    /// flagged as a GC bottleneck.
    pub throughput_threshold: u32,
    pub malformed_policy: MalformedPolicy,
    pub max_concurrent_files: usize,
    pub preprocess: PreprocessConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub enabled: bool,
    pub max_record_lines: usize,
    pub max_line_bytes: usize,
}

/// What to do with a line that classified but whose mandatory fields
/// could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Keep the line as an `Unknown` event and log a warning.
    #[default]
    Skip,
    /// Stop analyzing the file and return the error.
    Abort,
}

impl Default for GcLogConfig {
    fn default() -> Self {
        Self {
            throughput_threshold: 90,
            malformed_policy: MalformedPolicy::Skip,
            max_concurrent_files: 4,
            preprocess: PreprocessConfig::default(),
        }
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_record_lines: MAX_RECORD_LINES,
            max_line_bytes: MAX_LINE_SIZE,
        }
    }
}

impl PreprocessConfig {
    /// Validate preprocessing limits
    pub fn validate(&self) -> Result<(), String> {
        if self.max_line_bytes == 0 {
            return Err("preprocess.max_line_bytes must be > 0".to_string());
        }
        if self.enabled && self.max_record_lines == 0 {
            return Err("preprocess.max_record_lines must be > 0 when preprocessing is enabled".to_string());
        }
        Ok(())
    }
}

impl FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(MalformedPolicy::Skip),
            "abort" => Ok(MalformedPolicy::Abort),
            other => Err(format!("unknown malformed policy: {}", other)),
        }
    }
}

impl fmt::Display for MalformedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedPolicy::Skip => f.write_str("skip"),
            MalformedPolicy::Abort => f.write_str("abort"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ────────────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let cfg = GcLogConfig::default();
        assert_eq!(cfg.throughput_threshold, 90);
        assert_eq!(cfg.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(cfg.max_concurrent_files, 4);
    }

    #[test]
    fn test_preprocess_defaults() {
        let pre = PreprocessConfig::default();
        assert!(pre.enabled);
        assert_eq!(pre.max_record_lines, 500);
        assert_eq!(pre.max_line_bytes, 1_048_576);
    }

    // ── Validation ──────────────────────────────────────────────

    #[test]
    fn test_preprocess_validate_default_passes() {
        assert!(PreprocessConfig::default().validate().is_ok());
    }

    #[test]
    fn test_preprocess_disabled_allows_zero_record_lines() {
        let pre = PreprocessConfig {
            enabled: false,
            max_record_lines: 0,
            ..Default::default()
        };
        assert!(pre.validate().is_ok());
    }

    #[test]
    fn test_preprocess_rejects_zero_limits() {
        let pre = PreprocessConfig {
            max_record_lines: 0,
            ..Default::default()
        };
        let err = pre.validate().unwrap_err();
        assert!(err.contains("max_record_lines"), "Error should mention max_record_lines: {}", err);

        let pre = PreprocessConfig {
            max_line_bytes: 0,
            ..Default::default()
        };
        assert!(pre.validate().unwrap_err().contains("max_line_bytes"));
    }

    // ── Policy ──────────────────────────────────────────────────

    #[test]
    fn test_malformed_policy_from_str() {
        assert_eq!("skip".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Skip));
        assert_eq!(" ABORT ".parse::<MalformedPolicy>(), Ok(MalformedPolicy::Abort));
        assert!("retry".parse::<MalformedPolicy>().is_err());
        assert_eq!(MalformedPolicy::Abort.to_string(), "abort");
    }

    // ── Serialization ───────────────────────────────────────────

    #[test]
    fn test_config_toml_round_trip() {
        let cfg = GcLogConfig {
            malformed_policy: MalformedPolicy::Abort,
            ..Default::default()
        };
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let deserialized: GcLogConfig = toml::from_str(&toml_str).expect("Should deserialize from TOML");
        assert_eq!(deserialized, cfg);
    }

    #[test]
    fn test_config_deserialize_partial_toml() {
        let toml_str = r#"
            throughput_threshold = 95
            malformed_policy = "abort"

            [preprocess]
            max_record_lines = 200
        "#;
        let cfg: GcLogConfig = toml::from_str(toml_str).expect("Should accept partial TOML");
        assert_eq!(cfg.throughput_threshold, 95);
        assert_eq!(cfg.malformed_policy, MalformedPolicy::Abort);
        assert_eq!(cfg.max_concurrent_files, 4);
        assert_eq!(cfg.preprocess.max_record_lines, 200);
        assert!(cfg.preprocess.enabled);
    }
}
