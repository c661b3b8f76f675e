//! Project-level configuration
//!
//! Loads optional per-project configuration from `swiftlens.toml` at the
//! scan root. A missing file is not an error; a malformed file is logged
//! and ignored.
//!
//! ```toml
//! # swiftlens.toml
//!
//! [signals.hot-function]
//! threshold = 8
//! error-threshold = 20
//!
//! [exclude]
//! paths = ["Pods", ".build", "Carthage"]
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "swiftlens.toml";

/// Per-signal threshold overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SignalConfig {
    /// Reporting threshold
    pub threshold: Option<f64>,
    /// Threshold at which the finding escalates to error severity
    pub error_threshold: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub signals: HashMap<String, SignalConfig>,
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

impl Config {
    /// Load `swiftlens.toml` from the scan root, falling back to defaults.
    pub fn load(root: &Path) -> Config {
        let path = root.join(CONFIG_FILE);
        let Ok(content) = std::fs::read_to_string(&path) else {
            debug!("No {} found, using defaults", CONFIG_FILE);
            return Config::default();
        };
        match toml::from_str(&content) {
            Ok(config) => {
                debug!("Loaded configuration from {}", path.display());
                config
            }
            Err(err) => {
                warn!("Ignoring malformed {}: {}", path.display(), err);
                Config::default()
            }
        }
    }

    /// Integer reporting threshold for a signal, with fallback.
    pub fn count_threshold(&self, signal: &str, default: usize) -> usize {
        self.signals
            .get(signal)
            .and_then(|s| s.threshold)
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    /// Integer error-escalation threshold for a signal, with fallback.
    pub fn count_error_threshold(&self, signal: &str, default: usize) -> usize {
        self.signals
            .get(signal)
            .and_then(|s| s.error_threshold)
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    /// Ratio threshold (instability, main-sequence distance), with fallback.
    pub fn ratio_threshold(&self, signal: &str, default: f64) -> f64 {
        self.signals
            .get(signal)
            .and_then(|s| s.threshold)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path());
        assert!(config.signals.is_empty());
        assert!(config.exclude.paths.is_empty());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[signals.hot-function]
threshold = 8
error-threshold = 20

[signals.high-instability]
threshold = 0.9

[exclude]
paths = ["Pods"]
"#,
        )
        .unwrap();

        let config = Config::load(dir.path());
        assert_eq!(config.count_threshold("hot-function", 5), 8);
        assert_eq!(config.count_error_threshold("hot-function", 10), 20);
        assert_eq!(config.ratio_threshold("high-instability", 0.8), 0.9);
        assert_eq!(config.count_threshold("god-file", 10), 10);
        assert_eq!(config.exclude.paths, vec!["Pods"]);
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "not [valid toml").unwrap();
        let config = Config::load(dir.path());
        assert!(config.signals.is_empty());
    }
}
