//! TOML configuration file for the `zkhuman` binary.
//!
//! ```toml
//! log_format = "json"
//! log_level = "debug"
//!
//! [params]
//! human_threshold = 65.0
//! max_pointer_samples = 200
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use zkhuman_types::VerificationParams;
use zkhuman_utils::LogFormat;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub log_format: Option<LogFormat>,
    pub log_level: Option<String>,
    pub params: VerificationParams,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// Settings after applying precedence: flag, then file, then default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_format: LogFormat,
    pub log_level: String,
    pub params: VerificationParams,
}

/// Overrides given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub log_format: Option<LogFormat>,
    pub log_level: Option<String>,
    pub threshold: Option<f64>,
}

impl Settings {
    pub fn resolve(file: Option<FileConfig>, overrides: Overrides) -> Self {
        let file = file.unwrap_or_default();
        let mut params = file.params;
        if let Some(threshold) = overrides.threshold {
            params.human_threshold = threshold;
        }
        Self {
            log_format: overrides.log_format.or(file.log_format).unwrap_or_default(),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| "info".to_string()),
            params,
        }
    }
}
