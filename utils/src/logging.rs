//! Structured logging initialisation via `tracing`.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: readable lines for a terminal.
//! - [`LogFormat::Json`]: newline-delimited JSON for log aggregation.
//!
//! `RUST_LOG` always wins over the caller-supplied level.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown log format: {0} (expected \"human\" or \"json\")")]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(LogFormat::Human),
            "json" => Ok(LogFormat::Json),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

/// Initialise the global tracing subscriber.
///
/// Logs go to stderr so that commands printing JSON on stdout stay parseable.
///
/// # Panics
///
/// Panics if a global subscriber has already been set.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Human => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
