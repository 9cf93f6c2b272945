//! Logging setup
//!
//! Structured logging through `tracing`. Events go to stderr so they never mix
//! with command output on stdout.
//!
//! - `DEPOT_LOG`: an `EnvFilter` directive such as `info` or `depot=debug` (default `warn`)
//! - `DEPOT_LOG_FORMAT`: `text` (default) or `json`

use crate::error::{DepotError, Result};
use std::str::FromStr;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "DEPOT_LOG";
pub const LOG_FORMAT_ENV: &str = "DEPOT_LOG_FORMAT";

#[cfg(not(feature = "debug_merge"))]
const DEFAULT_DIRECTIVE: &str = "warn";
#[cfg(feature = "debug_merge")]
const DEFAULT_DIRECTIVE: &str = "warn,depot::artifacts::merge=debug";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = DepotError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(DepotError::InvalidState(format!(
                "unknown log format {:?}, expected text or json",
                other
            ))),
        }
    }
}

fn build_env_filter(directive: Option<String>) -> EnvFilter {
    directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber from `DEPOT_LOG` and `DEPOT_LOG_FORMAT`
pub fn init() -> Result<()> {
    let filter = build_env_filter(std::env::var(LOG_ENV).ok());
    let format = std::env::var(LOG_FORMAT_ENV)
        .map(|value| value.parse::<LogFormat>())
        .unwrap_or(Ok(LogFormat::Text))?;

    let base_subscriber = Registry::default().with(filter);
    let installed = match format {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| DepotError::InvalidState(format!("logging already initialized: {}", e)))
}
