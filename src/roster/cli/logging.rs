//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Log lines always go to stderr: stdout carries rendered views and must stay
//! clean for pipes.
//!
//! # Log Levels
//!
//! - `warn`: skipped (malformed) records and filter rules. Shown by default.
//! - `info`: data delivery summaries (`-v`)
//! - `debug`: store mutations and view recomputations (`-vv`)
//! - `trace`: every event published on the bus (`-vvv`)
//!
//! `RUST_LOG` overrides the verbosity flags when set.

use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Whether to include the module path in log lines.
    pub with_target: bool,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_target: false,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from the CLI's `-v` count.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            with_target: verbosity >= 2,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(config.with_target)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init();
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG`.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Dependencies stay at warn to reduce noise
        EnvFilter::new(format!(
            "warn,roster={level}",
            level = level.as_str().to_lowercase()
        ))
    })
}
