//! Logging setup for seatwise.
//!
//! The library only emits `tracing` events. Everything the binary prints on
//! stdout is command output (tables, seat maps, JSON), so diagnostics are
//! written to stderr.

use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty diagnostics are, picked with `-q` and `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Load and save summaries, plus warnings about skipped CSV lines.
    #[default]
    Normal,
    /// Every reservation, cancellation and plane opening.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Most detailed level that gets through.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_filter(self) -> String {
        format!("seatwise={}", self.level())
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
///
/// Calling it again is a no-op.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_filter()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}

/// Route warnings raised inside tests through the test harness.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
