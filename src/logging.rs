//! Logging setup.
//!
//! Installs a global `tracing` subscriber writing to stderr. `RUST_LOG`
//! overrides the requested default level.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors that may occur while initializing logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The default directive could not be parsed.
    #[error("Invalid log directive {directive:?}: {source}")]
    Directive {
        directive: String,
        source: tracing_subscriber::filter::ParseError,
    },
    /// Failed to set the global tracing subscriber.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing_subscriber::util::TryInitError),
}

/// Map a `-v` count to a default filter directive.
pub fn directive_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "rectboard=warn",
        1 => "rectboard=info",
        2 => "rectboard=debug",
        _ => "rectboard=trace",
    }
}

/// Initialize tracing. Subsequent calls are no-ops.
pub fn init(default_directive: &str) -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive).map_err(|source| {
            LoggingError::Directive {
                directive: default_directive.to_string(),
                source,
            }
        })?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;

    let _ = INSTALLED.set(());
    Ok(())
}
