//! Logging setup for the Palaver runtime.
//!
//! One `tracing-subscriber` registry with an `EnvFilter` (honoring
//! `RUST_LOG`, falling back to the configured level), a compact stdout
//! layer, and an optional secondary file sink driven by the `log`
//! configuration key.

use std::ffi::OsStr;
use std::path::Path;

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::BotSettings;

/// Initializes logging from the loaded settings.
///
/// Uses `try_init` internally so repeated initialization (e.g. across
/// tests) is harmless.
pub fn init_from_settings(settings: &BotSettings) {
    let _ = try_init(&settings.logging.level, settings.log.as_deref());
}

/// Initializes logging with an explicit level and optional file sink.
pub fn try_init(level: &str, file: Option<&Path>) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = fmt::layer().compact().with_writer(std::io::stdout);

    match file {
        Some(path) => {
            let appender = tracing_appender::rolling::never(
                path.parent().unwrap_or_else(|| Path::new(".")),
                path.file_name().unwrap_or_else(|| OsStr::new("palaver.log")),
            );
            let file_layer = fmt::layer().with_ansi(false).with_writer(appender);
            tracing_subscriber::registry()
                .with(stdout_layer)
                .with(file_layer)
                .with(filter)
                .try_init()
        }
        None => tracing_subscriber::registry()
            .with(stdout_layer)
            .with(filter)
            .try_init(),
    }
}
