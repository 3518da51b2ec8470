//! Logging setup utilities for the Top Ten game server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter enables `default_log_level` for this crate, the server crate and
/// the binary itself. The `RUST_LOG` environment variable overrides it.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "topten_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use topten_shared::logger::setup_logger;
///
/// setup_logger("topten-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the default `EnvFilter` directive string.
///
/// Crate and binary names use hyphens on the command line but underscores as
/// tracing targets, so both are normalized.
pub fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={level},topten_server={level},{}={level},tower_http={level}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        binary_name.replace('-', "_"),
        level = default_log_level,
    )
}
