//! Logger module
//!
//! Provides logging utilities for the climate server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support
//!
//! Events go through `tracing`; [`init`] installs the `tracing-subscriber`
//! layers that route them to the configured destinations.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::io;
use std::net::SocketAddr;

use tracing_subscriber::filter::{filter_fn, Directive, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{Config, LoggingConfig};
use writer::Fallback;

/// Target carried by access log events
pub const ACCESS_TARGET: &str = "access";

/// Initialize the logger with configuration
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level` when set.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let app_writer = writer::make_writer(config.error_log_file.as_deref(), Fallback::Stderr)?;
    let access_writer = writer::make_writer(config.access_log_file.as_deref(), Fallback::Stdout)?;

    let access_off: Directive = format!("{ACCESS_TARGET}=off")
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let app_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid log level '{}': {e}", config.level),
            )
        })?
        .add_directive(access_off);

    let app_layer = fmt::layer()
        .with_writer(app_writer)
        .with_ansi(config.error_log_file.is_none())
        .with_filter(app_filter);

    // Access lines are preformatted, so the layer prints the message only
    let access_layer = fmt::layer()
        .with_writer(access_writer)
        .with_ansi(false)
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_filter(filter_fn(|meta| meta.target() == ACCESS_TARGET));

    tracing_subscriber::registry()
        .with(app_layer)
        .with(access_layer)
        .try_init()
        .map_err(io::Error::other)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("======================================");
    tracing::info!("Climate API server started");
    tracing::info!("Listening on: http://{addr}");
    tracing::info!("Database: {}", config.database.path.display());
    tracing::info!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        tracing::info!("Worker threads: {workers}");
    }
    if let Some(max) = config.performance.max_connections {
        tracing::info!("Max connections: {max}");
    }
    if let Some(ref path) = config.logging.access_log_file {
        tracing::info!("Access log: {path}");
    }
    if let Some(ref path) = config.logging.error_log_file {
        tracing::info!("Error log: {path}");
    }
    tracing::info!("======================================");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log which dataset resource a request asked for
pub fn log_route(resource: &str) {
    tracing::info!("Server requested climate app {resource}");
}

pub fn log_store_error(resource: &str, err: &impl std::fmt::Display) {
    tracing::error!("Query for {resource} failed: {err}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_shutdown_requested(active_connections: usize) {
    tracing::info!("Shutdown requested, {active_connections} connection(s) still active");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("All connections closed, server stopped");
    } else {
        tracing::warn!("Server stopped with {remaining} connection(s) still open");
    }
}
