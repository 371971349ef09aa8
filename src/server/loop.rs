// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::drain::drain_connections;
use super::signal::SignalHandler;
use crate::config;
use crate::logger;

/// Run the accept loop on `listener` until `signals` requests shutdown.
///
/// After shutdown the listener is closed first so no new connections are
/// queued, then in-flight connections get up to the connection timeout to
/// finish.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = signals.shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);

    let in_flight = active_connections.load(std::sync::atomic::Ordering::SeqCst);
    logger::log_shutdown_requested(in_flight);

    let remaining = drain_connections(&active_connections, state.config.connection_timeout()).await;
    logger::log_shutdown_complete(remaining);
}
