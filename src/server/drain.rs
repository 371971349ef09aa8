// Shutdown draining module
// Waits for in-flight connections after the listener closes

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Interval between checks of the active connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until no connections are active or `timeout` elapses.
///
/// Connection tasks decrement `conn_counter` when they finish, so the
/// counter is polled rather than awaited.
///
/// # Returns
///
/// The number of connections still active when draining stopped.
pub async fn drain_connections(conn_counter: &AtomicUsize, timeout: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
