//! Connection lifecycle: connect, receive loop, staleness detection,
//! teardown, reconnect.
//!
//! Runs on a dedicated background thread for the lifetime of the client.
//! Nothing here is fatal: connect failures retry forever, bad lines are
//! dropped, and mid-stream socket errors force a fresh connect. The loop
//! exits only when the facade requests shutdown.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::conn::{ConnError, Connection, DEFAULT_PORT};
use crate::state::{ConnectionState, Shared};

/// Timing budgets for the supervisor loop.
///
/// Defaults mirror the interface's observed behavior; tests shrink them.
/// All are approximate wall-clock budgets, not real-time guarantees, and
/// they bound shutdown latency: the shutdown flag is polled once per loop
/// iteration.
#[derive(Debug, Clone)]
pub struct Settings {
    /// TCP port the interface listens on.
    pub port: u16,
    /// Per-attempt TCP connect timeout.
    pub connect_timeout: Duration,
    /// Socket read timeout inside the receive loop.
    pub read_timeout: Duration,
    /// Reconnect when no record has decoded for this long.
    pub staleness: Duration,
    /// Pause between failed connect attempts.
    pub retry_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_secs(2),
            staleness: Duration::from_millis(2500),
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Outer loop: keep a connection alive until shutdown is requested.
pub(crate) fn run(shared: Arc<Shared>, host: String, settings: Settings) {
    while !shared.shutdown_requested() {
        shared.set_state(ConnectionState::Connecting);

        let mut conn = match Connection::connect(&host, settings.port, settings.connect_timeout)
        {
            Ok(conn) => conn,
            Err(e) => {
                // The interface may simply not be running yet.
                debug!(%host, port = settings.port, "connect failed: {e}");
                thread::sleep(settings.retry_delay);
                continue;
            }
        };
        info!(%host, port = settings.port, "connected to interface");

        match conn.writer() {
            Ok(writer) => shared.install_stream(writer),
            Err(e) => {
                warn!("could not clone socket for sending: {e}");
                continue;
            }
        }
        shared.set_state(ConnectionState::Connected);

        receive_loop(&shared, &mut conn, &settings);

        // Close exactly once per cycle, and only after the caller's write
        // handle is gone.
        shared.clear_stream();
        conn.shutdown();
        shared.set_state(ConnectionState::Disconnected);
    }

    shared.clear_stream();
    shared.set_state(ConnectionState::Disconnected);
    debug!("supervisor stopped");
}

/// Inner loop: decode records until the connection dies, goes stale, or
/// shutdown is requested.
fn receive_loop(shared: &Shared, conn: &mut Connection, settings: &Settings) {
    loop {
        if shared.shutdown_requested() {
            return;
        }

        // A frozen stream is indistinguishable from a dead peer; give up
        // after the staleness budget and force a fresh connect. Only armed
        // once data has flowed.
        if let Some(last) = shared.last_rx()
            && last.elapsed() > settings.staleness
        {
            warn!("no telemetry for {:?}, reconnecting", settings.staleness);
            shared.set_state(ConnectionState::Stale);
            shared.reset_last_rx();
            return;
        }

        match conn.recv_timeout(settings.read_timeout) {
            Ok(record) => {
                debug!(club = %record.club, "telemetry updated");
                shared.store_record(record);
            }
            // Bad line: report and keep going. Not counted as received
            // data, so it does not feed the staleness timer.
            Err(ConnError::Wire(e)) => warn!("dropping line: {e}"),
            Err(ConnError::Timeout { .. }) => {}
            Err(ConnError::Disconnected) => {
                info!("interface closed the connection");
                return;
            }
            Err(ConnError::Io(e)) => {
                warn!("socket error, reconnecting: {e}");
                return;
            }
        }
    }
}
