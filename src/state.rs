//! State shared between the caller's thread and the supervisor thread.

use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::protocol::TelemetryRecord;

/// Where the supervisor currently is in its connect/reconnect cycle.
///
/// Telemetry reads are only meaningful in `Connected` or `Stale`; the
/// other variants distinguish "never connected" from "between attempts".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket, no attempt in flight.
    Disconnected,
    /// Connection attempt in flight, or waiting to retry one.
    Connecting,
    /// Socket established. Telemetry may or may not have flowed yet.
    Connected,
    /// Was connected, but nothing decoded within the staleness budget;
    /// teardown and reconnect are imminent.
    Stale,
}

#[derive(Debug, Default)]
struct Telemetry {
    record: Option<TelemetryRecord>,
    /// When the last record decoded. `None` until data flows, and reset on
    /// a staleness teardown.
    last_rx: Option<Instant>,
}

/// The shared slots. The supervisor owns all writes to `stream`; the
/// caller's thread only borrows it for shot sends and must tolerate it
/// vanishing between calls. Telemetry and the staleness timestamp sit
/// behind one mutex — staleness is approximate, so nothing stronger than
/// mutual exclusion is needed.
#[derive(Debug)]
pub(crate) struct Shared {
    shutdown: AtomicBool,
    state: Mutex<ConnectionState>,
    stream: Mutex<Option<TcpStream>>,
    telemetry: Mutex<Telemetry>,
}

impl Shared {
    pub fn new() -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            state: Mutex::new(ConnectionState::Disconnected),
            stream: Mutex::new(None),
            telemetry: Mutex::new(Telemetry::default()),
        }
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn shutdown_requested(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    pub fn set_state(&self, state: ConnectionState) {
        *lock(&self.state) = state;
    }

    pub fn state(&self) -> ConnectionState {
        *lock(&self.state)
    }

    /// Publish the write handle for the caller's thread.
    pub fn install_stream(&self, stream: TcpStream) {
        *lock(&self.stream) = Some(stream);
    }

    /// Drop the write handle; shot sends fail as "not connected" from here.
    pub fn clear_stream(&self) {
        *lock(&self.stream) = None;
    }

    /// Borrow the write slot. Held only for the duration of one send.
    pub fn stream_guard(&self) -> MutexGuard<'_, Option<TcpStream>> {
        lock(&self.stream)
    }

    pub fn store_record(&self, record: TelemetryRecord) {
        let mut t = lock(&self.telemetry);
        t.record = Some(record);
        t.last_rx = Some(Instant::now());
    }

    /// Last decoded record. Survives reconnects, matching the interface's
    /// own client: stale game state beats no game state.
    pub fn record(&self) -> Option<TelemetryRecord> {
        lock(&self.telemetry).record.clone()
    }

    pub fn last_rx(&self) -> Option<Instant> {
        lock(&self.telemetry).last_rx
    }

    /// Forget the staleness timestamp. After a stale teardown, data must
    /// flow on the next connection before `is_connected` reports true again.
    pub fn reset_last_rx(&self) {
        lock(&self.telemetry).last_rx = None;
    }

    /// "Has data flowed": a socket exists and at least one record arrived —
    /// not merely a completed TCP handshake.
    pub fn is_connected(&self) -> bool {
        lock(&self.stream).is_some() && lock(&self.telemetry).last_rx.is_some()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
