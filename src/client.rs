//! Client facade: owns the supervisor thread, the shot counter, and the
//! boost configuration.

use std::io::Write;
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

use tracing::{debug, warn};

use crate::config::BoostConfig;
use crate::protocol::{ShotOptions, ShotRecord, TelemetryRecord};
use crate::state::{ConnectionState, Shared};
use crate::supervisor::{self, Settings};

/// Client for the ProTee Golf 2.0 interface.
///
/// Spawns one background thread that keeps the TCP connection alive and
/// decodes the telemetry stream; the constructing thread reads game state
/// and sends shots. Dropping the client signals the thread to stop.
///
/// # Example
///
/// ```no_run
/// use teelink::{BoostConfig, Client, ShotOptions};
///
/// let config = BoostConfig::load("tgc.toml")?;
/// let client = Client::connect(None, config);
/// if client.is_connected() {
///     client.launch_ball(160.0, -2.0, 14.0, 2800.0, 300.0, &ShotOptions::default());
/// }
/// # Ok::<(), teelink::ConfigError>(())
/// ```
pub struct Client {
    shared: Arc<Shared>,
    config: BoostConfig,
    /// Shot counter; 1 is "at rest", so the first launch goes out as 2.
    counter: AtomicU64,
}

impl Client {
    /// Connect to `host` (falling back to the config's `ip_address`) with
    /// default timing budgets.
    ///
    /// Returns immediately: the connection is established by the background
    /// thread and retried indefinitely while the interface is unreachable.
    pub fn connect(host: Option<&str>, config: BoostConfig) -> Self {
        Self::with_settings(host, config, Settings::default())
    }

    /// Connect with explicit timing budgets.
    pub fn with_settings(host: Option<&str>, config: BoostConfig, settings: Settings) -> Self {
        let host = host.unwrap_or(&config.ip_address).to_string();
        let shared = Arc::new(Shared::new());

        let supervisor_shared = Arc::clone(&shared);
        thread::spawn(move || supervisor::run(supervisor_shared, host, settings));

        Self {
            shared,
            config,
            counter: AtomicU64::new(1),
        }
    }

    /// True once a socket exists and at least one record has been decoded —
    /// "data has flowed", not merely a completed TCP handshake.
    pub fn is_connected(&self) -> bool {
        self.shared.is_connected()
    }

    /// Where the supervisor currently is in its connect cycle.
    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    /// Last decoded game state, if any has ever arrived.
    pub fn telemetry(&self) -> Option<TelemetryRecord> {
        self.shared.record()
    }

    /// Send one shot to the interface. Returns false — never panics — when
    /// no connection is established or the send fails; a failed send is
    /// local to this call and leaves the client usable.
    ///
    /// The counter advances on every call, including failed ones, so shot
    /// numbers never repeat within one client. When `opts.drag` is unset, a
    /// default is computed from the boost configuration for the club the
    /// telemetry currently reports.
    pub fn launch_ball(
        &self,
        ballspeed: f64,
        ballpath: f64,
        launchangle: f64,
        backspin: f64,
        sidespin: f64,
        opts: &ShotOptions,
    ) -> bool {
        let counter = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let club = self
            .telemetry()
            .map(|t| t.club)
            .unwrap_or_else(|| "DR".to_string());

        let record = ShotRecord {
            counter,
            ballspeed,
            ballpath,
            launchangle,
            backspin,
            sidespin,
            clubspeed: opts.clubspeed,
            clubface: opts.clubface,
            clubpath: opts.clubpath,
            sweetspot: opts.sweetspot,
            drag: Some(opts.drag.unwrap_or_else(|| self.config.drag_for(&club))),
            carry: opts.carry,
        };
        let wire = record.encode();

        let guard = self.shared.stream_guard();
        let Some(stream) = guard.as_ref() else {
            debug!(counter, "launch_ball with no active connection");
            return false;
        };
        let mut writer: &TcpStream = stream;
        match writer.write_all(&wire) {
            Ok(()) => {
                debug!(counter, ballspeed, "shot sent");
                true
            }
            Err(e) => {
                warn!(counter, "shot send failed: {e}");
                false
            }
        }
    }

    /// Signal the supervisor to stop and close the connection. Idempotent;
    /// does not wait for the thread to exit (latency is bounded by the
    /// read timeout).
    pub fn disconnect(&self) {
        self.shared.request_shutdown();
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
