//! TCP connection to the ProTee interface on port 9090.
//!
//! Handles socket I/O, line splitting, and per-line decode for one
//! established connection. Reconnect policy lives in the supervisor.

use std::collections::VecDeque;
use std::io::{self, Read};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;

use crate::codec;
use crate::error::WireError;
use crate::protocol::TelemetryRecord;

/// TCP port the interface listens on.
pub const DEFAULT_PORT: u16 = 9090;

/// Errors from connection operations.
#[derive(Debug, Error)]
pub enum ConnError {
    /// TCP I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A line arrived but did not decode. The line is consumed; the
    /// connection stays usable.
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// `recv_timeout` exceeded without a complete line.
    #[error("recv timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// TCP stream closed by the interface.
    #[error("connection closed by interface")]
    Disconnected,
}

/// One established TCP connection to the interface.
///
/// Synchronous; the supervisor thread drives timing via `recv_timeout()`.
pub struct Connection {
    stream: TcpStream,
    read_buf: [u8; 1024],
    /// Lines split from the last chunk but not yet consumed by `recv_timeout`.
    pending: VecDeque<Vec<u8>>,
}

impl Connection {
    /// Connect with an explicit timeout, trying each resolved address.
    pub fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, ConnError> {
        let mut last_err: Option<io::Error> = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => {
                    // Shot messages are small; don't let Nagle sit on them.
                    let _ = stream.set_nodelay(true);
                    return Ok(Self {
                        stream,
                        read_buf: [0u8; 1024],
                        pending: VecDeque::new(),
                    });
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(ConnError::Io(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::AddrNotAvailable, "host resolved to no addresses")
        })))
    }

    /// A second handle to the socket for shot writes from the caller's
    /// thread.
    pub fn writer(&self) -> io::Result<TcpStream> {
        self.stream.try_clone()
    }

    /// Block up to `timeout` for the next decoded telemetry record.
    ///
    /// A malformed line surfaces as `ConnError::Wire`; the line is consumed
    /// and the next call moves on to the one after it.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<TelemetryRecord, ConnError> {
        self.stream.set_read_timeout(Some(timeout))?;
        loop {
            if let Some(line) = self.pending.pop_front() {
                return TelemetryRecord::decode(&line).map_err(ConnError::from);
            }

            let n = match self.stream.read(&mut self.read_buf) {
                Ok(n) => n,
                Err(ref e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::TimedOut =>
                {
                    return Err(ConnError::Timeout { timeout });
                }
                Err(e) => return Err(ConnError::Io(e)),
            };
            if n == 0 {
                return Err(ConnError::Disconnected);
            }

            self.pending.extend(
                codec::split_lines(&self.read_buf[..n])
                    .into_iter()
                    .map(<[u8]>::to_vec),
            );
            // Chunk held no complete line — loop for more TCP data.
        }
    }

    /// Shut down the TCP connection. Errors are ignored; the socket may
    /// already be gone.
    pub fn shutdown(&self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
