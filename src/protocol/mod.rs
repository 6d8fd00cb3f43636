//! Message types for the ProTee interface protocol.
//!
//! - [`TelemetryRecord`] — game state the interface streams to us
//! - [`ShotRecord`] — shot events we send to the interface
//!
//! Both directions are JSON text. Inbound messages arrive newline-delimited
//! on a persistent TCP stream; outbound messages are compact objects with a
//! fixed envelope and every numeric field carried as a decimal string (the
//! interface does not accept native JSON numbers).

pub mod shot;
pub mod telemetry;

// Fixed envelope values for outbound messages.
pub const PROTOCOL: &str = "PROTEE";
pub const DEVICE: &str = "EXT";
pub const UNITS: &str = "MPH";

pub use shot::{ShotOptions, ShotRecord};
pub use telemetry::TelemetryRecord;
