pub mod client;
pub mod codec;
pub mod config;
pub mod conn;
pub mod error;
pub mod protocol;
pub mod state;
pub mod supervisor;

pub use client::Client;
pub use config::{BoostConfig, ConfigError};
pub use conn::{ConnError, Connection};
pub use error::WireError;
pub use protocol::{ShotOptions, ShotRecord, TelemetryRecord};
pub use state::ConnectionState;
pub use supervisor::Settings;
