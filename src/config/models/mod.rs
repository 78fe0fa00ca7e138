//! Configuration data models
//!
//! This module defines all configuration structures used by the server.

#![allow(missing_docs)]

pub mod alerts;
pub mod logging;
pub mod routing;
pub mod server;
pub mod storage;

pub use alerts::*;
pub use logging::*;
pub use routing::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    5000
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

/// Local SQLite file used when PostgreSQL is unreachable
pub fn default_sqlite_fallback() -> String {
    "sqlite://data/skyangel.db?mode=rwc".to_string()
}

/// Per-subscriber queue length on the real-time channel
pub fn default_subscriber_buffer() -> usize {
    256
}

pub fn default_log_level() -> String {
    "info".to_string()
}
