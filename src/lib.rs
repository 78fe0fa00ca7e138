//! # SkyAngel alert service
//!
//! Alert backend for the SkyAngel crime-statistics dashboards.
//!
//! ## Features
//!
//! - **Alert persistence**: alerts stored through SeaORM (PostgreSQL or SQLite)
//! - **Real-time fan-out**: alerts rebroadcast to every connected websocket client
//! - **Periodic expiry**: a background scheduler deactivates alerts whose
//!   active window has elapsed
//! - **Routing proxy**: forwards route requests to a Valhalla-compatible service
//!
//! ## Running the service
//!
//! ```rust,no_run
//! use skyangel_alerts::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Some("config/server.yaml")).await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Using the channel without a network
//!
//! ```rust
//! use skyangel_alerts::core::alerts::{AlertChannel, OutboundMessage};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let channel = AlertChannel::default();
//! let mut subscriber = channel.subscribe();
//!
//! let report = channel.publish(json!({"tipo": "robo"})).await;
//! assert_eq!(report.delivered, 1);
//! assert_eq!(
//!     subscriber.receiver.recv().await,
//!     Some(OutboundMessage::ReceiveAlert(json!({"tipo": "robo"})))
//! );
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::alerts::{
    Alert, AlertChannel, AlertExpiryScheduler, AlertRepository, AlertStore, NewAlert,
};
pub use utils::error::{GatewayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Service build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
