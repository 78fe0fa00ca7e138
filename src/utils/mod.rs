//! Utility modules for the alert backend
//!
//! - **error**: error type, helpers and HTTP mapping
//! - **logging**: tracing subscriber setup

pub mod error;
pub mod logging;

pub use error::{GatewayError, Result};
