//! Error handling for the alert backend
//!
//! This module defines the error type shared by storage, the alert core and
//! the HTTP layer, plus its mapping onto HTTP responses.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
