//! HTTP server implementation
//!
//! This module provides the HTTP server, its routes and the websocket
//! endpoint of the alert channel.

pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;


pub use builder::{ServerBuilder, run_server};
pub use server::HttpServer;
pub use state::AppState;
