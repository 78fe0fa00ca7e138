//! Core functionality for the alert backend
//!
//! This module contains the alert domain: storage seam, expiry scheduling
//! and the real-time channel.

pub mod alerts;
