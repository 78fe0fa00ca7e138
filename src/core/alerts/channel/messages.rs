//! Wire messages exchanged over the real-time channel
//!
//! Every frame is a JSON object `{"event": <name>, "data": <json>}`.

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Inbound event carrying an alert to rebroadcast
pub const SEND_ALERT_EVENT: &str = "enviarAlerta";
/// Outbound event carrying a rebroadcast alert
pub const RECEIVE_ALERT_EVENT: &str = "receiveAlert";

/// Identifier of a connected subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubscriberId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Message sent from the server to a subscriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundMessage {
    /// An alert rebroadcast verbatim
    #[serde(rename = "receiveAlert")]
    ReceiveAlert(Value),
    /// Reply to a malformed inbound frame
    #[serde(rename = "error")]
    Error { message: String },
    /// Connection confirmation
    #[serde(rename = "connected")]
    Connected { subscriber_id: SubscriberId },
}

impl OutboundMessage {
    /// Build an error reply
    pub fn error<S: Into<String>>(message: S) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Encode as a text frame
    pub fn to_text(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Message received from a publisher
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    /// Alert to fan out to every subscriber
    SendAlert(Value),
}

#[derive(Deserialize)]
struct RawFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

impl InboundMessage {
    /// Decode a text frame
    ///
    /// Unknown events and `enviarAlerta` frames without data are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let frame: RawFrame = serde_json::from_str(text)
            .map_err(|e| GatewayError::channel(format!("Malformed frame: {}", e)))?;

        match frame.event.as_str() {
            SEND_ALERT_EVENT if frame.data.is_null() => Err(GatewayError::channel(format!(
                "Event '{}' requires data",
                SEND_ALERT_EVENT
            ))),
            SEND_ALERT_EVENT => Ok(Self::SendAlert(frame.data)),
            other => Err(GatewayError::channel(format!("Unknown event '{}'", other))),
        }
    }
}
