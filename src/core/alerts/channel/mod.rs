//! Real-time alert fan-out
//!
//! [`AlertChannel`] is a registry of subscribers plus a broadcast operation.
//! It knows nothing about the network: a subscriber is any [`AlertSink`],
//! and the websocket route binds one bounded queue per connection.

pub mod messages;

pub use messages::{InboundMessage, OutboundMessage, SubscriberId};

use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

/// Default per-subscriber queue capacity
pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 256;

/// Delivery target for one subscriber
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver a message; an error drops the subscriber
    async fn deliver(&self, message: &OutboundMessage) -> Result<()>;
}

/// Bounded in-memory queue sink
#[derive(Debug, Clone)]
pub struct QueueSink {
    sender: mpsc::Sender<OutboundMessage>,
}

impl QueueSink {
    /// Create a sink and the receiving end of its queue
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<OutboundMessage>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl AlertSink for QueueSink {
    async fn deliver(&self, message: &OutboundMessage) -> Result<()> {
        self.sender
            .try_send(message.clone())
            .map_err(|e| match e {
                TrySendError::Full(_) => GatewayError::channel("Subscriber queue is full"),
                TrySendError::Closed(_) => GatewayError::channel("Subscriber queue is closed"),
            })
    }
}

/// A subscriber registered through [`AlertChannel::subscribe`]
#[derive(Debug)]
pub struct Subscription {
    /// Registered identifier
    pub id: SubscriberId,
    /// Messages addressed to this subscriber
    pub receiver: mpsc::Receiver<OutboundMessage>,
}

/// Outcome of one publish
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Subscribers that accepted the message
    pub delivered: usize,
    /// Subscribers dropped because delivery failed
    pub dropped: usize,
}

/// Subscriber registry with broadcast
pub struct AlertChannel {
    subscribers: RwLock<HashMap<SubscriberId, Arc<dyn AlertSink>>>,
    buffer: usize,
}

impl std::fmt::Debug for AlertChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertChannel")
            .field("subscribers", &self.subscriber_count())
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_BUFFER)
    }
}

impl AlertChannel {
    /// Create a channel whose queued subscribers hold up to `buffer` messages
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            buffer,
        }
    }

    /// Register a sink under `id`, replacing any previous sink with that id
    pub fn connect(&self, id: SubscriberId, sink: Arc<dyn AlertSink>) {
        let replaced = self.subscribers.write().insert(id, sink).is_some();
        if replaced {
            warn!("Subscriber {} reconnected, previous sink replaced", id);
        } else {
            info!("Subscriber connected: {}", id);
        }
    }

    /// Register a new queue-backed subscriber
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId::new();
        let (sink, receiver) = QueueSink::channel(self.buffer);
        self.connect(id, Arc::new(sink));
        Subscription { id, receiver }
    }

    /// Deregister a subscriber; returns `false` if it was not registered
    pub fn disconnect(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.write().remove(&id).is_some();
        if removed {
            info!("Subscriber disconnected: {}", id);
        }
        removed
    }

    /// Whether `id` is registered
    pub fn is_connected(&self, id: SubscriberId) -> bool {
        self.subscribers.read().contains_key(&id)
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Send a message to one subscriber
    ///
    /// A failed delivery drops the subscriber.
    pub async fn send_to(&self, id: SubscriberId, message: OutboundMessage) -> Result<()> {
        let sink = self
            .subscribers
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(format!("Subscriber {} not connected", id)))?;

        if let Err(e) = sink.deliver(&message).await {
            warn!("Delivery to subscriber {} failed: {}", id, e);
            self.remove_if_same(id, &sink);
            return Err(e);
        }
        Ok(())
    }

    /// Rebroadcast `payload` as `receiveAlert` to every current subscriber
    ///
    /// Subscribers registered after the snapshot is taken do not receive the
    /// message. Failed deliveries are logged and their subscribers dropped;
    /// they never reach the caller.
    pub async fn publish(&self, payload: Value) -> PublishReport {
        let message = OutboundMessage::ReceiveAlert(payload);

        let snapshot: Vec<(SubscriberId, Arc<dyn AlertSink>)> = self
            .subscribers
            .read()
            .iter()
            .map(|(id, sink)| (*id, Arc::clone(sink)))
            .collect();

        let message = &message;
        let results = join_all(snapshot.into_iter().map(|(id, sink)| async move {
            let result = sink.deliver(message).await;
            (id, sink, result)
        }))
        .await;

        let mut report = PublishReport::default();
        for (id, sink, result) in results {
            match result {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!("Dropping subscriber {} after failed delivery: {}", id, e);
                    self.remove_if_same(id, &sink);
                    report.dropped += 1;
                }
            }
        }

        debug!(
            "Published alert to {} subscribers ({} dropped)",
            report.delivered, report.dropped
        );
        report
    }

    /// Handle a raw frame received from `from`
    ///
    /// Valid alerts are published; malformed frames get an `error` reply sent
    /// back to the sender only.
    pub async fn handle_frame(&self, from: SubscriberId, text: &str) -> Option<PublishReport> {
        match InboundMessage::parse(text) {
            Ok(InboundMessage::SendAlert(payload)) => Some(self.publish(payload).await),
            Err(e) => {
                warn!("Malformed frame from subscriber {}: {}", from, e);
                if let Err(e) = self.send_to(from, OutboundMessage::error(e.to_string())).await {
                    debug!("Could not reply to subscriber {}: {}", from, e);
                }
                None
            }
        }
    }

    fn remove_if_same(&self, id: SubscriberId, sink: &Arc<dyn AlertSink>) {
        let mut subscribers = self.subscribers.write();
        if subscribers
            .get(&id)
            .is_some_and(|current| Arc::ptr_eq(current, sink))
        {
            subscribers.remove(&id);
        }
    }
}
