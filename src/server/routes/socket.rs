//! Websocket transport for the alert channel
//!
//! Each connection becomes one queue-backed subscriber. Text frames are
//! handed to the channel; queued outbound messages are written back.

use crate::core::alerts::{AlertChannel, OutboundMessage, Subscription};
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use actix_ws::{CloseReason, Message, MessageStream, Session};
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configure websocket routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ws", web::get().to(alert_socket));
}

/// Upgrade the request and bind the connection to the alert channel
pub async fn alert_socket(
    req: HttpRequest,
    body: web::Payload,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let (response, session, stream) = actix_ws::handle(&req, body)?;

    let channel = Arc::clone(&state.channel);
    let subscription = channel.subscribe();
    info!(
        "Websocket client {} connected from {:?}",
        subscription.id,
        req.peer_addr()
    );

    actix_web::rt::spawn(run_session(channel, subscription, session, stream));
    Ok(response)
}

async fn send(session: &mut Session, message: &OutboundMessage) -> bool {
    match message.to_text() {
        Ok(text) => session.text(text).await.is_ok(),
        Err(e) => {
            warn!("Failed to encode outbound message: {}", e);
            true
        }
    }
}

async fn run_session(
    channel: Arc<AlertChannel>,
    subscription: Subscription,
    mut session: Session,
    mut stream: MessageStream,
) {
    let Subscription { id, mut receiver } = subscription;

    let mut close_reason: Option<CloseReason> = None;
    let mut open = send(&mut session, &OutboundMessage::Connected { subscriber_id: id }).await;

    while open {
        tokio::select! {
            outbound = receiver.recv() => match outbound {
                Some(message) => open = send(&mut session, &message).await,
                None => {
                    debug!("Subscriber {} was dropped by the channel", id);
                    open = false;
                }
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    channel.handle_frame(id, &text).await;
                }
                Some(Ok(Message::Binary(_))) => {
                    let reply = OutboundMessage::error("Binary frames are not supported");
                    if channel.send_to(id, reply).await.is_err() {
                        open = false;
                    }
                }
                Some(Ok(Message::Ping(bytes))) => {
                    open = session.pong(&bytes).await.is_ok();
                }
                Some(Ok(Message::Close(reason))) => {
                    close_reason = reason;
                    open = false;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!("Websocket protocol error for {}: {}", id, e);
                    open = false;
                }
                None => open = false,
            },
        }
    }

    channel.disconnect(id);
    let _ = session.close(close_reason).await;
    info!("Websocket client {} disconnected", id);
}
