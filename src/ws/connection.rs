//! Per-connection read/write loop.
//!
//! Each published command reaches the client as one text frame. Frames
//! from the client are read only to notice a close; their content is
//! ignored.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::domain::BroadcastHub;

/// Runs a subscriber connection until the client leaves, a write fails, or
/// the hub drops the subscription.
///
/// The subscription is removed from the hub on every exit path.
pub async fn run_connection(socket: WebSocket, hub: Arc<BroadcastHub>) {
    let mut subscription = hub.subscribe();
    let id = subscription.id();
    let (mut ws_tx, mut ws_rx) = socket.split();
    tracing::debug!(subscriber = %id, "ws connection opened");

    loop {
        tokio::select! {
            // Incoming frame from the client
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(subscriber = %id, error = %err, "ws read failed");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
            // Command from the hub
            value = subscription.recv() => {
                let Some(command) = value else {
                    // Pruned or shut down; tell the client before leaving.
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                };
                if let Err(err) = ws_tx.send(Message::text(command)).await {
                    tracing::debug!(subscriber = %id, error = %err, "ws write failed");
                    break;
                }
            }
        }
    }

    hub.unsubscribe(id);
    tracing::debug!(subscriber = %id, "ws connection closed");
}
