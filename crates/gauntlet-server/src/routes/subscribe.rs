use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use gauntlet_primitives::AuctionEvent;
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::app_state::AppState;

/// Streams every auction event to the subscriber as a JSON text frame.
pub async fn websocket_subscribe_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Response {
    // subscribe before the upgrade completes so no event published meanwhile is missed
    let receiver = state.subscription_manager().add_subscription();
    ws.on_upgrade(move |socket| forward_events(socket, receiver))
}

async fn forward_events(socket: WebSocket, mut events: Receiver<AuctionEvent>) {
    let (mut sender, mut inbound) = socket.split();
    tracing::info!("subscriber connected");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            tracing::error!("failed to serialize event: {e}");
                            continue;
                        }
                    };
                    if let Err(e) = sender.send(Message::Text(text)).await {
                        tracing::info!("subscriber went away: {e}");
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("subscriber lagging, skipped {skipped} events");
                }
                Err(RecvError::Closed) => break,
            },
            frame = inbound.next() => match frame {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("subscriber socket error: {e}");
                    break;
                }
            },
        }
    }

    let _ = sender.close().await;
    tracing::info!("subscriber disconnected");
}
