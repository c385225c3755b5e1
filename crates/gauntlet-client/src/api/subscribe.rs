use std::{pin::Pin, time::Duration};

use futures::{
    stream::{SplitSink, SplitStream},
    SinkExt, Stream, StreamExt,
};
use gauntlet_primitives::AuctionEvent;
use tokio::{net::TcpStream, sync::oneshot, time::timeout};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tungstenite::{
    protocol::{frame::coding::CloseCode, CloseFrame},
    Message,
};
use url::Url;

use crate::{
    api::websocket_url,
    error::{ClientError, Result},
};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub type AuctionEventStream = Pin<Box<dyn Stream<Item = Result<AuctionEvent>> + Send>>;

/// Subscribe over websocket to the auction events the server broadcasts.
#[derive(Debug, Clone)]
pub struct SubscribeApiClient {
    server_url: Url,
}

impl SubscribeApiClient {
    pub fn new(server_url: Url) -> Self {
        Self { server_url }
    }

    pub async fn subscribe(&self) -> Result<AuctionEventStream> {
        let url = websocket_url(&self.server_url, "subscribe")?;
        tracing::info!("Connecting to WebSocket: {url}");

        let (ws_stream, _resp) = connect_async(url.as_str()).await.map_err(|e| {
            ClientError::ServerSubscriptionError(format!("WebSocket connect error: {e}"))
        })?;

        // the sink half is only used to close the connection
        let (ws_sender, ws_listener) = ws_stream.split();
        let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();
        let (cleanup_sender, cleanup_receiver) = oneshot::channel::<()>();

        tokio::spawn(Self::close_on_drop(ws_sender, shutdown_sender, cleanup_receiver));

        Ok(Box::pin(CleanupStream {
            inner: Self::event_stream(ws_listener, shutdown_receiver),
            cleanup_sender: Some(cleanup_sender),
        }))
    }

    /// Turn text frames into events until the server closes or the stream is shut down.
    fn event_stream(
        listener: SplitStream<Socket>,
        shutdown_receiver: oneshot::Receiver<()>,
    ) -> AuctionEventStream {
        let events = futures::stream::unfold(
            (listener, shutdown_receiver),
            |(mut listener, mut shutdown_receiver)| async move {
                loop {
                    tokio::select! {
                        maybe_message = listener.next() => {
                            let item = match maybe_message {
                                Some(Ok(Message::Text(text))) => serde_json::from_str::<AuctionEvent>(text.as_str())
                                    .map_err(|e| ClientError::EventParsingError(format!("{e}: {}", text.as_str()))),
                                Some(Ok(Message::Close(frame))) => {
                                    tracing::info!("WebSocket closed by server: {frame:?}");
                                    return None;
                                }
                                Some(Ok(Message::Binary(_))) => Err(ClientError::EventParsingError(
                                    "unexpected binary frame".to_string(),
                                )),
                                // ping/pong are answered by tungstenite
                                Some(Ok(_)) => continue,
                                Some(Err(e)) => {
                                    tracing::error!("WebSocket error: {e}");
                                    return None;
                                }
                                None => {
                                    tracing::info!("WebSocket stream ended");
                                    return None;
                                }
                            };
                            return Some((item, (listener, shutdown_receiver)));
                        }
                        _ = &mut shutdown_receiver => {
                            tracing::info!("Auction event stream shutting down");
                            return None;
                        }
                    }
                }
            },
        );
        Box::pin(events)
    }

    /// Sends a close frame once the event stream is dropped.
    async fn close_on_drop(
        mut ws_sender: SplitSink<Socket, Message>,
        shutdown_sender: oneshot::Sender<()>,
        cleanup_receiver: oneshot::Receiver<()>,
    ) {
        let _ = cleanup_receiver.await;

        let close_frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "Client shutting down".into(),
        };
        if let Err(e) = ws_sender.send(Message::Close(Some(close_frame))).await {
            tracing::debug!("Failed to send close frame: {e}");
        }
        let _ = shutdown_sender.send(());

        match timeout(Duration::from_secs(1), ws_sender.close()).await {
            Ok(Ok(())) => tracing::debug!("WebSocket closed"),
            Ok(Err(e)) => tracing::debug!("Error closing WebSocket: {e}"),
            Err(_) => tracing::warn!("Timeout waiting for WebSocket close"),
        }
    }
}

/// Closes the underlying websocket when dropped.
struct CleanupStream {
    inner: AuctionEventStream,
    cleanup_sender: Option<oneshot::Sender<()>>,
}

impl Stream for CleanupStream {
    type Item = Result<AuctionEvent>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl Drop for CleanupStream {
    fn drop(&mut self) {
        if let Some(sender) = self.cleanup_sender.take() {
            let _ = sender.send(());
        }
    }
}
