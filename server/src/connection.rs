//! Per-connection message loop
//!
//! Requests on one connection are handled strictly in order: the next frame
//! is not read until the previous reply has been written.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use ne_core::repositories::{EmojiRepository, RevocationStore, UserRepository};

use crate::router::dispatch;
use crate::state::AppState;

/// Upgrade `stream` to a WebSocket and serve it until the peer goes away
pub async fn handle_connection<U, E, R>(
    stream: TcpStream,
    peer: SocketAddr,
    state: Arc<AppState<U, E, R>>,
    max_message_size: usize,
) where
    U: UserRepository,
    E: EmojiRepository,
    R: RevocationStore,
{
    let mut config = WebSocketConfig::default();
    config.max_message_size = Some(max_message_size);
    config.max_frame_size = Some(max_message_size);

    let socket = match tokio_tungstenite::accept_async_with_config(stream, Some(config)).await {
        Ok(socket) => socket,
        Err(e) => {
            warn!(%peer, error = %e, "WebSocket handshake failed");
            return;
        }
    };
    info!(%peer, "connection opened");

    let (mut sink, mut frames) = socket.split();
    let mut handled: u64 = 0;

    while let Some(frame) = frames.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                warn!(%peer, error = %e, "connection error");
                break;
            }
        };

        handled += 1;
        if let Some(reply) = dispatch(&state, &text).await.into_frame() {
            if let Err(e) = sink.send(Message::Text(reply)).await {
                warn!(%peer, error = %e, "failed to send reply");
                break;
            }
        }
    }

    debug!(%peer, requests = handled, "message loop finished");
    info!(%peer, "connection closed");
}
