//! Accept loop

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use ne_core::repositories::{EmojiRepository, RevocationStore, UserRepository};

use crate::connection::handle_connection;
use crate::state::AppState;

/// Accept connections on `listener` until `shutdown` resolves
///
/// Each connection runs on its own task. Connections already open when
/// shutdown fires are left to finish on their own.
pub async fn serve<U, E, R, S>(
    listener: TcpListener,
    state: Arc<AppState<U, E, R>>,
    max_message_size: usize,
    shutdown: S,
) where
    U: UserRepository + 'static,
    E: EmojiRepository + 'static,
    R: RevocationStore + 'static,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested, no longer accepting connections");
                break;
            }
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    let state = state.clone();
                    tokio::spawn(handle_connection(stream, peer, state, max_message_size));
                }
                Err(e) => warn!(error = %e, "failed to accept connection"),
            }
        }
    }
}
