use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::error::Result;
use crate::framing::PeerSocket;
use crate::notification::NotificationSink;

use super::session::GameSession;
use super::state::ServerState;

/// Pause after a failed accept, e.g. on EMFILE
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// TCP server running one game session per connection
pub struct GameServer {
    listener: TcpListener,
    state: ServerState,
}

impl GameServer {
    pub async fn bind(settings: Settings, sink: Arc<dyn NotificationSink>) -> Result<Self> {
        let addr = settings.server_addr();
        let state = ServerState::new(settings, sink)?;
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "Game server listening");

        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Accept players until `shutdown` fires, then wait for open sessions to end
    pub async fn run(self, shutdown: CancellationToken) -> Result<()> {
        let max_frame_len = self.state.settings.framing.max_frame_len;
        let mut sessions = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Game server shutting down");
                    break;
                }
                Some(_) = sessions.join_next(), if !sessions.is_empty() => {}
                res = self.listener.accept() => {
                    match res {
                        Ok((stream, _addr)) => match PeerSocket::from_stream(stream, max_frame_len) {
                            Ok(socket) => {
                                let session = GameSession::new(self.state.clone());
                                sessions.spawn(session.run(socket, shutdown.child_token()));
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "Failed to set up connection");
                            }
                        },
                        Err(e) => back_off_after_accept_error(&e).await,
                    }
                }
            }
        }

        tracing::info!(sessions = sessions.len(), "Waiting for sessions to finish...");
        while sessions.join_next().await.is_some() {}
        tracing::info!("Game server stopped");
        Ok(())
    }
}

async fn back_off_after_accept_error(error: &std::io::Error) {
    tracing::error!(error = %error, "Failed to accept connection");
    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}
