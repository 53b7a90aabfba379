use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::framing::PeerSocket;
use crate::game::World;
use crate::metrics::GameMetrics;
use crate::notification::NotificationResult;

use super::notices::{trophy_badge, victory_toast};
use super::state::ServerState;

/// Characters of a reply kept in the log line
const LOGGED_REPLY_CHARS: usize = 80;

/// One player's game, alive for the lifetime of their connection
pub struct GameSession {
    state: ServerState,
    world: World,
}

impl GameSession {
    pub fn new(state: ServerState) -> Self {
        let world = state.generator.generate();
        Self { state, world }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Serve `socket` until the player leaves, a framing error occurs, or `shutdown` fires
    pub async fn run(self, socket: PeerSocket, shutdown: CancellationToken) {
        let span = tracing::info_span!(
            "session",
            connection_id = %socket.id(),
            peer = %socket.peer_addr()
        );
        self.serve(socket, shutdown).instrument(span).await
    }

    async fn serve(mut self, socket: PeerSocket, shutdown: CancellationToken) {
        GameMetrics::session_started();
        tracing::info!(trophies = self.world.trophy_count, "Player connected");

        let (reader, mut writer) = socket.into_parts();
        let messages = reader.into_stream(shutdown);
        tokio::pin!(messages);

        while let Some(message) = messages.next().await {
            match message {
                Ok(command) => {
                    tracing::info!("Received: {}", command);
                    let reply = self.handle(&command);
                    let logged: String = reply.chars().take(LOGGED_REPLY_CHARS).collect();
                    tracing::info!("Responded with: {}...", logged);

                    if let Err(e) = writer.write_message(&reply).await {
                        tracing::warn!(error = %e, "Failed to send reply");
                        break;
                    }
                }
                Err(e) if e.is_clean_close() => {
                    tracing::info!("Player disconnected");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session ended on framing error");
                }
            }
        }

        if let Err(e) = writer.shutdown().await {
            tracing::debug!(error = %e, "Failed to shut down connection");
        }

        GameMetrics::session_ended();
        tracing::info!(
            collected = self.world.inventory.len(),
            won = self.world.has_won(),
            "Session closed"
        );
    }

    /// Apply one command and raise any notifications it earns
    pub fn handle(&mut self, command: &str) -> String {
        let verb = self
            .state
            .parser
            .command(command)
            .map(|(command, _)| command.verb())
            .unwrap_or("unknown");
        GameMetrics::record_command(verb);

        let collected = self.world.inventory.len();
        let already_won = self.world.has_won();
        let reply = self.state.parser.parse(command, &mut self.world);

        if self.world.inventory.len() != collected {
            if let Err(e) = self.update_badge() {
                tracing::warn!(error = %e, "Failed to update trophy badge");
            }
        }
        if !already_won && self.world.has_won() {
            GameMetrics::record_won();
            tracing::info!(trophies = self.world.trophy_count, "Player won the game");
            if let Err(e) = self.announce_victory() {
                tracing::warn!(error = %e, "Failed to show victory toast");
            }
        }

        reply
    }

    fn update_badge(&self) -> NotificationResult<()> {
        trophy_badge(self.state.templates.as_ref(), self.world.inventory.len())?
            .set(self.state.sink.as_ref())
    }

    fn announce_victory(&self) -> NotificationResult<()> {
        victory_toast(self.state.templates.as_ref(), self.world.trophy_count)?
            .send(self.state.sink.as_ref())
    }
}
