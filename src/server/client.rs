use tokio::net::ToSocketAddrs;

use crate::framing::{ConnectionState, FramingResult, PeerSocket, DEFAULT_MAX_FRAME_LEN};

/// Player side of the game connection
pub struct GameClient {
    socket: PeerSocket,
}

impl GameClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> FramingResult<Self> {
        let socket = PeerSocket::connect(addr, DEFAULT_MAX_FRAME_LEN).await?;
        tracing::info!(peer = %socket.peer_addr(), "Connected to game server");
        Ok(Self { socket })
    }

    pub fn state(&self) -> ConnectionState {
        self.socket.state()
    }

    pub async fn send(&mut self, command: &str) -> FramingResult<()> {
        self.socket.send(command).await
    }

    pub async fn receive(&mut self) -> FramingResult<String> {
        self.socket.receive().await
    }

    /// Send `command` and wait for its reply
    pub async fn request(&mut self, command: &str) -> FramingResult<String> {
        self.send(command).await?;
        self.receive().await
    }

    pub async fn close(&mut self) {
        self.socket.close().await;
    }
}
