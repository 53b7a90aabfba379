use std::fmt;
use std::net::SocketAddr;

use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use uuid::Uuid;

use super::codec::{FrameReader, FrameWriter};
use super::error::{FramingError, FramingResult};

/// Lifecycle of a peer connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => f.write_str("connecting"),
            ConnectionState::Connected => f.write_str("connected"),
            ConnectionState::Closed => f.write_str("closed"),
        }
    }
}

/// A TCP connection that exchanges framed text messages
#[derive(Debug)]
pub struct PeerSocket {
    id: Uuid,
    peer_addr: SocketAddr,
    state: ConnectionState,
    reader: FrameReader<OwnedReadHalf>,
    writer: FrameWriter<OwnedWriteHalf>,
}

impl PeerSocket {
    /// Open a connection to `addr`
    pub async fn connect(addr: impl ToSocketAddrs, max_frame_len: usize) -> FramingResult<Self> {
        let id = Uuid::new_v4();
        tracing::debug!(connection_id = %id, state = %ConnectionState::Connecting, "Peer connecting");

        let stream = TcpStream::connect(addr).await?;
        Self::with_id(id, stream, max_frame_len)
    }

    /// Wrap a connection accepted by a listener
    pub fn from_stream(stream: TcpStream, max_frame_len: usize) -> FramingResult<Self> {
        Self::with_id(Uuid::new_v4(), stream, max_frame_len)
    }

    fn with_id(id: Uuid, stream: TcpStream, max_frame_len: usize) -> FramingResult<Self> {
        let peer_addr = stream.peer_addr()?;
        stream.set_nodelay(true)?;
        let (read_half, write_half) = stream.into_split();

        tracing::debug!(
            connection_id = %id,
            peer = %peer_addr,
            state = %ConnectionState::Connected,
            "Peer connected"
        );

        Ok(Self {
            id,
            peer_addr,
            state: ConnectionState::Connected,
            reader: FrameReader::with_max_frame_len(read_half, max_frame_len),
            writer: FrameWriter::with_max_frame_len(write_half, max_frame_len),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub async fn send(&mut self, message: &str) -> FramingResult<()> {
        self.ensure_connected()?;
        let result = self.writer.write_message(message).await;
        self.close_on_error(result).await
    }

    pub async fn receive(&mut self) -> FramingResult<String> {
        self.ensure_connected()?;
        let result = self.reader.read_message().await;
        self.close_on_error(result).await
    }

    /// Shut down the write direction and stop using the connection.
    ///
    /// The peer reads end-of-stream. Later sends and receives fail with `NotConnected`.
    pub async fn close(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::Closed;
        if let Err(e) = self.writer.shutdown().await {
            tracing::debug!(connection_id = %self.id, error = %e, "Peer shutdown failed");
        }
        tracing::debug!(connection_id = %self.id, peer = %self.peer_addr, "Peer closed");
    }

    /// Split into independently owned reader and writer
    pub fn into_parts(self) -> (FrameReader<OwnedReadHalf>, FrameWriter<OwnedWriteHalf>) {
        (self.reader, self.writer)
    }

    fn ensure_connected(&self) -> FramingResult<()> {
        match self.state {
            ConnectionState::Connected => Ok(()),
            _ => Err(FramingError::NotConnected),
        }
    }

    async fn close_on_error<T>(&mut self, result: FramingResult<T>) -> FramingResult<T> {
        if let Err(e) = &result {
            tracing::debug!(connection_id = %self.id, error = %e, "Peer connection failed");
            self.close().await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::FrameStage;
    use tokio::net::TcpListener;

    async fn pair() -> (PeerSocket, PeerSocket) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (client, accepted) = tokio::join!(PeerSocket::connect(addr, 1024), listener.accept());
        let (stream, _) = accepted.unwrap();
        (client.unwrap(), PeerSocket::from_stream(stream, 1024).unwrap())
    }

    #[tokio::test]
    async fn test_send_and_receive() {
        let (mut client, mut server) = pair().await;
        assert_eq!(client.state(), ConnectionState::Connected);

        client.send("look").await.unwrap();
        assert_eq!(server.receive().await.unwrap(), "look");

        server.send("A dusty room").await.unwrap();
        assert_eq!(client.receive().await.unwrap(), "A dusty room");
        assert_ne!(client.id(), server.id());
    }

    #[tokio::test]
    async fn test_peer_hangup_closes_socket() {
        let (client, mut server) = pair().await;
        drop(client);

        let err = server.receive().await.unwrap_err();
        assert!(err.is_clean_close());
        assert_eq!(server.state(), ConnectionState::Closed);
        assert!(matches!(
            server.send("anyone?").await,
            Err(FramingError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_close_is_seen_by_peer() {
        let (mut client, mut server) = pair().await;
        client.close().await;
        assert_eq!(client.state(), ConnectionState::Closed);

        let err = tokio::time::timeout(std::time::Duration::from_secs(2), server.receive())
            .await
            .expect("close was not observed")
            .unwrap_err();
        assert!(matches!(
            err,
            FramingError::ConnectionClosed {
                stage: FrameStage::Length
            }
        ));
        assert!(matches!(
            client.receive().await,
            Err(FramingError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_big_endian_length_prefix() {
        use tokio::io::AsyncWriteExt;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (raw, accepted) = tokio::join!(TcpStream::connect(addr), listener.accept());
        let mut raw = raw.unwrap();
        let mut server = PeerSocket::from_stream(accepted.unwrap().0, 1024 * 1024).unwrap();

        raw.write_all(&[0, 0, 0, 4, b'l', b'o', b'o', b'k']).await.unwrap();
        assert_eq!(server.receive().await.unwrap(), "look");
    }

    #[tokio::test]
    async fn test_into_parts() {
        let (client, mut server) = pair().await;
        let (_reader, mut writer) = client.into_parts();

        writer.write_message("n").await.unwrap();
        assert_eq!(server.receive().await.unwrap(), "n");
    }
}
