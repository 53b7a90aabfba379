//! Game server integration tests
//!
//! These tests run the TCP server on an ephemeral port and talk to it with
//! `GameClient` and raw framed sockets.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use adventure_notify::config::Settings;
use adventure_notify::framing::{ConnectionState, FramingError};
use adventure_notify::notification::{Dispatch, MemorySink};
use adventure_notify::server::{GameClient, GameServer};

struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<adventure_notify::error::Result<()>>,
    sink: Arc<MemorySink>,
}

impl TestServer {
    async fn start(configure: impl FnOnce(&mut Settings)) -> Self {
        let mut settings = Settings::default();
        settings.server.port = 0;
        settings.game.seed = Some(2024);
        configure(&mut settings);

        let sink = Arc::new(MemorySink::new());
        let server = GameServer::bind(settings, sink.clone()).await.unwrap();
        let addr = server.local_addr().unwrap();

        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(server.run(shutdown.clone()));

        Self {
            addr,
            shutdown,
            handle,
            sink,
        }
    }

    async fn stop(self) {
        self.shutdown.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }
}

#[tokio::test]
async fn test_look_returns_room_description() {
    let server = TestServer::start(|_| {}).await;
    let mut client = GameClient::connect(server.addr).await.unwrap();
    assert_eq!(client.state(), ConnectionState::Connected);

    let reply = client.request("look").await.unwrap();
    assert!(reply.starts_with("A "), "unexpected reply: {}", reply);
    assert!(reply.contains(" room: You are standing inside a "));
    assert!(reply.ends_with(".\r\n"));

    let reply = client.request("xyzzy").await.unwrap();
    assert_eq!(reply, "I have no clue what you are talking about.");

    client.close().await;
    assert_eq!(client.state(), ConnectionState::Closed);
    server.stop().await;
}

#[tokio::test]
async fn test_seeded_worlds_match_across_connections() {
    let server = TestServer::start(|_| {}).await;

    let mut first = GameClient::connect(server.addr).await.unwrap();
    let mut second = GameClient::connect(server.addr).await.unwrap();
    let a = first.request("look").await.unwrap();
    let b = second.request("look").await.unwrap();
    assert_eq!(a, b);

    server.stop().await;
}

#[tokio::test]
async fn test_inventory_starts_empty() {
    let server = TestServer::start(|settings| settings.game.grid_size = 3).await;
    let mut client = GameClient::connect(server.addr).await.unwrap();

    assert_eq!(
        client.request("i").await.unwrap(),
        "You have nothing but the shirt on your back."
    );
    assert!(server.sink.is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_wire_format_with_raw_socket() {
    let server = TestServer::start(|_| {}).await;
    let mut stream = TcpStream::connect(server.addr).await.unwrap();

    stream
        .write_all(&[0, 0, 0, 3, b'g', b'e', b't'])
        .await
        .unwrap();

    let len = stream.read_u32().await.unwrap() as usize;
    let mut payload = vec![0u8; len];
    stream.read_exact(&mut payload).await.unwrap();
    let reply = String::from_utf8(payload).unwrap();
    assert!(
        reply == "You get down." || reply.starts_with("You grab the "),
        "unexpected reply: {}",
        reply
    );

    if reply.starts_with("You grab the ") {
        assert!(matches!(
            server.sink.dispatched()[0],
            Dispatch::UpdateBadge { .. }
        ));
    }

    server.stop().await;
}

#[tokio::test]
async fn test_oversized_frame_closes_session() {
    let server = TestServer::start(|settings| settings.framing.max_frame_len = 16).await;
    let mut stream = TcpStream::connect(server.addr).await.unwrap();

    // announce a 1 KiB payload
    stream.write_all(&[0, 0, 4, 0]).await.unwrap();

    let mut buf = [0u8; 1];
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("session did not close");
    assert_eq!(read.unwrap(), 0);

    server.stop().await;
}

#[tokio::test]
async fn test_shutdown_ends_open_sessions() {
    let server = TestServer::start(|_| {}).await;
    let mut client = GameClient::connect(server.addr).await.unwrap();
    client.request("look").await.unwrap();

    server.stop().await;

    let err = client.receive().await.unwrap_err();
    assert!(matches!(err, FramingError::ConnectionClosed { .. } | FramingError::Io(_)));
}
