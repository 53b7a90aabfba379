//! TCP game server and client.

mod client;
mod listener;
pub mod notices;
mod session;
mod state;

pub use client::GameClient;
pub use listener::GameServer;
pub use session::GameSession;
pub use state::ServerState;
