// Supporting modules
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Notification templates
pub mod notification;
pub mod xml;

// Game protocol and server
pub mod framing;
pub mod game;
pub mod server;
