//! Prometheus metrics for the game server and notification builders.
//!
//! - Frame metrics (frames and bytes read/written, framing errors by kind)
//! - Game metrics (active sessions, commands by verb, games won)
//! - Notification metrics (dispatches by kind)

mod helpers;

pub use helpers::{encode_metrics, FrameMetrics, GameMetrics, NotificationMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "adventure";

lazy_static! {
    // ============================================================================
    // Frame Metrics
    // ============================================================================

    /// Frames read from peers
    pub static ref FRAMES_READ_TOTAL: IntCounter = register_int_counter!(
        format!("{}_frames_read_total", METRIC_PREFIX),
        "Total length-prefixed frames read"
    ).unwrap();

    /// Frames written to peers
    pub static ref FRAMES_WRITTEN_TOTAL: IntCounter = register_int_counter!(
        format!("{}_frames_written_total", METRIC_PREFIX),
        "Total length-prefixed frames written"
    ).unwrap();

    /// Payload and prefix bytes by direction
    pub static ref FRAME_BYTES_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_frame_bytes_total", METRIC_PREFIX),
        "Total frame bytes transferred",
        &["direction"]
    ).unwrap();

    /// Framing failures by error kind
    pub static ref FRAME_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_frame_errors_total", METRIC_PREFIX),
        "Total framing errors",
        &["kind"]
    ).unwrap();

    // ============================================================================
    // Game Metrics
    // ============================================================================

    /// Connected players
    pub static ref SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        format!("{}_sessions_active", METRIC_PREFIX),
        "Number of active game sessions"
    ).unwrap();

    /// Commands handled by verb
    pub static ref GAME_COMMANDS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_game_commands_total", METRIC_PREFIX),
        "Total game commands handled",
        &["verb"]
    ).unwrap();

    /// Games finished by collecting every trophy
    pub static ref GAMES_WON_TOTAL: IntCounter = register_int_counter!(
        format!("{}_games_won_total", METRIC_PREFIX),
        "Total games won"
    ).unwrap();

    // ============================================================================
    // Notification Metrics
    // ============================================================================

    /// Notifications handed to a sink by dispatch kind
    pub static ref NOTIFICATIONS_DISPATCHED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_notifications_dispatched_total", METRIC_PREFIX),
        "Total notifications dispatched",
        &["kind"]
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_metrics() {
        // Initialize some metrics first (lazy_static requires first access)
        SESSIONS_ACTIVE.set(0);
        FRAMES_READ_TOTAL.inc();

        let output = encode_metrics().unwrap();
        assert!(output.contains("adventure_sessions_active"));
        assert!(output.contains("adventure_frames_read_total"));
    }

    #[test]
    fn test_labelled_metrics() {
        FRAME_BYTES_TOTAL.with_label_values(&["read"]).inc_by(12);
        FRAME_ERRORS_TOTAL.with_label_values(&["connection_closed"]).inc();
        GAME_COMMANDS_TOTAL.with_label_values(&["look"]).inc();
        NOTIFICATIONS_DISPATCHED_TOTAL.with_label_values(&["tile"]).inc();
        // Just verify no panics
    }
}
