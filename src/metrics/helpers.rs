//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    FRAMES_READ_TOTAL, FRAMES_WRITTEN_TOTAL, FRAME_BYTES_TOTAL, FRAME_ERRORS_TOTAL,
    GAMES_WON_TOTAL, GAME_COMMANDS_TOTAL, NOTIFICATIONS_DISPATCHED_TOTAL, SESSIONS_ACTIVE,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording frame metrics
pub struct FrameMetrics;

impl FrameMetrics {
    /// Record a frame read, `bytes` including the length prefix
    pub fn record_read(bytes: usize) {
        FRAMES_READ_TOTAL.inc();
        FRAME_BYTES_TOTAL
            .with_label_values(&["read"])
            .inc_by(bytes as u64);
    }

    /// Record a frame written, `bytes` including the length prefix
    pub fn record_written(bytes: usize) {
        FRAMES_WRITTEN_TOTAL.inc();
        FRAME_BYTES_TOTAL
            .with_label_values(&["written"])
            .inc_by(bytes as u64);
    }

    /// Record a framing error
    pub fn record_error(kind: &str) {
        FRAME_ERRORS_TOTAL.with_label_values(&[kind]).inc();
    }
}

/// Helper struct for recording game metrics
pub struct GameMetrics;

impl GameMetrics {
    pub fn session_started() {
        SESSIONS_ACTIVE.inc();
    }

    pub fn session_ended() {
        SESSIONS_ACTIVE.dec();
    }

    /// Record a handled command by its verb
    pub fn record_command(verb: &str) {
        GAME_COMMANDS_TOTAL.with_label_values(&[verb]).inc();
    }

    pub fn record_won() {
        GAMES_WON_TOTAL.inc();
    }
}

/// Helper struct for recording notification metrics
pub struct NotificationMetrics;

impl NotificationMetrics {
    /// Record a dispatch by kind label
    pub fn record_dispatched(kind: &str) {
        NOTIFICATIONS_DISPATCHED_TOTAL
            .with_label_values(&[kind])
            .inc();
    }
}
