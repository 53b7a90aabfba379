//! Dispatch boundary towards the platform notification manager.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metrics::NotificationMetrics;

use super::types::{NotificationResult, UpdateTarget};

/// A finished notification handed to the platform
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dispatch {
    UpdateTile {
        target: UpdateTarget,
        xml: String,
        tag: Option<String>,
        expiration: Option<DateTime<Utc>>,
    },
    EnableTileQueue {
        target: UpdateTarget,
        enabled: bool,
    },
    ShowToast {
        xml: String,
        expiration: Option<DateTime<Utc>>,
    },
    ScheduleToast {
        xml: String,
        deliver_at: DateTime<Utc>,
        expiration: Option<DateTime<Utc>>,
    },
    UpdateBadge {
        target: UpdateTarget,
        xml: String,
    },
}

impl Dispatch {
    /// Metric label for this dispatch
    pub fn kind(&self) -> &'static str {
        match self {
            Dispatch::UpdateTile { .. } => "tile",
            Dispatch::EnableTileQueue { .. } => "tile_queue",
            Dispatch::ShowToast { .. } => "toast",
            Dispatch::ScheduleToast { .. } => "scheduled_toast",
            Dispatch::UpdateBadge { .. } => "badge",
        }
    }

    /// Serialized document carried by the dispatch, if any
    pub fn xml(&self) -> Option<&str> {
        match self {
            Dispatch::UpdateTile { xml, .. }
            | Dispatch::ShowToast { xml, .. }
            | Dispatch::ScheduleToast { xml, .. }
            | Dispatch::UpdateBadge { xml, .. } => Some(xml),
            Dispatch::EnableTileQueue { .. } => None,
        }
    }
}

/// Receiver of finished notifications
pub trait NotificationSink: Send + Sync {
    fn dispatch(&self, dispatch: Dispatch) -> NotificationResult<()>;
}

/// Sink that writes every dispatch to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn dispatch(&self, dispatch: Dispatch) -> NotificationResult<()> {
        match &dispatch {
            Dispatch::UpdateTile {
                target,
                xml,
                tag,
                expiration,
            } => tracing::info!(
                target_tile = %target,
                tag = ?tag,
                expiration = ?expiration,
                xml = %xml,
                "Tile updated"
            ),
            Dispatch::EnableTileQueue { target, enabled } => tracing::info!(
                target_tile = %target,
                enabled,
                "Tile notification queue toggled"
            ),
            Dispatch::ShowToast { xml, expiration } => {
                tracing::info!(expiration = ?expiration, xml = %xml, "Toast shown")
            }
            Dispatch::ScheduleToast {
                xml,
                deliver_at,
                expiration,
            } => tracing::info!(
                deliver_at = %deliver_at,
                expiration = ?expiration,
                xml = %xml,
                "Toast scheduled"
            ),
            Dispatch::UpdateBadge { target, xml } => {
                tracing::info!(target_tile = %target, xml = %xml, "Badge updated")
            }
        }

        NotificationMetrics::record_dispatched(dispatch.kind());
        Ok(())
    }
}

/// In-memory sink that keeps every dispatch in order
#[derive(Debug, Default)]
pub struct MemorySink {
    dispatched: Mutex<Vec<Dispatch>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything dispatched so far
    pub fn dispatched(&self) -> Vec<Dispatch> {
        self.dispatched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.dispatched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for MemorySink {
    fn dispatch(&self, dispatch: Dispatch) -> NotificationResult<()> {
        NotificationMetrics::record_dispatched(dispatch.kind());
        self.dispatched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(dispatch);
        Ok(())
    }
}
