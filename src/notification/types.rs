use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::xml::XmlError;

use super::kind::TemplateKind;

/// Notification-specific error type
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    #[error("Slot {slot} is out of range: template has {count} {slot_type} slot(s)")]
    SlotOutOfRange {
        slot_type: SlotType,
        slot: usize,
        count: usize,
    },

    #[error("Template {kind} is unavailable: {reason}")]
    TemplateUnavailable { kind: TemplateKind, reason: String },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Template document error: {0}")]
    Xml(#[from] XmlError),

    #[error("Notification dispatch failed: {0}")]
    Dispatch(String),
}

impl NotificationError {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
}

/// Result type for notification operations
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Kind of editable slot in a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SlotType {
    Text,
    Image,
}

impl SlotType {
    /// Element name of the slot inside the template document
    pub fn element_name(self) -> &'static str {
        match self {
            SlotType::Text => "text",
            SlotType::Image => "image",
        }
    }
}

/// Tile shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TileSize {
    Square,
    Wide,
}

/// Which tile or badge an update applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum UpdateTarget {
    /// The application's primary tile
    Application,
    /// A pinned secondary tile
    Secondary(String),
}

impl std::fmt::Display for UpdateTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateTarget::Application => f.write_str("application"),
            UpdateTarget::Secondary(id) => write!(f, "secondary:{}", id),
        }
    }
}
