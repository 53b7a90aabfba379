//! Tile, toast and badge notification builders.
//!
//! A builder starts from the template document of its kind, binds text and images
//! into the template's fixed slots, and hands the serialized XML to a
//! [`NotificationSink`]:
//!
//! ```rust,ignore
//! TileNotification::new(TileTemplate::TileWideText03)
//!     .add_text("Welcome")?
//!     .with_notifications()
//!     .set(&sink)?;
//! ```

mod badge;
pub mod catalog;
mod content;
mod kind;
mod provider;
mod sink;
mod tile;
mod toast;
mod types;

pub use badge::{BadgeNotification, BadgeValue, MAX_BADGE_NUMBER};
pub use catalog::{BadgeInfo, TemplateInfo};
pub use content::{Notification, TemplateContent};
pub use kind::{BadgeGlyph, BadgeTemplate, TemplateKind, TileTemplate, ToastTemplate};
pub use provider::{
    provider_from_settings, BuiltinTemplates, DirectoryTemplateProvider, TemplateProvider,
};
pub use sink::{Dispatch, MemorySink, NotificationSink, TracingSink};
pub use tile::TileNotification;
pub use toast::{LoopingSound, ToastNotification, ToastSound};
pub use types::{NotificationError, NotificationResult, SlotType, TileSize, UpdateTarget};
