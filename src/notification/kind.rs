//! Template kinds known to the notification platform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::types::{NotificationError, TileSize};

/// Tile layouts. Each variant fixes how many image and text slots the template has.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum TileTemplate {
    TileSquareBlock,
    TileSquareText01,
    TileSquareText02,
    TileSquareText03,
    TileSquareText04,
    TileSquareImage,
    TileSquarePeekImageAndText01,
    TileSquarePeekImageAndText02,
    TileSquarePeekImageAndText03,
    TileSquarePeekImageAndText04,
    TileWideText01,
    TileWideText02,
    TileWideText03,
    TileWideText04,
    TileWideText05,
    TileWideText06,
    TileWideText07,
    TileWideText08,
    TileWideText09,
    TileWideText10,
    TileWideText11,
    TileWideImage,
    TileWideImageCollection,
    TileWideImageAndText01,
    TileWideImageAndText02,
    TileWideBlockAndText01,
    TileWideBlockAndText02,
    TileWideSmallImageAndText01,
    TileWideSmallImageAndText02,
    TileWideSmallImageAndText03,
    TileWideSmallImageAndText04,
    TileWideSmallImageAndText05,
    TileWidePeekImageCollection01,
    TileWidePeekImageCollection02,
    TileWidePeekImageCollection03,
    TileWidePeekImageCollection04,
    TileWidePeekImageCollection05,
    TileWidePeekImageCollection06,
    TileWidePeekImageAndText01,
    TileWidePeekImageAndText02,
    TileWidePeekImage01,
    TileWidePeekImage02,
    TileWidePeekImage03,
    TileWidePeekImage04,
    TileWidePeekImage05,
    TileWidePeekImage06,
}

impl TileTemplate {
    /// `(images, text lines)` carried by the platform template
    pub const fn slots(self) -> (usize, usize) {
        use TileTemplate::*;
        match self {
            TileSquareBlock => (0, 2),
            TileSquareText01 => (0, 4),
            TileSquareText02 => (0, 2),
            TileSquareText03 => (0, 4),
            TileSquareText04 => (0, 1),
            TileSquareImage => (1, 0),
            TileSquarePeekImageAndText01 => (1, 4),
            TileSquarePeekImageAndText02 => (1, 2),
            TileSquarePeekImageAndText03 => (1, 4),
            TileSquarePeekImageAndText04 => (1, 1),
            TileWideText01 => (0, 5),
            TileWideText02 => (0, 9),
            TileWideText03 => (0, 1),
            TileWideText04 => (0, 1),
            TileWideText05 => (0, 5),
            TileWideText06 => (0, 10),
            TileWideText07 => (0, 9),
            TileWideText08 => (0, 10),
            TileWideText09 => (0, 2),
            TileWideText10 => (0, 9),
            TileWideText11 => (0, 10),
            TileWideImage => (1, 0),
            TileWideImageCollection => (5, 0),
            TileWideImageAndText01 => (1, 1),
            TileWideImageAndText02 => (1, 2),
            TileWideBlockAndText01 => (0, 6),
            TileWideBlockAndText02 => (0, 3),
            TileWideSmallImageAndText01 => (1, 1),
            TileWideSmallImageAndText02 => (1, 5),
            TileWideSmallImageAndText03 => (1, 1),
            TileWideSmallImageAndText04 => (1, 2),
            TileWideSmallImageAndText05 => (1, 2),
            TileWidePeekImageCollection01 => (5, 2),
            TileWidePeekImageCollection02 => (5, 5),
            TileWidePeekImageCollection03 => (5, 1),
            TileWidePeekImageCollection04 => (5, 1),
            TileWidePeekImageCollection05 => (6, 2),
            TileWidePeekImageCollection06 => (6, 1),
            TileWidePeekImageAndText01 => (1, 1),
            TileWidePeekImageAndText02 => (1, 5),
            TileWidePeekImage01 => (1, 2),
            TileWidePeekImage02 => (1, 5),
            TileWidePeekImage03 => (1, 1),
            TileWidePeekImage04 => (1, 1),
            TileWidePeekImage05 => (2, 2),
            TileWidePeekImage06 => (2, 1),
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn tile_size(self) -> TileSize {
        if self.name().starts_with("TileSquare") {
            TileSize::Square
        } else {
            TileSize::Wide
        }
    }

    pub fn is_peek(self) -> bool {
        self.name().contains("Peek")
    }
}

/// Toast layouts
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum ToastTemplate {
    ToastText01,
    ToastText02,
    ToastText03,
    ToastText04,
    ToastImageAndText01,
    ToastImageAndText02,
    ToastImageAndText03,
    ToastImageAndText04,
}

impl ToastTemplate {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// `(images, text lines)` carried by the platform template
    pub const fn slots(self) -> (usize, usize) {
        use ToastTemplate::*;
        match self {
            ToastText01 => (0, 1),
            ToastText02 => (0, 2),
            ToastText03 => (0, 2),
            ToastText04 => (0, 3),
            ToastImageAndText01 => (1, 1),
            ToastImageAndText02 => (1, 2),
            ToastImageAndText03 => (1, 2),
            ToastImageAndText04 => (1, 3),
        }
    }
}

/// Badge layouts
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum BadgeTemplate {
    BadgeGlyph,
    BadgeNumber,
}

/// Glyphs a badge can show. `Display` yields the value written into the badge XML.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum BadgeGlyph {
    None,
    Activity,
    Alert,
    Available,
    Away,
    Busy,
    NewMessage,
    Paused,
    Playing,
    Unavailable,
    Error,
    Attention,
}

/// Any template the platform can supply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "template")]
pub enum TemplateKind {
    Tile(TileTemplate),
    Toast(ToastTemplate),
    Badge(BadgeTemplate),
}

impl TemplateKind {
    /// Platform name of the template, e.g. `TileSquareText01`
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Tile(t) => t.name(),
            TemplateKind::Toast(t) => t.name(),
            TemplateKind::Badge(t) => (*t).into(),
        }
    }

    /// Every tile, toast and badge template
    pub fn all() -> impl Iterator<Item = TemplateKind> {
        TileTemplate::iter()
            .map(TemplateKind::Tile)
            .chain(ToastTemplate::iter().map(TemplateKind::Toast))
            .chain(BadgeTemplate::iter().map(TemplateKind::Badge))
    }
}

impl From<TileTemplate> for TemplateKind {
    fn from(template: TileTemplate) -> Self {
        TemplateKind::Tile(template)
    }
}

impl From<ToastTemplate> for TemplateKind {
    fn from(template: ToastTemplate) -> Self {
        TemplateKind::Toast(template)
    }
}

impl From<BadgeTemplate> for TemplateKind {
    fn from(template: BadgeTemplate) -> Self {
        TemplateKind::Badge(template)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateKind {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(tile) = TileTemplate::from_str(s) {
            return Ok(TemplateKind::Tile(tile));
        }
        if let Ok(toast) = ToastTemplate::from_str(s) {
            return Ok(TemplateKind::Toast(toast));
        }
        if let Ok(badge) = BadgeTemplate::from_str(s) {
            return Ok(TemplateKind::Badge(badge));
        }
        Err(NotificationError::UnknownTemplate(s.to_string()))
    }
}
