use std::fmt;

use crate::xml::XmlDocument;

use super::kind::{BadgeGlyph, BadgeTemplate};
use super::provider::{BuiltinTemplates, TemplateProvider};
use super::sink::{Dispatch, NotificationSink};
use super::types::{NotificationError, NotificationResult, UpdateTarget};

/// Highest number a numeric badge can show
pub const MAX_BADGE_NUMBER: u32 = 99;

/// What the badge displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeValue {
    Glyph(BadgeGlyph),
    Number(u32),
}

impl fmt::Display for BadgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeValue::Glyph(glyph) => fmt::Display::fmt(glyph, f),
            BadgeValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Builder for a tile badge
#[derive(Debug, Clone)]
pub struct BadgeNotification {
    value: BadgeValue,
    document: XmlDocument,
}

impl BadgeNotification {
    pub fn glyph(glyph: BadgeGlyph) -> Self {
        let document = BuiltinTemplates::document(BadgeTemplate::BadgeGlyph.into());
        Self::with_document(BadgeValue::Glyph(glyph), document)
    }

    /// Numeric badge; only 0 through 99 can be displayed
    pub fn number(value: u32) -> NotificationResult<Self> {
        validate_number(value)?;
        let document = BuiltinTemplates::document(BadgeTemplate::BadgeNumber.into());
        Ok(Self::with_document(BadgeValue::Number(value), document))
    }

    /// Badge that removes whatever the tile currently shows
    pub fn clear() -> Self {
        Self::glyph(BadgeGlyph::None)
    }

    pub fn from_provider(
        provider: &dyn TemplateProvider,
        value: BadgeValue,
    ) -> NotificationResult<Self> {
        let template = match value {
            BadgeValue::Glyph(_) => BadgeTemplate::BadgeGlyph,
            BadgeValue::Number(n) => {
                validate_number(n)?;
                BadgeTemplate::BadgeNumber
            }
        };
        let document = provider.template_content(template.into())?;
        Ok(Self::with_document(value, document))
    }

    fn with_document(value: BadgeValue, mut document: XmlDocument) -> Self {
        if let Some(badge) = document.element_mut("badge", 0) {
            badge.set_attribute("value", value.to_string());
        }
        Self { value, document }
    }

    pub fn value(&self) -> BadgeValue {
        self.value
    }

    pub fn template(&self) -> BadgeTemplate {
        match self.value {
            BadgeValue::Glyph(_) => BadgeTemplate::BadgeGlyph,
            BadgeValue::Number(_) => BadgeTemplate::BadgeNumber,
        }
    }

    pub fn to_xml(&self) -> String {
        self.document.to_string()
    }

    /// Badge the application tile
    pub fn set(&self, sink: &dyn NotificationSink) -> NotificationResult<()> {
        self.dispatch_to(sink, UpdateTarget::Application)
    }

    /// Badge a pinned secondary tile
    pub fn set_secondary(
        &self,
        sink: &dyn NotificationSink,
        tile_id: impl Into<String>,
    ) -> NotificationResult<()> {
        self.dispatch_to(sink, UpdateTarget::Secondary(tile_id.into()))
    }

    fn dispatch_to(&self, sink: &dyn NotificationSink, target: UpdateTarget) -> NotificationResult<()> {
        sink.dispatch(Dispatch::UpdateBadge {
            target,
            xml: self.to_xml(),
        })
    }

    pub fn describe(&self) -> String {
        describe_badge(self.value)
    }
}

pub(crate) fn describe_badge(value: BadgeValue) -> String {
    match value {
        BadgeValue::Glyph(BadgeGlyph::None) => "Empty badge (clears the badge)".to_string(),
        BadgeValue::Number(n) => format!("Numeric badge with the value {}", n),
        BadgeValue::Glyph(glyph) => format!("Glyph badge with icon {:?}", glyph),
    }
}

fn validate_number(value: u32) -> NotificationResult<()> {
    if value > MAX_BADGE_NUMBER {
        return Err(NotificationError::invalid_argument(
            "value",
            format!("{} exceeds the badge maximum of {}", value, MAX_BADGE_NUMBER),
        ));
    }
    Ok(())
}

impl fmt::Display for BadgeNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.document, f)
    }
}
