use std::fmt;

use crate::xml::Node;

use super::content::{Notification, TemplateContent};
use super::kind::TileTemplate;
use super::provider::{BuiltinTemplates, TemplateProvider};
use super::sink::{Dispatch, NotificationSink};
use super::types::{NotificationResult, TileSize, UpdateTarget};

/// Builder for a live tile update
#[derive(Debug, Clone)]
pub struct TileNotification {
    template: TileTemplate,
    content: TemplateContent,
    tag: Option<String>,
    queue: Option<bool>,
}

impl TileNotification {
    /// Tile from the built-in platform template
    pub fn new(template: TileTemplate) -> Self {
        let content = TemplateContent::new(
            template.into(),
            BuiltinTemplates::document(template.into()),
        );
        Self::with_content(template, content)
    }

    /// Tile from a custom template provider
    pub fn from_provider(
        provider: &dyn TemplateProvider,
        template: TileTemplate,
    ) -> NotificationResult<Self> {
        let content = TemplateContent::load(provider, template.into())?;
        Ok(Self::with_content(template, content))
    }

    fn with_content(template: TileTemplate, content: TemplateContent) -> Self {
        Self {
            template,
            content,
            tag: None,
            queue: None,
        }
    }

    pub fn template(&self) -> TileTemplate {
        self.template
    }

    pub fn tile_size(&self) -> TileSize {
        self.template.tile_size()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Updates sharing a tag replace each other in the notification queue
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_no_branding(self) -> Self {
        self.with_branding("none")
    }

    pub fn with_logo_branding(self) -> Self {
        self.with_branding("logo")
    }

    pub fn with_name_branding(self) -> Self {
        self.with_branding("name")
    }

    fn with_branding(mut self, branding: &str) -> Self {
        if let Some(visual) = self.content.document_mut().element_mut("visual", 0) {
            visual.set_attribute("branding", branding);
        }
        self
    }

    /// Turn the tile's notification queue on when this tile is set
    pub fn with_notifications(mut self) -> Self {
        self.queue = Some(true);
        self
    }

    /// Turn the tile's notification queue off when this tile is set
    pub fn without_notifications(mut self) -> Self {
        self.queue = Some(false);
        self
    }

    /// Merge another tile's binding into this one, e.g. a square and a wide layout
    /// in a single update. The imported node is not checked for compatibility.
    pub fn with_tile(mut self, other: &TileNotification) -> Self {
        let imported = other
            .content
            .document()
            .element("visual", 0)
            .and_then(|visual| visual.last_child())
            .cloned();

        if let (Some(node), Some(visual)) =
            (imported, self.content.document_mut().element_mut("visual", 0))
        {
            visual.append_child(node);
        }
        self
    }

    /// Update the application tile
    pub fn set(&self, sink: &dyn NotificationSink) -> NotificationResult<()> {
        self.dispatch_to(sink, UpdateTarget::Application)
    }

    /// Update a pinned secondary tile
    pub fn set_secondary(
        &self,
        sink: &dyn NotificationSink,
        tile_id: impl Into<String>,
    ) -> NotificationResult<()> {
        self.dispatch_to(sink, UpdateTarget::Secondary(tile_id.into()))
    }

    fn dispatch_to(&self, sink: &dyn NotificationSink, target: UpdateTarget) -> NotificationResult<()> {
        if let Some(enabled) = self.queue {
            sink.dispatch(Dispatch::EnableTileQueue {
                target: target.clone(),
                enabled,
            })?;
        }
        sink.dispatch(Dispatch::UpdateTile {
            target,
            xml: self.to_xml(),
            tag: self.tag.clone(),
            expiration: self.expiration(),
        })
    }

    /// Human readable summary, e.g. "Square tile with 4 lines of text and one image."
    pub fn describe(&self) -> String {
        describe_tile(self.template, self.text_lines(), self.images())
    }
}

pub(crate) fn describe_tile(template: TileTemplate, text_lines: usize, images: usize) -> String {
    let mut description = format!("{} tile with", template.tile_size());
    if text_lines > 0 {
        description.push(' ');
        description.push_str(&count_phrase(text_lines, "line of text", "lines of text"));
    }
    if images > 0 {
        if text_lines > 0 {
            description.push_str(" and");
        }
        if template.is_peek() {
            description.push_str(" a peek image with");
        }
        description.push(' ');
        description.push_str(&count_phrase(images, "image", "images"));
    }
    description.push('.');
    description
}

pub(crate) fn count_phrase(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("one {}", singular)
    } else {
        format!("{} {}", count, plural)
    }
}

impl Notification for TileNotification {
    fn content(&self) -> &TemplateContent {
        &self.content
    }

    fn content_mut(&mut self) -> &mut TemplateContent {
        &mut self.content
    }
}

impl fmt::Display for TileNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.content.document(), f)
    }
}
