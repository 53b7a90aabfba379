use chrono::{DateTime, Duration, Utc};

use crate::xml::XmlDocument;

use super::kind::TemplateKind;
use super::provider::TemplateProvider;
use super::types::{NotificationError, NotificationResult, SlotType};

/// Template document plus the slot bookkeeping shared by tiles and toasts.
///
/// Slot counts are taken once from the loaded document and never change, even if
/// later edits (such as merging another tile) add `text` or `image` elements.
#[derive(Debug, Clone)]
pub struct TemplateContent {
    kind: TemplateKind,
    document: XmlDocument,
    text_lines: usize,
    images: usize,
    next_text: usize,
    next_image: usize,
    expiration: Option<DateTime<Utc>>,
}

impl TemplateContent {
    pub fn new(kind: TemplateKind, document: XmlDocument) -> Self {
        let text_lines = document.count_elements(SlotType::Text.element_name());
        let images = document.count_elements(SlotType::Image.element_name());
        Self {
            kind,
            document,
            text_lines,
            images,
            next_text: 0,
            next_image: 0,
            expiration: None,
        }
    }

    /// Load the content for `kind`. A provider that cannot supply it is a configuration error.
    pub fn load(provider: &dyn TemplateProvider, kind: TemplateKind) -> NotificationResult<Self> {
        let document = provider.template_content(kind)?;
        let content = Self::new(kind, document);
        tracing::trace!(
            template = %kind,
            text_lines = content.text_lines,
            images = content.images,
            "Template loaded"
        );
        Ok(content)
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn document(&self) -> &XmlDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut XmlDocument {
        &mut self.document
    }

    pub fn text_lines(&self) -> usize {
        self.text_lines
    }

    pub fn images(&self) -> usize {
        self.images
    }

    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.expiration
    }

    pub fn set_expiration(&mut self, expires: DateTime<Utc>) {
        self.expiration = Some(expires);
    }

    /// Append `text` to a text slot; `slot = None` takes the next auto-assigned one
    pub fn bind_text(&mut self, text: &str, slot: Option<usize>) -> NotificationResult<()> {
        if text.trim().is_empty() {
            return Err(NotificationError::invalid_argument(
                "text",
                "must not be empty or whitespace",
            ));
        }

        let index = slot.unwrap_or(self.next_text);
        let element = self.slot_element(SlotType::Text, index)?;
        element.append_text(text);

        if slot.is_none() {
            self.next_text += 1;
        }
        Ok(())
    }

    /// Point an image slot at `uri`; repeated binds to one slot overwrite `src` and `alt`
    pub fn bind_image(
        &mut self,
        uri: &str,
        alt: &str,
        slot: Option<usize>,
    ) -> NotificationResult<()> {
        if uri.trim().is_empty() {
            return Err(NotificationError::invalid_argument(
                "uri",
                "must not be empty or whitespace",
            ));
        }

        let index = slot.unwrap_or(self.next_image);
        let element = self.slot_element(SlotType::Image, index)?;
        element.set_attribute("src", uri);
        if !alt.trim().is_empty() {
            element.set_attribute("alt", alt);
        }

        if slot.is_none() {
            self.next_image += 1;
        }
        Ok(())
    }

    fn slot_element(
        &mut self,
        slot_type: SlotType,
        index: usize,
    ) -> NotificationResult<&mut crate::xml::Element> {
        let count = match slot_type {
            SlotType::Text => self.text_lines,
            SlotType::Image => self.images,
        };
        if index >= count {
            return Err(NotificationError::SlotOutOfRange {
                slot_type,
                slot: index,
                count,
            });
        }
        self.document
            .element_mut(slot_type.element_name(), index)
            .ok_or(NotificationError::SlotOutOfRange {
                slot_type,
                slot: index,
                count,
            })
    }
}

/// Fluent slot-binding operations shared by tiles and toasts.
///
/// Every mutating method takes `self` by value and hands it back, so chains keep
/// the concrete builder type:
///
/// ```ignore
/// let toast = ToastNotification::new(ToastTemplate::ToastImageAndText01)
///     .add_text("Hello")?
///     .add_image("http://x/img.png", "alt text")?
///     .with_expiration_in(Duration::minutes(5));
/// ```
pub trait Notification: Sized {
    fn content(&self) -> &TemplateContent;

    fn content_mut(&mut self) -> &mut TemplateContent;

    /// Bind text to the next free text slot
    fn add_text(mut self, text: &str) -> NotificationResult<Self> {
        self.content_mut().bind_text(text, None)?;
        Ok(self)
    }

    /// Bind text to an explicit, zero-based text slot
    fn add_text_at(mut self, text: &str, slot: usize) -> NotificationResult<Self> {
        self.content_mut().bind_text(text, Some(slot))?;
        Ok(self)
    }

    /// Bind an image to the next free image slot. A blank `alt` is not written.
    fn add_image(mut self, uri: &str, alt: &str) -> NotificationResult<Self> {
        self.content_mut().bind_image(uri, alt, None)?;
        Ok(self)
    }

    /// Bind an image to an explicit, zero-based image slot
    fn add_image_at(mut self, uri: &str, alt: &str, slot: usize) -> NotificationResult<Self> {
        self.content_mut().bind_image(uri, alt, Some(slot))?;
        Ok(self)
    }

    /// Expire the notification at `expires`
    fn with_expiration(mut self, expires: DateTime<Utc>) -> Self {
        self.content_mut().set_expiration(expires);
        self
    }

    /// Expire the notification `delay` from now. "Now" is the time of this call.
    fn with_expiration_in(mut self, delay: Duration) -> Self {
        let expires = Utc::now() + delay;
        self.content_mut().set_expiration(expires);
        self
    }

    fn text_lines(&self) -> usize {
        self.content().text_lines()
    }

    fn images(&self) -> usize {
        self.content().images()
    }

    fn template_name(&self) -> &'static str {
        self.content().kind().name()
    }

    fn expiration(&self) -> Option<DateTime<Utc>> {
        self.content().expiration()
    }

    /// Serialized template document
    fn to_xml(&self) -> String {
        self.content().document().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::kind::{TileTemplate, ToastTemplate};
    use crate::notification::provider::BuiltinTemplates;

    fn content(kind: impl Into<TemplateKind>) -> TemplateContent {
        TemplateContent::load(&BuiltinTemplates, kind.into()).unwrap()
    }

    #[test]
    fn test_slot_counts_from_document() {
        let c = content(TileTemplate::TileWidePeekImageCollection05);
        assert_eq!(c.images(), 6);
        assert_eq!(c.text_lines(), 2);
    }

    #[test]
    fn test_every_slot_binds_once_and_bound_is_exclusive() {
        for kind in TemplateKind::all() {
            let mut c = content(kind);
            for slot in 0..c.text_lines() {
                c.bind_text("line", Some(slot)).unwrap();
            }
            for slot in 0..c.images() {
                c.bind_image("ms-appx:///a.png", "", Some(slot)).unwrap();
            }
            assert!(matches!(
                c.bind_text("line", Some(c.text_lines())),
                Err(NotificationError::SlotOutOfRange { .. })
            ));
            assert!(matches!(
                c.bind_image("ms-appx:///a.png", "", Some(c.images())),
                Err(NotificationError::SlotOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_auto_cursor_is_monotonic() {
        let mut c = content(TileTemplate::TileSquareText03);
        for line in ["a", "b", "c", "d"] {
            c.bind_text(line, None).unwrap();
        }
        for (i, expected) in ["a", "b", "c", "d"].iter().enumerate() {
            assert_eq!(&c.document().element("text", i).unwrap().text(), expected);
        }
        assert!(matches!(
            c.bind_text("e", None),
            Err(NotificationError::SlotOutOfRange {
                slot: 4,
                count: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_slot_does_not_move_cursor() {
        let mut c = content(ToastTemplate::ToastText04);
        c.bind_text("third", Some(2)).unwrap();
        c.bind_text("first", None).unwrap();
        assert_eq!(c.document().element("text", 0).unwrap().text(), "first");
        assert_eq!(c.document().element("text", 2).unwrap().text(), "third");
    }

    #[test]
    fn test_blank_text_rejected_without_advancing() {
        let mut c = content(ToastTemplate::ToastText02);
        assert!(matches!(
            c.bind_text("   ", None),
            Err(NotificationError::InvalidArgument { argument: "text", .. })
        ));
        c.bind_text("ok", None).unwrap();
        assert_eq!(c.document().element("text", 0).unwrap().text(), "ok");
    }

    #[test]
    fn test_image_rebind_overwrites() {
        let mut c = content(ToastTemplate::ToastImageAndText01);
        c.bind_image("http://x/1.png", "one", Some(0)).unwrap();
        c.bind_image("http://x/2.png", "", Some(0)).unwrap();

        let image = c.document().element("image", 0).unwrap();
        assert_eq!(image.attribute("src"), Some("http://x/2.png"));
        // a blank alt leaves the previous one in place
        assert_eq!(image.attribute("alt"), Some("one"));
    }

    #[test]
    fn test_blank_image_uri_rejected() {
        let mut c = content(ToastTemplate::ToastImageAndText01);
        assert!(matches!(
            c.bind_image("", "alt", None),
            Err(NotificationError::InvalidArgument { argument: "uri", .. })
        ));
    }
}
