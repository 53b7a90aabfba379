use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::xml::Element;

use super::content::{Notification, TemplateContent};
use super::kind::ToastTemplate;
use super::provider::{BuiltinTemplates, TemplateProvider};
use super::sink::{Dispatch, NotificationSink};
use super::tile::count_phrase;
use super::types::{NotificationError, NotificationResult};

/// One-shot toast sounds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ToastSound {
    Default,
    IM,
    Mail,
    Reminder,
    SMS,
}

impl ToastSound {
    pub fn event_name(self) -> String {
        format!("Notification.{}", self)
    }
}

/// Sounds that can loop for the duration of a long toast
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum LoopingSound {
    Alarm,
    Alarm2,
    Alarm3,
    Alarm4,
    Alarm5,
    Alarm6,
    Alarm7,
    Alarm8,
    Alarm9,
    Alarm10,
    Call,
    Call2,
    Call3,
    Call4,
    Call5,
    Call6,
    Call7,
    Call8,
    Call9,
    Call10,
}

impl LoopingSound {
    pub fn event_name(self) -> String {
        format!("Notification.Looping.{}", self)
    }
}

const SOUND_SCHEME: &str = "ms-winsoundevent:";

/// Builder for a toast notification
#[derive(Debug, Clone)]
pub struct ToastNotification {
    template: ToastTemplate,
    content: TemplateContent,
}

impl ToastNotification {
    /// Toast from the built-in platform template
    pub fn new(template: ToastTemplate) -> Self {
        Self {
            template,
            content: TemplateContent::new(
                template.into(),
                BuiltinTemplates::document(template.into()),
            ),
        }
    }

    /// Toast from a custom template provider
    pub fn from_provider(
        provider: &dyn TemplateProvider,
        template: ToastTemplate,
    ) -> NotificationResult<Self> {
        Ok(Self {
            template,
            content: TemplateContent::load(provider, template.into())?,
        })
    }

    pub fn template(&self) -> ToastTemplate {
        self.template
    }

    /// Launch arguments handed to the app when the toast is activated
    pub fn with_arguments(mut self, args: impl Into<String>) -> Self {
        self.root_mut().set_attribute("launch", args);
        self
    }

    pub fn with_no_audio(mut self) -> Self {
        let root = self.root_mut();
        root.take_child_element("audio");
        root.append_child(crate::xml::Node::Element(
            Element::new("audio").with_attribute("silent", "true"),
        ));
        self
    }

    pub fn with_audio(self, sound: ToastSound) -> Self {
        self.with_audio_element(&sound.event_name(), false)
    }

    /// Looping sounds need a long toast, so the root is switched to `duration="long"`
    pub fn with_looping_audio(mut self, sound: LoopingSound) -> Self {
        self.root_mut().set_attribute("duration", "long");
        self.with_audio_element(&sound.event_name(), true)
    }

    fn with_audio_element(mut self, event_name: &str, looping: bool) -> Self {
        let root = self.root_mut();
        let mut audio = root
            .take_child_element("audio")
            .unwrap_or_else(|| Element::new("audio"));
        audio.remove_attribute("silent");
        audio.set_attribute("src", format!("{}{}", SOUND_SCHEME, event_name));
        audio.set_attribute("loop", if looping { "true" } else { "false" });
        root.append_child(crate::xml::Node::Element(audio));
        self
    }

    fn root_mut(&mut self) -> &mut Element {
        self.content.document_mut().root_mut()
    }

    /// Show the toast now
    pub fn send(&self, sink: &dyn NotificationSink) -> NotificationResult<()> {
        sink.dispatch(Dispatch::ShowToast {
            xml: self.to_xml(),
            expiration: self.expiration(),
        })
    }

    /// Deliver the toast at `deliver_at`, which must lie in the future
    pub fn schedule_at(
        &self,
        sink: &dyn NotificationSink,
        deliver_at: DateTime<Utc>,
    ) -> NotificationResult<()> {
        if deliver_at <= Utc::now() {
            return Err(NotificationError::invalid_argument(
                "deliver_at",
                format!("{} is not in the future", deliver_at),
            ));
        }
        sink.dispatch(Dispatch::ScheduleToast {
            xml: self.to_xml(),
            deliver_at,
            expiration: self.expiration(),
        })
    }

    pub fn schedule_in(&self, sink: &dyn NotificationSink, delay: Duration) -> NotificationResult<()> {
        self.schedule_at(sink, Utc::now() + delay)
    }

    /// Human readable summary, e.g. "ToastImageAndText01 toast with one line of text and one image."
    pub fn describe(&self) -> String {
        describe_toast(self.template, self.text_lines(), self.images())
    }
}

pub(crate) fn describe_toast(template: ToastTemplate, text_lines: usize, images: usize) -> String {
    let mut description = format!("{} toast with", template);
    if text_lines > 0 {
        description.push(' ');
        description.push_str(&count_phrase(text_lines, "line of text", "lines of text"));
    }
    if images > 0 {
        if text_lines > 0 {
            description.push_str(" and");
        }
        description.push(' ');
        description.push_str(&count_phrase(images, "image", "images"));
    }
    description.push('.');
    description
}

impl Notification for ToastNotification {
    fn content(&self) -> &TemplateContent {
        &self.content
    }

    fn content_mut(&mut self) -> &mut TemplateContent {
        &mut self.content
    }
}

impl fmt::Display for ToastNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.content.document(), f)
    }
}
