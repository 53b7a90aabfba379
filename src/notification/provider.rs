//! Template content providers.
//!
//! A provider hands out a fresh copy of the platform XML for a template kind,
//! with every `text` and `image` slot present but empty.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use crate::config::NotificationConfig;
use crate::xml::{Element, XmlDocument};

use super::kind::TemplateKind;
use super::types::{NotificationError, NotificationResult};

/// Source of template documents
pub trait TemplateProvider: Send + Sync {
    fn template_content(&self, kind: TemplateKind) -> NotificationResult<XmlDocument>;
}

/// The platform's own templates, generated from the slot table of each kind
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    /// Canonical, unmodified content for `kind`
    pub fn document(kind: TemplateKind) -> XmlDocument {
        let (root, (images, texts)) = match kind {
            TemplateKind::Tile(tile) => ("tile", tile.slots()),
            TemplateKind::Toast(toast) => ("toast", toast.slots()),
            TemplateKind::Badge(_) => {
                return XmlDocument::new(Element::new("badge").with_attribute("value", ""));
            }
        };

        let mut binding = Element::new("binding").with_attribute("template", kind.name());
        for id in 1..=images {
            binding = binding.with_child(
                Element::new("image")
                    .with_attribute("id", id.to_string())
                    .with_attribute("src", ""),
            );
        }
        for id in 1..=texts {
            binding = binding.with_child(Element::new("text").with_attribute("id", id.to_string()));
        }

        XmlDocument::new(Element::new(root).with_child(Element::new("visual").with_child(binding)))
    }
}

impl TemplateProvider for BuiltinTemplates {
    fn template_content(&self, kind: TemplateKind) -> NotificationResult<XmlDocument> {
        Ok(Self::document(kind))
    }
}

/// Templates read from `<dir>/<TemplateName>.xml`, parsed once and cached
pub struct DirectoryTemplateProvider {
    dir: PathBuf,
    cache: DashMap<TemplateKind, XmlDocument>,
}

impl DirectoryTemplateProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: DashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load(&self, kind: TemplateKind) -> NotificationResult<XmlDocument> {
        let path = self.dir.join(format!("{}.xml", kind.name()));
        let unavailable = |reason: String| NotificationError::TemplateUnavailable { kind, reason };

        let xml = std::fs::read_to_string(&path)
            .map_err(|e| unavailable(format!("{}: {}", path.display(), e)))?;
        let document = XmlDocument::parse(&xml)
            .map_err(|e| unavailable(format!("{}: {}", path.display(), e)))?;
        check_shape(kind, &document).map_err(unavailable)?;

        tracing::debug!(template = %kind, path = %path.display(), "Loaded template from disk");
        Ok(document)
    }
}

impl TemplateProvider for DirectoryTemplateProvider {
    fn template_content(&self, kind: TemplateKind) -> NotificationResult<XmlDocument> {
        if let Some(cached) = self.cache.get(&kind) {
            return Ok(cached.clone());
        }

        let document = self.load(kind)?;
        self.cache.insert(kind, document.clone());
        Ok(document)
    }
}

/// Builders rely on these elements existing.
fn check_shape(kind: TemplateKind, document: &XmlDocument) -> Result<(), String> {
    let root = document.root().name();
    match kind {
        TemplateKind::Tile(_) | TemplateKind::Toast(_) => {
            let expected = if matches!(kind, TemplateKind::Tile(_)) {
                "tile"
            } else {
                "toast"
            };
            if root != expected {
                return Err(format!("expected <{}> root, found <{}>", expected, root));
            }
            if document.count_elements("visual") == 0 {
                return Err("missing <visual> element".to_string());
            }
        }
        TemplateKind::Badge(_) => {
            if document.count_elements("badge") == 0 {
                return Err("missing <badge> element".to_string());
            }
        }
    }
    Ok(())
}

/// Provider selected by configuration: a template directory when set, the built-ins otherwise
pub fn provider_from_settings(config: &NotificationConfig) -> Arc<dyn TemplateProvider> {
    match &config.templates_dir {
        Some(dir) => {
            tracing::info!(dir = %dir, "Using template directory");
            Arc::new(DirectoryTemplateProvider::new(dir))
        }
        None => Arc::new(BuiltinTemplates),
    }
}
