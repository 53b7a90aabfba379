//! Read-only registries describing every template the platform offers.

use lazy_static::lazy_static;
use serde::Serialize;
use strum::IntoEnumIterator;

use super::badge::{describe_badge, BadgeValue};
use super::kind::{BadgeGlyph, TemplateKind, TileTemplate, ToastTemplate};
use super::tile::describe_tile;
use super::toast::describe_toast;

/// Value shown by the numeric badge entry of the catalog
const SAMPLE_BADGE_NUMBER: u32 = 1;

/// Summary of one template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub kind: TemplateKind,
    pub name: String,
    pub text_lines: usize,
    pub images: usize,
    pub description: String,
}

/// Summary of one badge variant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeInfo {
    pub name: String,
    pub value: String,
    pub description: String,
}

lazy_static! {
    static ref TILES: Vec<TemplateInfo> = TileTemplate::iter()
        .map(|template| {
            let (images, text_lines) = template.slots();
            TemplateInfo {
                kind: template.into(),
                name: template.to_string(),
                text_lines,
                images,
                description: describe_tile(template, text_lines, images),
            }
        })
        .collect();

    static ref TOASTS: Vec<TemplateInfo> = ToastTemplate::iter()
        .map(|template| {
            let (images, text_lines) = template.slots();
            TemplateInfo {
                kind: template.into(),
                name: template.to_string(),
                text_lines,
                images,
                description: describe_toast(template, text_lines, images),
            }
        })
        .collect();

    static ref BADGES: Vec<BadgeInfo> = BadgeGlyph::iter()
        .map(BadgeValue::Glyph)
        .chain(std::iter::once(BadgeValue::Number(SAMPLE_BADGE_NUMBER)))
        .map(badge_info)
        .collect();
}

fn badge_info(value: BadgeValue) -> BadgeInfo {
    let name = match value {
        BadgeValue::Glyph(glyph) => format!("{:?}", glyph),
        BadgeValue::Number(_) => "Numeric".to_string(),
    };
    BadgeInfo {
        name,
        value: value.to_string(),
        description: describe_badge(value),
    }
}

pub fn tiles() -> &'static [TemplateInfo] {
    &TILES
}

pub fn toasts() -> &'static [TemplateInfo] {
    &TOASTS
}

pub fn badges() -> &'static [BadgeInfo] {
    &BADGES
}

/// Tile or toast entry by platform name
pub fn find(name: &str) -> Option<&'static TemplateInfo> {
    tiles().iter().chain(toasts()).find(|info| info.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(tiles().len(), 46);
        assert_eq!(toasts().len(), 8);
        assert_eq!(badges().len(), BadgeGlyph::iter().count() + 1);
    }

    #[test]
    fn test_tile_descriptions() {
        let info = find("TileWidePeekImageAndText01").unwrap();
        assert_eq!(info.text_lines, 1);
        assert_eq!(info.images, 1);
        assert_eq!(
            info.description,
            "Wide tile with one line of text and a peek image with one image."
        );

        let info = find("TileSquarePeekImageAndText01").unwrap();
        assert_eq!(
            info.description,
            "Square tile with 4 lines of text and a peek image with one image."
        );
    }

    #[test]
    fn test_toast_entry() {
        let info = find("ToastImageAndText01").unwrap();
        assert_eq!(info.kind, TemplateKind::Toast(ToastTemplate::ToastImageAndText01));
        assert_eq!(
            info.description,
            "ToastImageAndText01 toast with one line of text and one image."
        );
        assert!(find("NotATemplate").is_none());
    }

    #[test]
    fn test_badge_entries() {
        let badges = badges();
        assert_eq!(badges[0].value, "none");
        assert_eq!(badges[0].description, "Empty badge (clears the badge)");

        let numeric = badges.last().unwrap();
        assert_eq!(numeric.name, "Numeric");
        assert_eq!(numeric.value, "1");
        assert_eq!(numeric.description, "Numeric badge with the value 1");

        assert!(badges
            .iter()
            .any(|b| b.description == "Glyph badge with icon NewMessage" && b.value == "newMessage"));
    }
}
