//! Notification builder integration tests
//!
//! Builders loaded from a template directory, combined and dispatched to an
//! in-memory sink.

use chrono::{Duration, Utc};

use adventure_notify::config::NotificationConfig;
use adventure_notify::notification::{
    catalog, provider_from_settings, BadgeGlyph, BadgeNotification, Dispatch, MemorySink,
    Notification, NotificationError, TemplateKind, TileNotification, TileTemplate,
    ToastNotification, ToastTemplate, UpdateTarget,
};
use adventure_notify::xml::XmlDocument;

fn write_templates(dir: &std::path::Path) {
    std::fs::write(
        dir.join("TileWideText03.xml"),
        r#"<tile><visual version="2"><binding template="TileWideText03" fallback="TileWideText03"><text id="1"></text></binding></visual></tile>"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("ToastImageAndText01.xml"),
        r#"<toast><visual><binding template="ToastImageAndText01"><image id="1" src=""/><text id="1"></text></binding></visual></toast>"#,
    )
    .unwrap();
}

#[test]
fn test_directory_templates_drive_builders() {
    let dir = tempfile::tempdir().unwrap();
    write_templates(dir.path());
    let provider = provider_from_settings(&NotificationConfig {
        templates_dir: Some(dir.path().display().to_string()),
    });

    let tile = TileNotification::from_provider(provider.as_ref(), TileTemplate::TileWideText03)
        .unwrap()
        .add_text("Hello")
        .unwrap();
    let doc = XmlDocument::parse(&tile.to_xml()).unwrap();
    assert_eq!(doc.element("visual", 0).unwrap().attribute("version"), Some("2"));
    assert_eq!(doc.element("text", 0).unwrap().text(), "Hello");

    // a template missing from the directory is a hard failure
    let missing = TileNotification::from_provider(provider.as_ref(), TileTemplate::TileSquareText01);
    assert!(matches!(
        missing,
        Err(NotificationError::TemplateUnavailable {
            kind: TemplateKind::Tile(TileTemplate::TileSquareText01),
            ..
        })
    ));
}

#[test]
fn test_end_to_end_dispatch() {
    let sink = MemorySink::new();

    let square = TileNotification::new(TileTemplate::TileSquareText04)
        .add_text("Score: 3")
        .unwrap();
    TileNotification::new(TileTemplate::TileWideText04)
        .add_text("Three trophies found")
        .unwrap()
        .with_tile(&square)
        .with_tag("score")
        .with_expiration_in(Duration::hours(1))
        .set_secondary(&sink, "game-42")
        .unwrap();

    ToastNotification::new(ToastTemplate::ToastImageAndText01)
        .add_text("Hello")
        .unwrap()
        .add_image("http://x/img.png", "alt text")
        .unwrap()
        .with_arguments("room=12")
        .schedule_at(&sink, Utc::now() + Duration::minutes(1))
        .unwrap();

    BadgeNotification::glyph(BadgeGlyph::Playing).set(&sink).unwrap();

    let dispatched = sink.dispatched();
    assert_eq!(dispatched.len(), 3);

    match &dispatched[0] {
        Dispatch::UpdateTile {
            target,
            xml,
            tag,
            expiration,
        } => {
            assert_eq!(*target, UpdateTarget::Secondary("game-42".to_string()));
            assert_eq!(tag.as_deref(), Some("score"));
            assert!(expiration.is_some());
            let doc = XmlDocument::parse(xml).unwrap();
            assert_eq!(doc.count_elements("binding"), 2);
        }
        other => panic!("unexpected dispatch: {:?}", other),
    }

    match &dispatched[1] {
        Dispatch::ScheduleToast { xml, .. } => {
            let doc = XmlDocument::parse(xml).unwrap();
            assert_eq!(doc.root().attribute("launch"), Some("room=12"));
            assert_eq!(doc.element("image", 0).unwrap().attribute("alt"), Some("alt text"));
        }
        other => panic!("unexpected dispatch: {:?}", other),
    }

    assert_eq!(dispatched[2].xml(), Some(r#"<badge value="playing"/>"#));
}

#[test]
fn test_catalog_matches_builders() {
    for info in catalog::tiles().iter().chain(catalog::toasts()) {
        let description = match info.kind {
            TemplateKind::Tile(t) => TileNotification::new(t).describe(),
            TemplateKind::Toast(t) => ToastNotification::new(t).describe(),
            TemplateKind::Badge(_) => unreachable!(),
        };
        assert_eq!(info.description, description, "{}", info.name);
    }
}
