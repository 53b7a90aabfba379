//! Notifications the server raises while players explore.

use crate::notification::{
    BadgeNotification, BadgeValue, Notification, NotificationResult, TemplateProvider,
    TileNotification, TileTemplate, ToastNotification, ToastSound, ToastTemplate,
    MAX_BADGE_NUMBER,
};

/// Tag shared by welcome tiles so a restart replaces the previous one
pub const WELCOME_TAG: &str = "welcome";

/// Wide and square welcome tile announcing where the server listens
pub fn welcome_tile(
    templates: &dyn TemplateProvider,
    address: &str,
) -> NotificationResult<TileNotification> {
    let square = TileNotification::from_provider(templates, TileTemplate::TileSquareText02)?
        .add_text("Adventure")?
        .add_text(address)?;

    Ok(
        TileNotification::from_provider(templates, TileTemplate::TileWideText09)?
            .add_text("Adventure server")?
            .add_text(&format!("Listening on {}", address))?
            .with_tag(WELCOME_TAG)
            .with_name_branding()
            .with_tile(&square),
    )
}

/// Badge showing how many trophies the player holds; clears at zero
pub fn trophy_badge(
    templates: &dyn TemplateProvider,
    trophies: usize,
) -> NotificationResult<BadgeNotification> {
    if trophies == 0 {
        return Ok(BadgeNotification::clear());
    }
    let count = u32::try_from(trophies).unwrap_or(u32::MAX).min(MAX_BADGE_NUMBER);
    BadgeNotification::from_provider(templates, BadgeValue::Number(count))
}

/// Toast celebrating a finished game
pub fn victory_toast(
    templates: &dyn TemplateProvider,
    trophies: usize,
) -> NotificationResult<ToastNotification> {
    Ok(
        ToastNotification::from_provider(templates, ToastTemplate::ToastText02)?
            .add_text("You won the game!")?
            .add_text(&format!("All {} trophies found.", trophies))?
            .with_audio(ToastSound::Reminder),
    )
}
