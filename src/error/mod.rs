use thiserror::Error;

use crate::framing::FramingError;
use crate::game::GameError;
use crate::notification::NotificationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("Framing error: {0}")]
    Framing(#[from] FramingError),

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, AppError>;
