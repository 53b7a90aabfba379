mod settings;

pub use settings::{
    FramingConfig, GameConfig, LoggingConfig, NotificationConfig, ServerConfig, Settings,
    MIN_GRID_SIZE,
};
