use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Smallest grid that still has interior rooms
pub const MIN_GRID_SIZE: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub framing: FramingConfig,
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FramingConfig {
    /// Largest payload accepted or produced, in bytes
    #[serde(default = "default_max_frame_len")]
    pub max_frame_len: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    /// Side of the square room grid
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Fixed RNG seed for reproducible worlds
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory holding `things.json` and `generator.json`
    #[serde(default)]
    pub assets_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Directory of `<TemplateName>.xml` files replacing the built-in templates
    #[serde(default)]
    pub templates_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    21212
}

fn default_max_frame_len() -> usize {
    1024 * 1024 // 1 MiB
}

fn default_grid_size() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();
        Self::from_dir("config")
    }

    /// Defaults, then `<dir>/default.*` and `<dir>/{RUN_MODE}.*`, then `ADVENTURE__*` variables
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("framing.max_frame_len", default_max_frame_len() as i64)?
            .set_default("game.grid_size", default_grid_size() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            // Load config files if they exist
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(&run_mode)).required(false))
            // ADVENTURE__SERVER__PORT, ADVENTURE__GAME__SEED, ...
            .add_source(
                Environment::with_prefix("ADVENTURE")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::Message(format!(
                "game.grid_size must be at least {}, got {}",
                MIN_GRID_SIZE, self.game.grid_size
            )));
        }
        if self.framing.max_frame_len == 0 {
            return Err(ConfigError::Message(
                "framing.max_frame_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            max_frame_len: default_max_frame_len(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            seed: None,
            assets_dir: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
