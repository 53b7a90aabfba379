use std::sync::Arc;

use crate::config::Settings;
use crate::game::{CommandParser, GameResult, WorldGenerator};
use crate::notification::{provider_from_settings, NotificationSink, TemplateProvider};

/// Shared by every game session
#[derive(Clone)]
pub struct ServerState {
    pub settings: Arc<Settings>,
    pub generator: Arc<WorldGenerator>,
    pub parser: Arc<CommandParser>,
    pub templates: Arc<dyn TemplateProvider>,
    pub sink: Arc<dyn NotificationSink>,
}

impl ServerState {
    pub fn new(settings: Settings, sink: Arc<dyn NotificationSink>) -> GameResult<Self> {
        let generator = Arc::new(WorldGenerator::from_settings(&settings.game)?);
        let templates = provider_from_settings(&settings.notifications);

        Ok(Self {
            settings: Arc::new(settings),
            generator,
            parser: Arc::new(CommandParser::new()),
            templates,
            sink,
        })
    }
}
