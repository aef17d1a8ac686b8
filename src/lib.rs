pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::services::ai_service::{GeminiService, QuizGenerator};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn QuizGenerator>,
    pub generation_timeout: Duration,
}

impl AppState {
    pub fn new(generator: Arc<dyn QuizGenerator>) -> Self {
        Self {
            generator,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = timeout;
        self
    }

    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let gemini = GeminiService::from_config(config)?;
        Ok(Self::new(Arc::new(gemini))
            .with_timeout(Duration::from_secs(config.generation_timeout_secs)))
    }
}
