//! Configuration for the widget
//!
//! Provides centralized configuration for the lifecycle, the chat panel and
//! the initial settings. Everything has a default; a TOML file may override
//! any subset.

use crate::avatar::LifecycleConfig;
use crate::settings::Settings;
use crate::{BuddyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Chat panel contents at startup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Show the canned two-message exchange before the first submission
    pub seed_history: bool,
    /// Text pre-filled in the input box
    pub initial_input: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            seed_history: true,
            initial_input: "Tell me a joke!".to_string(),
        }
    }
}

/// Configuration for the complete widget
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuddyConfig {
    /// Scripted conversation timing and reply
    pub lifecycle: LifecycleConfig,

    /// Chat panel start-up contents
    pub chat: ChatConfig,

    /// Initial preferences
    pub settings: Settings,
}

impl BuddyConfig {
    /// Read a TOML file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| BuddyError::ConfigError(e.to_string()))
    }

    /// Set the lifecycle configuration
    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Start with an empty chat log
    pub fn without_history(mut self) -> Self {
        self.chat.seed_history = false;
        self
    }

    /// Set the pre-filled input text
    pub fn with_initial_input(mut self, input: impl Into<String>) -> Self {
        self.chat.initial_input = input.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.lifecycle.word_delay_ms == 0 {
            return Err(BuddyError::ConfigError(
                "word_delay_ms must be greater than zero".to_string(),
            ));
        }
        if self.settings.text_size > Settings::MAX_TEXT_SIZE {
            return Err(BuddyError::ConfigError(format!(
                "text_size must be at most {}, got {}",
                Settings::MAX_TEXT_SIZE,
                self.settings.text_size
            )));
        }
        Ok(())
    }
}
