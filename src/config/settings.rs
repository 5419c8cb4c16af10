//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub skill: SkillConfig,
    pub storage: StorageConfig,
    pub quiz: QuizConfig,
    pub logging: LoggingConfig,
}

/// Dialog engine configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Scene used for new sessions and unknown persisted scene ids
    pub default_scene: String,
    /// Image ids for place cards, keyed by landmark slug
    pub place_images: HashMap<String, String>,
}

/// Session store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Redis,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub redis: RedisConfig,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Trivia configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct QuizConfig {
    /// JSON question bank; the built-in bank is used when unset
    pub questions_path: Option<String>,
    /// How long an idle trivia session is kept
    pub session_ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("BARADVENTURES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::SkillError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skill: SkillConfig::default(),
            storage: StorageConfig::default(),
            quiz: QuizConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            questions_path: None,
            session_ttl_seconds: 3600,
        }
    }
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            default_scene: "Welcome".to_string(),
            place_images: HashMap::new(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            redis: RedisConfig::default(),
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            prefix: "baradventures:".to_string(),
            ttl_seconds: 86400,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
        }
    }
}
