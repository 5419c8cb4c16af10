//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::places::Landmark;
use crate::scenes::Scene;
use crate::utils::errors::{SkillError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_skill_config(&settings.skill)?;
    validate_storage_config(&settings.storage)?;
    validate_quiz_config(&settings.quiz)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate dialog engine configuration
fn validate_skill_config(config: &super::SkillConfig) -> Result<()> {
    if config.default_scene.is_empty() {
        return Err(SkillError::Config(
            "Default scene is required".to_string()
        ));
    }

    if !Scene::all().iter().any(|scene| scene.id() == config.default_scene) {
        return Err(SkillError::Config(
            format!("Default scene is not a registered scene: {}", config.default_scene)
        ));
    }

    for (slug, image_id) in &config.place_images {
        if Landmark::from_slug(slug).is_none() {
            return Err(SkillError::Config(
                format!("Image configured for unknown landmark: {}", slug)
            ));
        }
        if image_id.is_empty() {
            return Err(SkillError::Config(
                format!("Empty image id for landmark: {}", slug)
            ));
        }
    }

    Ok(())
}

/// Validate session store configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if config.backend != StorageBackend::Redis {
        return Ok(());
    }

    if config.redis.url.is_empty() {
        return Err(SkillError::Config(
            "Redis URL is required".to_string()
        ));
    }

    if config.redis.ttl_seconds == 0 {
        return Err(SkillError::Config(
            "Redis TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate trivia configuration
fn validate_quiz_config(config: &super::QuizConfig) -> Result<()> {
    if let Some(path) = &config.questions_path {
        if path.is_empty() {
            return Err(SkillError::Config(
                "Question bank path must not be empty when set".to_string()
            ));
        }
    }

    if config.session_ttl_seconds == 0 {
        return Err(SkillError::Config(
            "Quiz session TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SkillError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SkillError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
