//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the dialog engine.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{Result, SkillError};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, "baradventures.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| SkillError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a scene change
pub fn log_scene_transition(user_id: &str, from: &str, to: &str) {
    info!(user_id = user_id, from = from, to = to, "Moving to another scene");
}

/// Log a turn no scene could handle
pub fn log_fallback(user_id: &str, scene: &str, command: &str) {
    warn!(user_id = user_id, scene = scene, command = command, "Failed to parse user request");
}

/// Log an answer given in the trivia
pub fn log_quiz_answer(user_id: &str, theme: &str, correct: bool) {
    debug!(user_id = user_id, theme = theme, correct = correct, "Quiz answer evaluated");
}

/// Log an error that was turned into an apology
pub fn log_turn_error(user_id: &str, scene: &str, error: &SkillError) {
    error!(
        user_id = user_id,
        scene = scene,
        severity = %error.severity(),
        error = %error,
        "Turn failed, answering with apology"
    );
}
