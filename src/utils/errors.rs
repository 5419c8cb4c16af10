//! Error handling for BarAdventures
//!
//! This module defines the main error type used throughout the skill
//! and the recovery policy the dispatcher applies to it.

use thiserror::Error;

/// Main error type for the skill
#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings loading error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    #[error("Scene id registered twice: {0}")]
    DuplicateScene(String),

    #[error("Points of interest set is empty")]
    EmptyPointsOfInterest,

    #[error("Question bank error: {0}")]
    QuestionBank(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for skill operations
pub type Result<T> = std::result::Result<T, SkillError>;

impl SkillError {
    /// Check if the error can be answered with an apology instead of failing the turn
    pub fn is_recoverable(&self) -> bool {
        match self {
            SkillError::Config(_) => false,
            SkillError::Settings(_) => false,
            SkillError::UnknownScene(_) => true,
            SkillError::DuplicateScene(_) => false,
            SkillError::EmptyPointsOfInterest => false,
            SkillError::QuestionBank(_) => false,
            SkillError::InvalidInput(_) => true,
            SkillError::Redis(_) => true,
            SkillError::Serialization(_) => true,
            SkillError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SkillError::Config(_) => ErrorSeverity::Critical,
            SkillError::Settings(_) => ErrorSeverity::Critical,
            SkillError::DuplicateScene(_) => ErrorSeverity::Critical,
            SkillError::EmptyPointsOfInterest => ErrorSeverity::Critical,
            SkillError::QuestionBank(_) => ErrorSeverity::Critical,
            SkillError::UnknownScene(_) => ErrorSeverity::Warning,
            SkillError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
