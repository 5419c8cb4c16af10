//! BarAdventures voice skill
//!
//! Scene-based dialog engine for a voice-assistant skill that guides users
//! around the Novgorod kremlin. This library provides the webhook protocol
//! types, the scene state machine, the nearest-place resolver, the trivia
//! engine and the session store behind it.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod places;
pub mod protocol;
pub mod quiz;
pub mod scenes;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{SkillError, Result};

// Re-export main components for easy access
pub use handlers::Dispatcher;
pub use protocol::{TurnContext, WebhookEvent, WebhookResponse};
pub use scenes::{Scene, SceneRegistry};
pub use services::SkillServices;
pub use state::{MemoryStorage, RedisStorage, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
