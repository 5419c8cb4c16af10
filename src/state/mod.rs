//! State management module
//!
//! This module handles per-user state that outlives a single turn

pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use context::UserContext;
pub use storage::{create_storage, MemoryStorage, RedisStorage, SessionStore};
