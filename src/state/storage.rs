//! Session store implementations
//!
//! This module defines the injected storage capability for per-user state and
//! its two backends: an in-process map for single-worker deployments and tests,
//! and Redis for anything that runs more than one worker or must survive
//! restarts. The in-process map is not shared between processes.

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use crate::config::{RedisConfig, StorageBackend, StorageConfig};
use crate::utils::errors::Result;
use super::context::UserContext;

/// Storage capability for per-user state
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Load a user's context; expired or missing contexts load as `None`
    async fn load_context(&self, user_id: &str) -> Result<Option<UserContext>>;

    /// Save a user's context, replacing the previous one
    async fn save_context(&self, context: &UserContext) -> Result<()>;

    /// Delete a user's context
    async fn delete_context(&self, user_id: &str) -> Result<()>;
}

/// Build the store selected in the configuration
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn SessionStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory session store");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Redis => {
            info!(url = %config.redis.url, "Using Redis session store");
            let storage = RedisStorage::new(config.redis.clone()).await?;
            storage.test_connection().await?;
            Ok(Arc::new(storage))
        }
    }
}

/// Process-local session store
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contexts: RwLock<HashMap<String, UserContext>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored contexts, expired ones included
    pub async fn len(&self) -> usize {
        self.contexts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contexts.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemoryStorage {
    async fn load_context(&self, user_id: &str) -> Result<Option<UserContext>> {
        let context = self.contexts.read().await.get(user_id).cloned();

        match context {
            Some(context) if context.is_expired() => {
                warn!(user_id = user_id, expires_at = ?context.expires_at, "Context has expired, removing");
                self.contexts.write().await.remove(user_id);
                Ok(None)
            }
            other => {
                debug!(user_id = user_id, found = other.is_some(), "Context loaded from memory");
                Ok(other)
            }
        }
    }

    async fn save_context(&self, context: &UserContext) -> Result<()> {
        self.contexts.write().await.insert(context.user_id.clone(), context.clone());
        debug!(user_id = %context.user_id, "Context saved to memory");
        Ok(())
    }

    async fn delete_context(&self, user_id: &str) -> Result<()> {
        self.contexts.write().await.remove(user_id);
        Ok(())
    }
}

/// Redis-based session store
#[derive(Clone)]
pub struct RedisStorage {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Redis configuration
    config: RedisConfig,
}

impl RedisStorage {
    /// Create a new Redis storage instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Get the Redis key for a user's context
    fn get_context_key(&self, user_id: &str) -> String {
        context_key(&self.config.prefix, user_id)
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// TTL for a context: its own expiry if set, the configured default otherwise
    fn ttl_for(&self, context: &UserContext) -> u64 {
        if let Some(expires_at) = context.expires_at {
            let duration = expires_at - chrono::Utc::now();
            std::cmp::max(duration.num_seconds(), 60) as u64 // Minimum 60 seconds
        } else {
            self.config.ttl_seconds
        }
    }
}

fn context_key(prefix: &str, user_id: &str) -> String {
    format!("{}context:{}", prefix, user_id)
}

#[async_trait]
impl SessionStore for RedisStorage {
    async fn load_context(&self, user_id: &str) -> Result<Option<UserContext>> {
        let key = self.get_context_key(user_id);
        debug!(user_id = user_id, key = %key, "Loading context from Redis");

        let mut conn = self.connection_manager.clone();

        let serialized: Option<String> = match conn.get::<&str, Option<String>>(&key).await {
            Ok(data) => data,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to get context from Redis");
                return Err(e.into());
            }
        };

        let Some(data) = serialized else {
            debug!(user_id = user_id, "No context found in Redis");
            return Ok(None);
        };

        let context: UserContext = match serde_json::from_str(&data) {
            Ok(context) => context,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to deserialize context");
                return Err(e.into());
            }
        };

        if context.is_expired() {
            warn!(user_id = user_id, expires_at = ?context.expires_at, "Context has expired, removing");
            self.delete_context(user_id).await?;
            return Ok(None);
        }

        Ok(Some(context))
    }

    async fn save_context(&self, context: &UserContext) -> Result<()> {
        let key = self.get_context_key(&context.user_id);
        let serialized = serde_json::to_string(context)?;
        let ttl_seconds = self.ttl_for(context);

        let mut conn = self.connection_manager.clone();
        match conn.set_ex::<_, _, ()>(&key, serialized, ttl_seconds).await {
            Ok(_) => {
                debug!(user_id = %context.user_id, ttl_seconds = ttl_seconds, "Context saved to Redis");
                Ok(())
            }
            Err(e) => {
                error!(user_id = %context.user_id, error = %e, "Failed to save context to Redis");
                Err(e.into())
            }
        }
    }

    async fn delete_context(&self, user_id: &str) -> Result<()> {
        let key = self.get_context_key(user_id);
        let mut conn = self.connection_manager.clone();

        let deleted: u32 = conn.del(&key).await?;
        debug!(user_id = user_id, deleted = deleted, "Context deletion attempted");

        Ok(())
    }
}

impl std::fmt::Debug for RedisStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
