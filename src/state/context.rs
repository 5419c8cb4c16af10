//! Per-user context management
//!
//! The platform persists the scene id in the session state block of each
//! reply. Everything that outlives a single session block, currently the
//! trivia progress, lives in a [`UserContext`] kept by the session store.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Duration};
use crate::quiz::QuizSession;

/// State kept for one user between turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// User ID this context belongs to
    pub user_id: String,
    /// Trivia progress
    #[serde(default)]
    pub quiz: QuizSession,
    /// End of the trivia session lifetime; stores drop the context afterwards
    pub expires_at: Option<DateTime<Utc>>,
    /// When this context was last updated
    pub updated_at: DateTime<Utc>,
}

impl UserContext {
    /// Create an empty context for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            quiz: QuizSession::default(),
            expires_at: None,
            updated_at: Utc::now(),
        }
    }

    /// Replace the trivia progress
    pub fn set_quiz(&mut self, quiz: QuizSession) {
        self.quiz = quiz;
        self.touch();
    }

    /// Whether the lifetime set with [`UserContext::expire_in`] is over
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() > expires_at)
    }

    /// Keep the context for `lifetime` from now
    pub fn expire_in(&mut self, lifetime: Duration) {
        self.expires_at = Some(Utc::now() + lifetime);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
