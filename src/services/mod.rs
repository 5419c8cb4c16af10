//! Services module
//!
//! Capabilities injected into scene replies: settings, the session store and
//! the trivia question bank.

use std::sync::Arc;
use tracing::info;
use crate::config::Settings;
use crate::places::Landmark;
use crate::quiz::QuestionBank;
use crate::state::{create_storage, MemoryStorage, SessionStore};
use crate::utils::errors::Result;

/// Shared services handed to every scene reply
#[derive(Clone)]
pub struct SkillServices {
    pub settings: Arc<Settings>,
    pub store: Arc<dyn SessionStore>,
    pub questions: Arc<QuestionBank>,
}

impl SkillServices {
    pub fn new(settings: Settings, store: Arc<dyn SessionStore>, questions: QuestionBank) -> Self {
        Self {
            settings: Arc::new(settings),
            store,
            questions: Arc::new(questions),
        }
    }

    /// Build every service from the configuration
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        let store = create_storage(&settings.storage).await?;

        let questions = match &settings.quiz.questions_path {
            Some(path) => QuestionBank::load(path).await?,
            None => QuestionBank::builtin()?,
        };
        info!(questions = questions.len(), themes = questions.themes().len(), "Question bank ready");

        Ok(Self::new(settings, store, questions))
    }

    /// In-memory services with the built-in question bank
    pub fn in_memory(settings: Settings) -> Result<Self> {
        Ok(Self::new(settings, Arc::new(MemoryStorage::new()), QuestionBank::builtin()?))
    }

    /// Image configured for a landmark card
    pub fn place_image(&self, landmark: Landmark) -> Option<&str> {
        self.settings
            .skill
            .place_images
            .get(landmark.slug())
            .map(String::as_str)
    }
}

impl std::fmt::Debug for SkillServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillServices")
            .field("store", &self.store)
            .field("questions", &self.questions.len())
            .finish_non_exhaustive()
    }
}
