//! Turn dispatcher
//!
//! Resolves the scene persisted by the previous reply, asks it where the turn
//! goes and lets the chosen scene answer. Recoverable failures become the
//! current scene's apology; the rest are returned to the caller.

use tracing::{debug, info};
use crate::protocol::{TurnContext, WebhookEvent, WebhookResponse};
use crate::scenes::{Scene, SceneRegistry};
use crate::services::SkillServices;
use crate::utils::errors::{Result, SkillError};
use crate::utils::logging::{log_fallback, log_scene_transition, log_turn_error};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: SceneRegistry,
    services: SkillServices,
}

impl Dispatcher {
    pub fn new(registry: SceneRegistry, services: SkillServices) -> Self {
        Self { registry, services }
    }

    /// Dispatcher over every scene, defaulting to the configured scene
    pub fn from_services(services: SkillServices) -> Result<Self> {
        let registry = SceneRegistry::new(&services.settings.skill.default_scene)?;
        Ok(Self::new(registry, services))
    }

    pub fn services(&self) -> &SkillServices {
        &self.services
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Handle a raw webhook event
    pub async fn handle_event(&self, event: WebhookEvent) -> Result<WebhookResponse> {
        let prior = event.state.session.clone().unwrap_or_default();

        match TurnContext::from_event(event) {
            Ok(turn) => self.handle_turn(&turn).await,
            Err(e) if e.is_recoverable() => {
                let current = self.registry.resolve(prior.scene.as_deref());
                log_turn_error("", current.id(), &e);
                Ok(current.apology(&prior))
            }
            Err(e) => Err(e),
        }
    }

    /// Handle one normalized turn
    pub async fn handle_turn(&self, turn: &TurnContext) -> Result<WebhookResponse> {
        let Some(current_id) = turn.scene_id() else {
            let entry = self.registry.default_scene();
            info!(
                user_id = %turn.user_id(),
                session_id = %turn.session_id(),
                new_session = turn.is_new_session(),
                scene = %entry,
                "Starting new dialog"
            );
            return match entry.reply(turn, &self.services).await {
                Ok(response) => Ok(response),
                Err(e) => self.recover(entry, turn, e),
            };
        };

        let current = self.registry.resolve(Some(current_id));
        debug!(
            user_id = %turn.user_id(),
            session_id = %turn.session_id(),
            scene = %current,
            command = %turn.command(),
            "Dispatching turn"
        );

        let next = match current.transition(turn) {
            Ok(Some(next)) => next,
            Ok(None) => {
                log_fallback(turn.user_id(), current.id(), turn.command());
                return Ok(current.fallback(turn));
            }
            Err(e) => return self.recover(current, turn, e),
        };

        match next.reply(turn, &self.services).await {
            Ok(response) => {
                // The reply may hand over to another scene, e.g. a gated activity without location
                let to = response.scene().unwrap_or(next.id());
                log_scene_transition(turn.user_id(), current.id(), to);
                Ok(response)
            }
            Err(e) => self.recover(current, turn, e),
        }
    }

    fn recover(&self, current: Scene, turn: &TurnContext, error: SkillError) -> Result<WebhookResponse> {
        if !error.is_recoverable() {
            return Err(error);
        }

        log_turn_error(turn.user_id(), current.id(), &error);
        Ok(current.fallback(turn))
    }
}
