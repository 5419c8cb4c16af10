//! Scene state machine
//!
//! Every step of the dialog is a [`Scene`]. A turn arrives for the scene that
//! produced the previous reply; the scene decides which scene handles the
//! turn ([`Scene::transition`]) and that scene writes the reply
//! ([`Scene::reply`]). A scene that cannot place the turn apologizes and
//! stays where it is ([`Scene::fallback`]).
//!
//! Scene-specific rules always win over the rules shared by the tour family.

pub mod activity;
pub mod intents;
pub mod quiz;
pub mod registry;
pub mod tour;

pub use activity::Activity;
pub use registry::{SceneConstructor, SceneRegistry};

use std::fmt;
use crate::places::{nearest, Landmark, POINTS_OF_INTEREST};
use crate::protocol::{EventType, ResponseBuilder, SessionState, TurnContext, WebhookResponse};
use crate::services::SkillServices;
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_utterance;

/// Apology sent when no rule matched the turn
pub const FALLBACK_TEXT: &str =
    "Извините, я вас не поняла. Пожалуйста, попробуйте переформулировать вопрос.";

/// Dialog scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scene {
    Welcome,
    HandleGeolocation,
    StartTour,
    Quest,
    Quiz,
    Advice,
    UnknownActivity,
    ActivityNotAllowed,
    Place(Landmark),
}

impl Scene {
    /// Every scene, in registration order
    pub fn all() -> Vec<Scene> {
        registry::REGISTRATIONS.iter().map(|construct| construct()).collect()
    }

    /// Stable id persisted in the session state
    pub fn id(&self) -> &'static str {
        match self {
            Scene::Welcome => "Welcome",
            Scene::HandleGeolocation => "HandleGeolocation",
            Scene::StartTour => "StartTour",
            Scene::Quest => "Quest",
            Scene::Quiz => "Quiz",
            Scene::Advice => "Advice",
            Scene::UnknownActivity => "UnknownActivity",
            Scene::ActivityNotAllowed => "ActivityNotAllowed",
            Scene::Place(Landmark::SpasskayaTower) => "PlaceSpasskayaTower",
            Scene::Place(Landmark::SophiaCathedral) => "PlaceSophiaCathedral",
            Scene::Place(Landmark::MillenniumMonument) => "PlaceMillenniumMonument",
            Scene::Place(Landmark::YaroslavCourt) => "PlaceYaroslavCourt",
        }
    }

    /// Pick the scene for this turn: scene rules first, then the tour rules
    pub fn transition(&self, turn: &TurnContext) -> Result<Option<Scene>> {
        match self.handle_local_intents(turn)? {
            Some(next) => Ok(Some(next)),
            None => self.handle_global_intents(turn),
        }
    }

    /// Rules specific to this scene
    pub fn handle_local_intents(&self, turn: &TurnContext) -> Result<Option<Scene>> {
        let next = match self {
            Scene::Welcome
            | Scene::HandleGeolocation
            | Scene::Advice
            | Scene::UnknownActivity
            | Scene::ActivityNotAllowed => {
                turn.is_geolocation_event().then_some(Scene::HandleGeolocation)
            }
            Scene::StartTour | Scene::Quest | Scene::Place(_) => {
                Landmark::find_in(turn.command()).map(Scene::Place)
            }
            Scene::Quiz => {
                (!turn.has_any_intent(&intents::GLOBAL_INTENTS)).then_some(Scene::Quiz)
            }
        };
        Ok(next)
    }

    /// Rules shared by every tour scene
    pub fn handle_global_intents(&self, turn: &TurnContext) -> Result<Option<Scene>> {
        if turn.has_intent(intents::START_TOUR_WITH_PLACE) {
            let place = turn
                .slot_str(intents::START_TOUR_WITH_PLACE, intents::PLACE_SLOT)
                .and_then(|value| {
                    Landmark::from_slug(value).or_else(|| Landmark::find_in(&normalize_utterance(value)))
                });
            return Ok(Some(place.map_or(Scene::StartTour, Scene::Place)));
        }

        if turn.has_intent(intents::START_TOUR) {
            return Ok(Some(Scene::StartTour));
        }

        if turn.has_intent(intents::START_ACTIVITY) || turn.has_intent(intents::START_ACTIVITY_SHORT) {
            return Ok(Some(activity::resolve(turn)));
        }

        if turn.has_intent(intents::FIND_NEARBY_PLACE) {
            let Some(location) = turn.location() else {
                return Ok(Some(Scene::ActivityNotAllowed));
            };
            let closest = nearest(location, &POINTS_OF_INTEREST)?;
            return Ok(Some(Scene::Place(closest.landmark)));
        }

        Ok(None)
    }

    /// Produce this scene's reply
    pub async fn reply(&self, turn: &TurnContext, services: &SkillServices) -> Result<WebhookResponse> {
        match self {
            Scene::Welcome => Ok(tour::welcome(turn)),
            Scene::HandleGeolocation => Ok(tour::handle_geolocation(turn)),
            Scene::StartTour => Ok(tour::start_tour(turn)),
            Scene::Place(landmark) => Ok(tour::place(turn, *landmark, services)),
            Scene::Quest => activity::quest(turn),
            Scene::Advice => activity::advice(turn),
            Scene::UnknownActivity => Ok(activity::unknown(turn)),
            Scene::ActivityNotAllowed => Ok(activity::not_allowed(turn)),
            Scene::Quiz => quiz::reply(turn, services).await,
        }
    }

    /// Apologize and stay in this scene
    pub fn fallback(&self, turn: &TurnContext) -> WebhookResponse {
        self.apology(turn.state())
    }

    /// Apology from this scene for a turn that could not be read
    pub fn apology(&self, prior: &SessionState) -> WebhookResponse {
        ResponseBuilder::new(self.id(), FALLBACK_TEXT).carry(prior).build()
    }

    /// Response builder carrying this scene's id and the prior state
    pub(crate) fn respond(&self, turn: &TurnContext, text: impl Into<String>) -> ResponseBuilder {
        ResponseBuilder::new(self.id(), text).carry(turn.state())
    }

    /// Whether the turn grants geolocation with a usable position
    pub(crate) fn location_granted(turn: &TurnContext) -> bool {
        *turn.event_type() == EventType::GeolocationAllowed && turn.location().is_some()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
