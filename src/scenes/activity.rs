//! Activity scenes: quest, advice and the refusals around them

use crate::places::{nearest, rank, POINTS_OF_INTEREST};
use crate::protocol::{Button, Card, CardHeader, CardItem, Directives, TurnContext, WebhookResponse};
use crate::utils::errors::Result;
use super::{intents, Scene};

pub const UNKNOWN_ACTIVITY_TEXT: &str =
    "Такого я пока не умею. Могу предложить квест по кремлю, викторину или совет, куда сходить.";

pub const NOT_ALLOWED_TEXT: &str = "Для квеста и советов мне нужно знать, где вы находитесь. \
    Разрешите, пожалуйста, доступ к геолокации.";

/// Activity named in the `activity` slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Quest,
    Quiz,
    Advice,
}

impl Activity {
    pub fn from_slot(value: &str) -> Option<Self> {
        match value {
            intents::QUEST => Some(Activity::Quest),
            intents::QUIZ => Some(Activity::Quiz),
            intents::ADVICE => Some(Activity::Advice),
            _ => None,
        }
    }

    /// Whether the activity needs the user's position
    pub fn requires_location(self) -> bool {
        matches!(self, Activity::Quest | Activity::Advice)
    }

    pub fn scene(self) -> Scene {
        match self {
            Activity::Quest => Scene::Quest,
            Activity::Quiz => Scene::Quiz,
            Activity::Advice => Scene::Advice,
        }
    }
}

/// Scene for an activity request.
///
/// Unrecognized values go to [`Scene::UnknownActivity`]; activities that need
/// a position go to [`Scene::ActivityNotAllowed`] when the turn has none.
pub fn resolve(turn: &TurnContext) -> Scene {
    let value = turn
        .slot_str(intents::START_ACTIVITY, intents::ACTIVITY_SLOT)
        .or_else(|| turn.slot_str(intents::START_ACTIVITY_SHORT, intents::ACTIVITY_SLOT));

    match value.and_then(Activity::from_slot) {
        None => Scene::UnknownActivity,
        Some(activity) if activity.requires_location() && turn.location().is_none() => {
            Scene::ActivityNotAllowed
        }
        Some(activity) => activity.scene(),
    }
}

pub(super) fn quest(turn: &TurnContext) -> Result<WebhookResponse> {
    let Some(location) = turn.location() else {
        return Ok(not_allowed(turn));
    };

    let start = nearest(location, &POINTS_OF_INTEREST)?;
    let text = format!(
        "Начинаем квест! Ближе всего к вам {}. Доберитесь туда и скажите, что вы на месте: \
         там вас ждёт первая загадка.",
        start.name
    );

    Ok(Scene::Quest
        .respond(turn, text)
        .state("quest_start", start.landmark.slug())
        .button(Button::new(start.name))
        .build())
}

pub(super) fn advice(turn: &TurnContext) -> Result<WebhookResponse> {
    let Some(location) = turn.location() else {
        return Ok(not_allowed(turn));
    };

    let closest = nearest(location, &POINTS_OF_INTEREST)?;
    let text = format!(
        "Рядом с вами {}. Советую заглянуть в {}.",
        closest.name,
        closest.landmark.venue()
    );

    let items = rank(location, &POINTS_OF_INTEREST)
        .into_iter()
        .skip(1)
        .map(|point| CardItem {
            image_id: None,
            title: point.name.to_string(),
            description: Some(point.landmark.venue().to_string()),
        })
        .collect();

    Ok(Scene::Advice
        .respond(turn, text)
        .card(Card::ItemsList {
            header: Some(CardHeader { text: "Что ещё рядом".to_string() }),
            items,
        })
        .build())
}

pub(super) fn unknown(turn: &TurnContext) -> WebhookResponse {
    Scene::UnknownActivity
        .respond(turn, UNKNOWN_ACTIVITY_TEXT)
        .buttons(["Квест", "Викторина", "Совет"].into_iter().map(Button::new))
        .build()
}

pub(super) fn not_allowed(turn: &TurnContext) -> WebhookResponse {
    Scene::ActivityNotAllowed
        .respond(turn, NOT_ALLOWED_TEXT)
        .directives(Directives::request_geolocation())
        .build()
}
