//! Tour scenes: greeting, geolocation handling, the kremlin prompt and places

use crate::places::Landmark;
use crate::protocol::{Button, Card, Directives, TurnContext, WebhookResponse};
use crate::services::SkillServices;
use super::Scene;

pub const WELCOME_TEXT: &str = "Добро пожаловать в навык Bar'ские приключения. Я проведу вас по \
    Великому Новгороду и подскажу, где выпить после прогулки. Разрешите доступ к геолокации, \
    чтобы я понимала, где вы находитесь, или скажите «начать приключение».";

pub const START_BUTTON: &str = "Начать приключение";

pub const GEOLOCATION_REJECTED_TEXT: &str = "К сожалению, мне не удалось получить ваши координаты. \
    Чтобы продолжить работу с навыком, разрешите доступ к геолокации.";

pub const START_TOUR_TEXT: &str =
    "Вы в Великом Новгороде, на территории старинного кремля. Возле какого места вы находитесь?";

/// Button titles offering the activities
pub(super) fn activity_buttons() -> Vec<Button> {
    ["Начать экскурсию", "Квест", "Викторина", "Совет"]
        .into_iter()
        .map(Button::hidden)
        .collect()
}

pub(super) fn welcome(turn: &TurnContext) -> WebhookResponse {
    Scene::Welcome
        .respond(turn, WELCOME_TEXT)
        .directives(Directives::request_geolocation())
        .button(Button::hidden(START_BUTTON))
        .build()
}

pub(super) fn handle_geolocation(turn: &TurnContext) -> WebhookResponse {
    let scene = Scene::HandleGeolocation;

    match turn.location() {
        Some(location) if Scene::location_granted(turn) => {
            let text = format!(
                "Ваши координаты: широта {}, долгота {}",
                location.latitude, location.longitude
            );
            scene.respond(turn, text).buttons(activity_buttons()).build()
        }
        _ => scene
            .respond(turn, GEOLOCATION_REJECTED_TEXT)
            .directives(Directives::request_geolocation())
            .build(),
    }
}

pub(super) fn start_tour(turn: &TurnContext) -> WebhookResponse {
    Scene::StartTour
        .respond(turn, START_TOUR_TEXT)
        .state("screen", "start_tour")
        .buttons([
            Button::new(Landmark::SpasskayaTower.title()),
            Button::new(Landmark::SophiaCathedral.title()),
        ])
        .build()
}

pub(super) fn place(turn: &TurnContext, landmark: Landmark, services: &SkillServices) -> WebhookResponse {
    let mut builder = Scene::Place(landmark)
        .respond(turn, landmark.description())
        .buttons(
            Landmark::ALL
                .into_iter()
                .filter(|other| *other != landmark)
                .map(|other| Button::new(other.title())),
        );

    if let Some(image_id) = services.place_image(landmark) {
        builder = builder.card(Card::BigImage {
            image_id: image_id.to_string(),
            title: Some(landmark.title().to_string()),
            description: Some(landmark.description().to_string()),
        });
    }

    builder.build()
}
