//! Conversation scenarios
//!
//! Drives the dispatcher turn by turn with in-memory services, the way the
//! platform would: every event carries the session state of the previous
//! reply.

mod helpers;

use helpers::*;
use serde_json::json;
use BarAdventures::config::Settings;
use BarAdventures::scenes::FALLBACK_TEXT;
use BarAdventures::state::SessionStore;

#[tokio::test]
async fn test_entry_turn_greets_and_requests_geolocation() {
    let mut ctx = TestContext::new();

    let response = ctx.send(EventBuilder::utterance("").new_session()).await;

    assert_eq!(response.scene(), Some("Welcome"));
    assert!(response.requests_geolocation());
    let buttons = response.response.buttons.as_ref().expect("start button");
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].title, "Начать приключение");
    assert!(buttons[0].hide);
    assert_eq!(response.version, "1.0");
    assert_eq!(response.response.tts, response.response.text);
}

#[tokio::test]
async fn test_granted_geolocation_reports_coordinates() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let response = ctx
        .send(EventBuilder::geolocation_allowed(KREMLIN_LAT, KREMLIN_LON))
        .await;

    assert_eq!(response.scene(), Some("HandleGeolocation"));
    assert!(response.text().contains("58.521698"));
    assert!(response.text().contains("31.268701"));
    assert!(!response.requests_geolocation());
}

#[tokio::test]
async fn test_grant_after_refusal_in_geolocation_scene() {
    let mut ctx = TestContext::new();
    ctx.say("").await;
    ctx.send(EventBuilder::geolocation_rejected()).await;
    assert_eq!(ctx.scene(), Some("HandleGeolocation"));

    let response = ctx
        .send(EventBuilder::geolocation_allowed(KREMLIN_LAT, KREMLIN_LON))
        .await;

    assert_eq!(response.scene(), Some("HandleGeolocation"));
    assert_eq!(response.text(), "Ваши координаты: широта 58.521698, долгота 31.268701");
}

#[tokio::test]
async fn test_rejected_geolocation_asks_again() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let response = ctx.send(EventBuilder::geolocation_rejected()).await;

    assert_eq!(response.scene(), Some("HandleGeolocation"));
    assert!(response.requests_geolocation());
}

#[tokio::test]
async fn test_quest_needs_geolocation() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let denied = ctx.send(EventBuilder::utterance("давай квест").activity("quest")).await;
    assert_eq!(denied.scene(), Some("ActivityNotAllowed"));
    assert!(denied.requests_geolocation());

    let granted = ctx
        .send(EventBuilder::utterance("давай квест").activity("quest").location(KREMLIN_LAT, KREMLIN_LON))
        .await;
    assert_eq!(granted.scene(), Some("Quest"));
    assert!(granted.text().contains("Памятник «Тысячелетие России»"));
}

#[tokio::test]
async fn test_advice_with_geolocation() {
    let mut ctx = TestContext::new();
    ctx.send(EventBuilder::geolocation_allowed(KREMLIN_LAT, KREMLIN_LON)).await;

    let response = ctx
        .send(EventBuilder::utterance("куда сходить").activity("advice").location(KREMLIN_LAT, KREMLIN_LON))
        .await;

    assert_eq!(response.scene(), Some("Advice"));
    let card = serde_json::to_value(&response.response.card).unwrap();
    assert_eq!(card["type"], json!("ItemsList"));
    assert_eq!(card["items"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_unknown_activity() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let response = ctx.send(EventBuilder::utterance("давай караоке").activity("karaoke")).await;

    assert_eq!(response.scene(), Some("UnknownActivity"));
    assert_eq!(response.button_titles(), vec!["Квест", "Викторина", "Совет"]);
}

#[tokio::test]
async fn test_tour_screen_field_round_trips() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let tour = ctx.send(EventBuilder::utterance("начать приключение").intent("start_tour")).await;
    assert_eq!(tour.scene(), Some("StartTour"));
    assert_eq!(tour.session_state.get("screen"), Some(&json!("start_tour")));

    let apology = ctx.say("сколько времени").await;
    assert_eq!(apology.text(), FALLBACK_TEXT);
    assert_eq!(apology.scene(), Some("StartTour"));
    assert_eq!(apology.session_state.get("screen"), Some(&json!("start_tour")));

    let place = ctx.say("Софийский собор").await;
    assert_eq!(place.scene(), Some("PlaceSophiaCathedral"));
    assert_eq!(place.session_state.get("screen"), Some(&json!("start_tour")));
    assert!(place.text().starts_with("Софийский собор"));
}

#[tokio::test]
async fn test_place_image_card() {
    let mut settings = Settings::default();
    settings
        .skill
        .place_images
        .insert("spasskaya_tower".to_string(), "1652229/1f2e".to_string());
    let mut ctx = TestContext::with_settings(settings);
    ctx.say("").await;

    let response = ctx
        .send(EventBuilder::utterance("расскажи про спасскую башню").intent_with_slot(
            "start_tour_with_place",
            "place",
            "spasskaya_tower",
        ))
        .await;

    assert_eq!(response.scene(), Some("PlaceSpasskayaTower"));
    let card = serde_json::to_value(&response.response.card).unwrap();
    assert_eq!(card["type"], json!("BigImage"));
    assert_eq!(card["image_id"], json!("1652229/1f2e"));
}

#[tokio::test]
async fn test_find_nearby_place() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let response = ctx
        .send(
            EventBuilder::utterance("что рядом")
                .intent("find_nearby_place")
                .location(58.5186, 31.2846),
        )
        .await;

    assert_eq!(response.scene(), Some("PlaceYaroslavCourt"));
}

#[tokio::test]
async fn test_quiz_flow() {
    let mut ctx = TestContext::new();
    ctx.say("").await;

    let themes = ctx.send(EventBuilder::utterance("викторина").activity("quiz")).await;
    assert_eq!(themes.scene(), Some("Quiz"));
    assert!(themes.button_titles().contains(&"Новгород"));

    let first = ctx.say("Новгород").await;
    assert!(first.text().starts_with("Тема «Новгород»"));

    let stored = ctx.user_context().await.expect("quiz session saved");
    let active = stored.quiz.active_question().expect("question served").clone();
    let mut shown = active.options.clone();
    shown.push("Сменить тему".to_string());
    assert_eq!(first.button_titles(), shown.iter().map(String::as_str).collect::<Vec<_>>());

    // A wrong answer repeats the same question
    let wrong = active
        .options
        .iter()
        .find(|option| **option != active.right_answer)
        .expect("question has wrong answers")
        .clone();
    let retry = ctx.say(&wrong).await;
    assert!(retry.text().starts_with("Неверно"));
    assert!(retry.text().contains(&active.text));
    let stored = ctx.user_context().await.unwrap();
    assert_eq!(stored.quiz.active_question(), Some(&active));

    // The right answer is checked against the question shown, then the next one is served
    let correct = ctx.say(&active.right_answer).await;
    assert!(correct.text().starts_with("Правильно! Верных ответов: 1 из 2."));
    let stored = ctx.user_context().await.unwrap();
    assert_eq!(stored.quiz.correct, 1);
    assert_eq!(stored.quiz.asked, 2);
    assert_eq!(stored.quiz.theme(), Some("Новгород"));

    // Changing the theme keeps the score
    let change = ctx.send(EventBuilder::utterance("сменить тему").intent("change_theme")).await;
    assert!(change.text().starts_with("Выберите тему"));
    let stored = ctx.user_context().await.unwrap();
    assert_eq!(stored.quiz.correct, 1);
    assert!(stored.quiz.active_question().is_none());
}

#[tokio::test]
async fn test_geolocation_grant_during_quiz_is_not_an_answer() {
    let mut ctx = TestContext::new();
    ctx.say("").await;
    ctx.send(EventBuilder::utterance("викторина").activity("quiz")).await;
    ctx.say("Новгород").await;
    let before = ctx.user_context().await.unwrap();

    let response = ctx
        .send(EventBuilder::geolocation_allowed(KREMLIN_LAT, KREMLIN_LON))
        .await;

    assert_eq!(response.scene(), Some("Quiz"));
    assert!(response.text().starts_with("Напоминаю вопрос"));
    let after = ctx.user_context().await.unwrap();
    assert_eq!(after.quiz.asked, 0);
    assert_eq!(after.quiz.active_question(), before.quiz.active_question());
}

#[tokio::test]
async fn test_quiz_yields_to_tour_intent() {
    let mut ctx = TestContext::new();
    ctx.say("").await;
    ctx.send(EventBuilder::utterance("викторина").activity("quiz")).await;

    let response = ctx.send(EventBuilder::utterance("хочу на экскурсию").intent("start_tour")).await;
    assert_eq!(response.scene(), Some("StartTour"));
}

#[tokio::test]
async fn test_quiz_reentry_resets_to_theme_choice() {
    let mut ctx = TestContext::new();
    ctx.say("").await;
    ctx.send(EventBuilder::utterance("викторина").activity("quiz")).await;
    ctx.say("Медовуха").await;
    assert!(ctx.user_context().await.unwrap().quiz.active_question().is_some());

    ctx.send(EventBuilder::utterance("экскурсия").intent("start_tour")).await;
    let response = ctx.send(EventBuilder::utterance("викторина").activity("quiz")).await;

    assert!(response.text().starts_with("Выберите тему"));
    let stored = ctx.user_context().await.unwrap();
    assert!(stored.quiz.active_question().is_none());
    assert_eq!(stored.quiz.asked, 0);
}

#[tokio::test]
async fn test_anonymous_user_keyed_by_application() {
    let mut ctx = TestContext::new();
    ctx.send(EventBuilder::utterance("").anonymous()).await;
    ctx.send(EventBuilder::utterance("викторина").activity("quiz").anonymous()).await;

    assert!(ctx.store.load_context("F00D").await.unwrap().is_some());
    assert!(ctx.user_context().await.is_none());
}

#[tokio::test]
async fn test_reply_wire_format() {
    let mut ctx = TestContext::new();
    ctx.say("").await;
    let response = ctx.send(EventBuilder::utterance("экскурсия").intent("start_tour")).await;

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["version"], json!("1.0"));
    assert_eq!(value["session_state"], json!({ "scene": "StartTour", "screen": "start_tour" }));
    assert_eq!(
        value["response"]["buttons"],
        json!([
            { "title": "Спасская башня", "hide": false },
            { "title": "Софийский собор", "hide": false }
        ])
    );
    assert!(value["response"].get("directives").is_none());
    assert_eq!(value["response"]["end_session"], json!(false));
}
