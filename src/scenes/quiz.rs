//! Quiz scene: runs one trivia step per turn against the stored session

use chrono::Duration;
use tracing::debug;
use crate::protocol::{Button, ResponseBuilder, TurnContext, WebhookResponse};
use crate::quiz::{ActiveQuestion, QuizInput, QuizOutcome, TriviaEngine};
use crate::services::SkillServices;
use crate::state::UserContext;
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_utterance;
use crate::utils::logging::log_quiz_answer;
use super::{intents, tour, Scene};

pub const CHANGE_THEME_BUTTON: &str = "Сменить тему";

pub const UNAVAILABLE_TEXT: &str =
    "Вопросы для викторины пока не загружены. Попробуйте квест или совет, куда сходить.";

/// Classify the turn for the trivia engine
pub fn classify(turn: &TurnContext) -> QuizInput {
    let entering = turn.scene_id() != Some(Scene::Quiz.id())
        || turn.has_intent(intents::START_ACTIVITY)
        || turn.has_intent(intents::START_ACTIVITY_SHORT);

    if entering {
        QuizInput::Enter
    } else if turn.has_intent(intents::CHANGE_THEME)
        || turn.command() == normalize_utterance(CHANGE_THEME_BUTTON)
    {
        QuizInput::ChangeTheme
    } else if turn.is_geolocation_event() || turn.command().is_empty() {
        QuizInput::Repeat
    } else {
        QuizInput::Utterance(turn.command().to_string())
    }
}

pub(super) async fn reply(turn: &TurnContext, services: &SkillServices) -> Result<WebhookResponse> {
    let user_id = turn.user_id();
    let mut context = services
        .store
        .load_context(user_id)
        .await?
        .unwrap_or_else(|| UserContext::new(user_id));

    let input = classify(turn);
    let answering = matches!(input, QuizInput::Utterance(_)) && context.quiz.active_question().is_some();
    debug!(user_id = user_id, input = ?input, "Quiz turn");

    let mut session = context.quiz.clone();
    let outcome = {
        let mut rng = rand::thread_rng();
        TriviaEngine::new(&services.questions).step(&mut session, input, &mut rng)
    };

    if answering {
        let theme = context.quiz.theme().unwrap_or_default();
        log_quiz_answer(user_id, theme, matches!(outcome, QuizOutcome::Correct { .. }));
    }

    context.set_quiz(session);
    context.expire_in(Duration::seconds(services.settings.quiz.session_ttl_seconds as i64));
    services.store.save_context(&context).await?;

    Ok(render(turn, &outcome))
}

fn render(turn: &TurnContext, outcome: &QuizOutcome) -> WebhookResponse {
    let scene = Scene::Quiz;

    match outcome {
        QuizOutcome::ChooseTheme { themes, unrecognized } => {
            let prefix = if *unrecognized { "Такой темы у меня нет. " } else { "" };
            let text = format!("{}Выберите тему викторины: {}.", prefix, themes.join(", "));
            scene
                .respond(turn, text)
                .buttons(themes.iter().map(Button::new))
                .build()
        }
        QuizOutcome::ThemeSelected { theme, question } => {
            let text = format!("Тема «{}». {}", theme, question.text);
            with_options(scene.respond(turn, text), question)
        }
        QuizOutcome::Correct { next, correct, asked } => {
            let text = format!(
                "Правильно! Верных ответов: {} из {}. Следующий вопрос: {}",
                correct, asked, next.text
            );
            with_options(scene.respond(turn, text), next)
        }
        QuizOutcome::Reminder { question } => {
            let text = format!("Напоминаю вопрос: {}", question.text);
            with_options(scene.respond(turn, text), question)
        }
        QuizOutcome::Incorrect { retry } => {
            let text = format!("Неверно, попробуйте ещё раз. {}", retry.text);
            with_options(scene.respond(turn, text), retry)
        }
        QuizOutcome::Unavailable => scene
            .respond(turn, UNAVAILABLE_TEXT)
            .buttons(tour::activity_buttons())
            .build(),
    }
}

fn with_options(builder: ResponseBuilder, question: &ActiveQuestion) -> WebhookResponse {
    builder
        .buttons(question.options.iter().map(Button::new))
        .button(Button::new(CHANGE_THEME_BUTTON))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::protocol::request::fixtures::TurnBuilder;
    use crate::quiz::QuizPhase;
    use crate::state::MemoryStorage;
    use crate::quiz::QuestionBank;
    use std::sync::Arc;

    fn services() -> SkillServices {
        SkillServices::in_memory(Settings::default()).unwrap()
    }

    #[test]
    fn test_classify() {
        let entering = TurnBuilder::new("викторина").scene("HandleGeolocation").build();
        assert_eq!(classify(&entering), QuizInput::Enter);

        let restart = TurnBuilder::new("викторина")
            .scene("Quiz")
            .intent(intents::START_ACTIVITY, &[(intents::ACTIVITY_SLOT, "quiz")])
            .build();
        assert_eq!(classify(&restart), QuizInput::Enter);

        let change = TurnBuilder::new("Сменить тему").scene("Quiz").build();
        assert_eq!(classify(&change), QuizInput::ChangeTheme);

        let answer = TurnBuilder::new("Ячмень!").scene("Quiz").build();
        assert_eq!(classify(&answer), QuizInput::Utterance("ячмень".to_string()));

        let granted = TurnBuilder::new("")
            .scene("Quiz")
            .event_type("Geolocation.Allowed")
            .location(58.52, 31.27)
            .build();
        assert_eq!(classify(&granted), QuizInput::Repeat);

        let silence = TurnBuilder::new("?!").scene("Quiz").build();
        assert_eq!(classify(&silence), QuizInput::Repeat);
    }

    #[tokio::test]
    async fn test_geolocation_event_keeps_score() {
        let services = services();

        reply(&TurnBuilder::new("викторина").scene("Welcome").build(), &services).await.unwrap();
        reply(&TurnBuilder::new("Новгород").scene("Quiz").build(), &services).await.unwrap();
        let before = services.store.load_context("user-1").await.unwrap().unwrap();

        let granted = TurnBuilder::new("")
            .scene("Quiz")
            .event_type("Geolocation.Allowed")
            .location(58.521698, 31.268701)
            .build();
        let response = reply(&granted, &services).await.unwrap();

        let after = services.store.load_context("user-1").await.unwrap().unwrap();
        assert_eq!(after.quiz, before.quiz);
        assert_eq!(after.quiz.asked, 0);
        let active = after.quiz.active_question().unwrap();
        assert_eq!(response.text(), format!("Напоминаю вопрос: {}", active.text));
    }

    #[tokio::test]
    async fn test_saved_session_gets_lifetime() {
        let mut settings = Settings::default();
        settings.quiz.session_ttl_seconds = 600;
        let services = SkillServices::in_memory(settings).unwrap();

        reply(&TurnBuilder::new("викторина").scene("Welcome").build(), &services).await.unwrap();

        let saved = services.store.load_context("user-1").await.unwrap().unwrap();
        let expires_at = saved.expires_at.expect("quiz session expires");
        let lifetime = expires_at - saved.updated_at;
        assert!(lifetime > Duration::seconds(590) && lifetime <= Duration::seconds(600));
    }

    #[tokio::test]
    async fn test_entry_lists_themes_and_saves_session() {
        let services = services();
        let turn = TurnBuilder::new("викторина").scene("Welcome").build();

        let response = reply(&turn, &services).await.unwrap();
        assert_eq!(response.scene(), Some("Quiz"));
        assert_eq!(response.button_titles(), services.questions.themes());

        let saved = services.store.load_context("user-1").await.unwrap().unwrap();
        assert_eq!(saved.quiz.phase, QuizPhase::ChoosingTheme);
    }

    #[tokio::test]
    async fn test_buttons_come_from_stored_options() {
        let services = services();
        let theme = services.questions.themes()[0].to_string();

        reply(&TurnBuilder::new("викторина").scene("Welcome").build(), &services).await.unwrap();
        let response = reply(&TurnBuilder::new(&theme).scene("Quiz").build(), &services).await.unwrap();

        let saved = services.store.load_context("user-1").await.unwrap().unwrap();
        let active = saved.quiz.active_question().unwrap();
        let mut expected: Vec<&str> = active.options.iter().map(String::as_str).collect();
        expected.push(CHANGE_THEME_BUTTON);
        assert_eq!(response.button_titles(), expected);
    }

    #[tokio::test]
    async fn test_empty_bank_is_unavailable() {
        let services = SkillServices::new(
            Settings::default(),
            Arc::new(MemoryStorage::new()),
            QuestionBank::new(Vec::new()).unwrap(),
        );

        let response = reply(&TurnBuilder::new("викторина").build(), &services).await.unwrap();
        assert_eq!(response.text(), UNAVAILABLE_TEXT);
    }
}
