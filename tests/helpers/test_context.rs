//! Test context for unified test setup
//!
//! Wires a dispatcher over in-memory services and keeps the session state of
//! the last reply, so scenario tests read like a conversation.

use std::sync::Arc;
use BarAdventures::config::Settings;
use BarAdventures::handlers::Dispatcher;
use BarAdventures::protocol::{SessionState, WebhookResponse};
use BarAdventures::quiz::QuestionBank;
use BarAdventures::services::SkillServices;
use BarAdventures::state::{MemoryStorage, SessionStore, UserContext};

use super::test_data::{test_user_id, EventBuilder};

/// One test conversation
pub struct TestContext {
    pub dispatcher: Dispatcher,
    pub store: Arc<MemoryStorage>,
    pub state: SessionState,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_bank(settings, QuestionBank::builtin().expect("built-in bank"))
    }

    pub fn with_bank(settings: Settings, bank: QuestionBank) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = Arc::new(MemoryStorage::new());
        let services = SkillServices::new(settings, store.clone(), bank);
        let dispatcher = Dispatcher::from_services(services).expect("dispatcher");

        Self {
            dispatcher,
            store,
            state: SessionState::default(),
        }
    }

    /// Send an event carrying the state of the previous reply
    pub async fn send(&mut self, event: EventBuilder) -> WebhookResponse {
        let event = event.state(&self.state).build();
        let response = self
            .dispatcher
            .handle_event(event)
            .await
            .expect("turn handled");
        self.state = response.session_state.clone();
        response
    }

    /// Send an utterance
    pub async fn say(&mut self, command: &str) -> WebhookResponse {
        self.send(EventBuilder::utterance(command)).await
    }

    /// Current scene id
    pub fn scene(&self) -> Option<&str> {
        self.state.scene.as_deref()
    }

    /// Stored context of the test user
    pub async fn user_context(&self) -> Option<UserContext> {
        self.store
            .load_context(test_user_id())
            .await
            .expect("memory store never fails")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
