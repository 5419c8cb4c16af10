//! Test data helpers for creating webhook events
//!
//! Events are built as JSON the way the platform sends them, then parsed with
//! the library's own envelope types.

use serde_json::{json, Value};
use BarAdventures::protocol::{SessionState, WebhookEvent};

/// Position inside the kremlin used by the geolocation scenarios
pub const KREMLIN_LAT: f64 = 58.521698;
pub const KREMLIN_LON: f64 = 31.268701;

/// Helper function to get test user ID
pub fn test_user_id() -> &'static str {
    "3A1F0E5D7C9B"
}

/// Builder for webhook events
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event: Value,
}

impl EventBuilder {
    /// A plain utterance from the test user
    pub fn utterance(command: &str) -> Self {
        Self {
            event: json!({
                "meta": { "locale": "ru-RU", "timezone": "Europe/Moscow" },
                "request": {
                    "command": command.to_lowercase(),
                    "original_utterance": command,
                    "type": "SimpleUtterance",
                    "nlu": { "tokens": [], "entities": [], "intents": {} }
                },
                "session": {
                    "session_id": "b1d4c7e2-0000-4a4a-9f9f-test",
                    "message_id": 0,
                    "skill_id": "bar-adventures",
                    "new": false,
                    "user": { "user_id": test_user_id() },
                    "application": { "application_id": "F00D" }
                },
                "state": { "session": {} },
                "version": "1.0"
            }),
        }
    }

    /// A geolocation grant carrying a position
    pub fn geolocation_allowed(lat: f64, lon: f64) -> Self {
        Self::utterance("")
            .event_type("Geolocation.Allowed")
            .location(lat, lon)
    }

    pub fn geolocation_rejected() -> Self {
        Self::utterance("").event_type("Geolocation.Rejected")
    }

    pub fn new_session(mut self) -> Self {
        self.event["session"]["new"] = json!(true);
        self
    }

    pub fn event_type(mut self, kind: &str) -> Self {
        self.event["request"]["type"] = json!(kind);
        self
    }

    pub fn intent(mut self, name: &str) -> Self {
        self.event["request"]["nlu"]["intents"][name] = json!({ "slots": {} });
        self
    }

    pub fn intent_with_slot(mut self, name: &str, slot: &str, value: &str) -> Self {
        self.event["request"]["nlu"]["intents"][name] = json!({
            "slots": { slot: { "type": "YANDEX.STRING", "value": value } }
        });
        self
    }

    /// Activity request as the grammar produces it
    pub fn activity(self, value: &str) -> Self {
        self.intent_with_slot("start_activity", "activity", value)
    }

    pub fn location(mut self, lat: f64, lon: f64) -> Self {
        self.event["session"]["location"] = json!({ "lat": lat, "lon": lon, "accuracy": 15.0 });
        self
    }

    pub fn scene(mut self, scene: &str) -> Self {
        self.event["state"]["session"]["scene"] = json!(scene);
        self
    }

    /// Replace the inbound session state
    pub fn state(mut self, state: &SessionState) -> Self {
        self.event["state"]["session"] = serde_json::to_value(state).expect("serializable state");
        self
    }

    pub fn anonymous(mut self) -> Self {
        if let Some(session) = self.event["session"].as_object_mut() {
            session.remove("user");
        }
        self
    }

    pub fn build(self) -> WebhookEvent {
        serde_json::from_value(self.event).expect("valid webhook event")
    }

    pub fn into_json(self) -> Value {
        self.event
    }
}
