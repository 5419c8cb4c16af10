//! Inbound webhook envelope and the per-turn view the scenes work with

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::places::Coordinate;
use crate::utils::errors::{SkillError, Result};
use crate::utils::helpers::normalize_utterance;

/// Kind of inbound event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    #[default]
    SimpleUtterance,
    ButtonPressed,
    GeolocationAllowed,
    GeolocationRejected,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::SimpleUtterance => "SimpleUtterance",
            EventType::ButtonPressed => "ButtonPressed",
            EventType::GeolocationAllowed => "Geolocation.Allowed",
            EventType::GeolocationRejected => "Geolocation.Rejected",
            EventType::Other(name) => name,
        }
    }

    pub fn is_geolocation(&self) -> bool {
        matches!(self, EventType::GeolocationAllowed | EventType::GeolocationRejected)
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SimpleUtterance" => EventType::SimpleUtterance,
            "ButtonPressed" => EventType::ButtonPressed,
            "Geolocation.Allowed" => EventType::GeolocationAllowed,
            "Geolocation.Rejected" => EventType::GeolocationRejected,
            _ => EventType::Other(value),
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted session state: the active scene plus whatever scenes attached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionState {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Raw webhook event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub request: RequestBody,
    pub session: SessionBody,
    #[serde(default)]
    pub state: StateBody,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub original_utterance: String,
    #[serde(rename = "type", default)]
    pub kind: EventType,
    #[serde(default)]
    pub nlu: Nlu,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nlu {
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub intents: HashMap<String, IntentBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntentBody {
    #[serde(default)]
    pub slots: HashMap<String, SlotBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionBody {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub message_id: u64,
    #[serde(default)]
    pub new: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<ApplicationBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBody {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationBody {
    pub application_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationBody {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Inbound `state` block; `session` holds the previous session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateBody {
    #[serde(default)]
    pub session: Option<SessionState>,
}

/// Slot values of one recognized intent
pub type SlotMap = HashMap<String, Value>;

/// Typed view of one turn
#[derive(Debug, Clone)]
pub struct TurnContext {
    event_type: EventType,
    command: String,
    utterance: String,
    intents: HashMap<String, SlotMap>,
    user_id: String,
    session_id: String,
    new_session: bool,
    location: Option<Coordinate>,
    state: SessionState,
}

impl TurnContext {
    /// Normalize a raw webhook event
    pub fn from_event(event: WebhookEvent) -> Result<Self> {
        let WebhookEvent { request, session, state, .. } = event;

        let user_id = session
            .user
            .map(|user| user.user_id)
            .or_else(|| session.application.map(|app| app.application_id))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| SkillError::InvalidInput("Event carries neither user nor application id".to_string()))?;

        let intents = request
            .nlu
            .intents
            .into_iter()
            .map(|(name, intent)| {
                let slots = intent.slots.into_iter().map(|(slot, body)| (slot, body.value)).collect();
                (name, slots)
            })
            .collect();

        let location = session
            .location
            .map(|location| Coordinate::new(location.lat, location.lon));

        Ok(Self {
            event_type: request.kind,
            command: normalize_utterance(&request.command),
            utterance: request.original_utterance,
            intents,
            user_id,
            session_id: session.session_id,
            new_session: session.new,
            location,
            state: state.session.unwrap_or_default(),
        })
    }

    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    pub fn is_geolocation_event(&self) -> bool {
        self.event_type.is_geolocation()
    }

    /// Normalized command text
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Utterance as the user said it
    pub fn utterance(&self) -> &str {
        &self.utterance
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_new_session(&self) -> bool {
        self.new_session
    }

    /// The user's position, present only once geolocation was granted
    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    /// State persisted by the previous turn
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Scene that produced the previous reply
    pub fn scene_id(&self) -> Option<&str> {
        self.state.scene.as_deref()
    }

    pub fn has_intent(&self, name: &str) -> bool {
        self.intents.contains_key(name)
    }

    pub fn has_any_intent(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_intent(name))
    }

    pub fn slot(&self, intent: &str, slot: &str) -> Option<&Value> {
        self.intents.get(intent).and_then(|slots| slots.get(slot))
    }

    /// String value of a slot; numbers are not converted
    pub fn slot_str(&self, intent: &str, slot: &str) -> Option<&str> {
        self.slot(intent, slot).and_then(Value::as_str)
    }
}
