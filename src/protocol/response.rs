//! Outbound webhook envelope and the response builder

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use super::request::SessionState;

/// Protocol version every reply carries
pub const PROTOCOL_VERSION: &str = "1.0";

/// Reply button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub hide: bool,
}

impl Button {
    /// A button shown under the reply
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            payload: None,
            url: None,
            hide: false,
        }
    }

    /// A suggestion button that disappears after the next turn
    pub fn hidden(title: impl Into<String>) -> Self {
        Self {
            hide: true,
            ..Self::new(title)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Card {
    BigImage {
        image_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    ItemsList {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        header: Option<CardHeader>,
        items: Vec<CardItem>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardHeader {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Empty directive body, serialized as `{}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyDirective {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Directives {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_geolocation: Option<EmptyDirective>,
}

impl Directives {
    /// Ask the platform for the user's geolocation
    pub fn request_geolocation() -> Self {
        Self {
            request_geolocation: Some(EmptyDirective::default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub text: String,
    pub tts: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Button>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directives: Option<Directives>,
    #[serde(default)]
    pub end_session: bool,
}

/// Reply envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub response: ResponseBody,
    pub version: String,
    pub session_state: SessionState,
}

impl WebhookResponse {
    /// Scene id persisted by this reply
    pub fn scene(&self) -> Option<&str> {
        self.session_state.scene.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.response.text
    }

    pub fn button_titles(&self) -> Vec<&str> {
        self.response
            .buttons
            .iter()
            .flatten()
            .map(|button| button.title.as_str())
            .collect()
    }

    pub fn requests_geolocation(&self) -> bool {
        self.response
            .directives
            .as_ref()
            .is_some_and(|directives| directives.request_geolocation.is_some())
    }
}

/// Assembles one reply.
///
/// The persisted state starts from the state the previous turn carried, then
/// takes the fields set with [`ResponseBuilder::state`], and finally the id of
/// the producing scene, which nothing can override.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    scene: String,
    text: String,
    tts: Option<String>,
    card: Option<Card>,
    buttons: Vec<Button>,
    directives: Option<Directives>,
    prior: Map<String, Value>,
    delta: Map<String, Value>,
}

impl ResponseBuilder {
    pub fn new(scene: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            text: text.into(),
            tts: None,
            card: None,
            buttons: Vec::new(),
            directives: None,
            prior: Map::new(),
            delta: Map::new(),
        }
    }

    /// Carry over the fields of the previous session state
    pub fn carry(mut self, prior: &SessionState) -> Self {
        self.prior = prior.extra.clone();
        self
    }

    /// Speech text; the display text is spoken when unset
    pub fn tts(mut self, tts: impl Into<String>) -> Self {
        self.tts = Some(tts.into());
        self
    }

    pub fn card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    pub fn button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn buttons(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.buttons.extend(buttons);
        self
    }

    pub fn directives(mut self, directives: Directives) -> Self {
        self.directives = Some(directives);
        self
    }

    /// Set a session state field for the next turn
    pub fn state(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.delta.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> WebhookResponse {
        let mut extra = self.prior;
        extra.extend(self.delta);
        extra.remove("scene");

        let tts = self.tts.unwrap_or_else(|| self.text.clone());

        WebhookResponse {
            response: ResponseBody {
                text: self.text,
                tts,
                card: self.card,
                buttons: (!self.buttons.is_empty()).then_some(self.buttons),
                directives: self.directives,
                end_session: false,
            },
            version: PROTOCOL_VERSION.to_string(),
            session_state: SessionState {
                scene: Some(self.scene),
                extra,
            },
        }
    }
}
