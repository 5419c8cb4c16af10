//! Webhook protocol module
//!
//! Wire types of the voice-assistant webhook, the per-turn request adapter
//! and the response builder.

pub mod request;
pub mod response;

pub use request::{EventType, SessionState, TurnContext, WebhookEvent};
pub use response::{
    Button, Card, CardHeader, CardItem, Directives, ResponseBuilder, WebhookResponse, PROTOCOL_VERSION,
};
