//! Webhook trigger.
//!
//! An inbound webhook carries an `eventName`. The [`EventRouter`] decides
//! whether the event is subscribed and, if so, which named channel receives
//! the payload. Unknown events are normal traffic: they get a 200 reply and
//! no channel output.

mod catalog;
mod response;
mod router;

pub use catalog::{EventCatalog, EventDefinition};
pub use response::{DEFAULT_STATUS, ResponseOptions, WebhookReply};
pub use router::{
    ChannelOutput, ChannelOutputs, DEFAULT_TEST_EVENT, EventRouter, RouteDecision, TriggerOutcome,
};
