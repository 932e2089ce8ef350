use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{EventCatalog, ResponseOptions, WebhookReply};
use crate::error::Result;
use crate::models::WebhookEvent;

/// Event name that is always accepted so the host UI can test connectivity.
pub const DEFAULT_TEST_EVENT: &str = "test_event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub channel: Option<usize>,
    pub accepted: bool,
}

impl RouteDecision {
    fn rejected() -> Self {
        Self {
            channel: None,
            accepted: false,
        }
    }

    fn to(channel: usize) -> Self {
        Self {
            channel: Some(channel),
            accepted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelOutput {
    pub name: String,
    pub payload: Option<Value>,
}

/// Sparse union over the trigger's named channels.
///
/// At most one channel carries a payload per invocation; all others are empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChannelOutputs {
    channels: Vec<ChannelOutput>,
}

impl ChannelOutputs {
    fn empty(catalog: &EventCatalog) -> Self {
        let channels = catalog
            .channel_names()
            .into_iter()
            .map(|name| ChannelOutput {
                name,
                payload: None,
            })
            .collect();
        Self { channels }
    }

    /// Payload of the channel with this name, if it fired.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.channels
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.payload.as_ref())
    }

    pub fn payload_at(&self, index: usize) -> Option<&Value> {
        self.channels.get(index).and_then(|c| c.payload.as_ref())
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Index of the channel carrying a payload, if any fired.
    pub fn fired(&self) -> Option<usize> {
        self.channels.iter().position(|c| c.payload.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelOutput> {
        self.channels.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerOutcome {
    pub decision: RouteDecision,
    pub outputs: ChannelOutputs,
    pub reply: WebhookReply,
}

/// Routes webhook events to channels of one trigger configuration.
///
/// Immutable once built; share it behind an `Arc` between concurrent calls.
#[derive(Debug, Clone)]
pub struct EventRouter {
    catalog: Arc<EventCatalog>,
    subscribed: Vec<String>,
    test_event: String,
    response: ResponseOptions,
}

impl EventRouter {
    /// Router subscribed to every event in the catalog.
    pub fn new(catalog: Arc<EventCatalog>) -> Self {
        let subscribed = catalog.event_ids();
        Self {
            catalog,
            subscribed,
            test_event: DEFAULT_TEST_EVENT.to_string(),
            response: ResponseOptions::default(),
        }
    }

    /// Restrict the router to a subset of the catalog. Names the catalog
    /// does not know cannot be routed and are dropped.
    pub fn with_subscriptions(mut self, events: Vec<String>) -> Self {
        let (known, unknown): (Vec<_>, Vec<_>) = events
            .into_iter()
            .partition(|e| self.catalog.index_of(e).is_some());
        if !unknown.is_empty() {
            warn!(events = ?unknown, "Ignoring subscriptions to unknown events");
        }
        self.subscribed = known;
        self
    }

    pub fn with_test_event(mut self, name: impl Into<String>) -> Self {
        self.test_event = name.into();
        self
    }

    pub fn with_response(mut self, options: ResponseOptions) -> Result<Self> {
        options.validate()?;
        self.response = options;
        Ok(self)
    }

    pub fn catalog(&self) -> &Arc<EventCatalog> {
        &self.catalog
    }

    pub fn subscribed(&self) -> &[String] {
        &self.subscribed
    }

    pub fn route(&self, event: &WebhookEvent) -> RouteDecision {
        let Some(name) = event.event_name.as_deref() else {
            return RouteDecision::rejected();
        };

        if name == self.test_event {
            return RouteDecision::to(0);
        }

        if !self.subscribed.iter().any(|s| s == name) {
            return RouteDecision::rejected();
        }

        match self.catalog.index_of(name) {
            Some(index) => RouteDecision::to(index),
            None => RouteDecision::rejected(),
        }
    }

    /// Route an event and build the channel outputs and the caller reply.
    ///
    /// `headers` and `query` are copied into the payload as given; repeated
    /// query keys are expected as arrays.
    pub fn dispatch(
        &self,
        event: WebhookEvent,
        headers: BTreeMap<String, Value>,
        query: BTreeMap<String, Value>,
    ) -> TriggerOutcome {
        let decision = self.route(&event);
        let mut outputs = ChannelOutputs::empty(&self.catalog);

        let Some(channel) = decision.channel else {
            debug!(event_name = ?event.event_name, "Event not subscribed");
            return TriggerOutcome {
                decision,
                outputs,
                reply: WebhookReply::not_subscribed(),
            };
        };

        let payload = json!({
            "eventName": event.event_name,
            "eventData": event.event_data,
            "eventOccuredOn": event.occurred_on_raw(),
            "headers": headers,
            "query": query,
            "body": event.raw_body,
        });

        if let Some(slot) = outputs.channels.get_mut(channel) {
            info!(
                event_name = ?event.event_name,
                channel,
                channel_name = %slot.name,
                "Routing webhook event"
            );
            slot.payload = Some(payload);
        }

        TriggerOutcome {
            decision,
            outputs,
            reply: self.response.reply(),
        }
    }
}
