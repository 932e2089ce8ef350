//! Apex Home Core - actions and webhook trigger for the Apex Home service.
//!
//! This crate provides the pieces a workflow host needs to talk to an
//! Apex Home instance:
//! - Resource dispatch: `(resource, operation)` pairs resolved to REST calls
//! - Request execution: per-item HTTP calls folded into ordered results
//! - Webhook routing: inbound events demultiplexed onto named channels
//! - Node descriptions for the action node and the trigger node

pub mod credentials;
pub mod description;
pub mod dispatch;
pub mod error;
pub mod executor;
mod http_client;
pub mod models;
pub mod trigger;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use error::{ApexHomeError, ItemError, Result};

pub use credentials::{
    ApexHomeCredentials, CredentialProvider, EnvCredentials, StaticCredentials,
};

pub use dispatch::{resolve, supported_operations};

pub use executor::{ActionExecutor, ApexHomeClient, ExecutionOptions, RawResponse, ResponseBody};

pub use models::{
    ActionRequest, BinaryData, ExecutionResult, HttpMethod, Operation, Parameters, ResolvedCall,
    Resource, ResponseKind, WebhookEvent,
};

pub use trigger::{
    ChannelOutputs, EventCatalog, EventDefinition, EventRouter, ResponseOptions, RouteDecision,
    TriggerOutcome, WebhookReply,
};

pub use description::{NodeDescription, action_description, trigger_description};
