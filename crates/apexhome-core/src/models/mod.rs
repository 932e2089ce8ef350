//! Data model shared by the dispatcher, the executor and the trigger.

mod call;
mod parameters;
mod request;
mod resource;
mod result;
mod webhook;

pub use call::{HttpMethod, ResolvedCall, ResponseKind};
pub use parameters::Parameters;
pub use request::ActionRequest;
pub use resource::{Operation, Resource};
pub use result::{BACKUP_FILE_NAME, BACKUP_MIME_TYPE, BinaryData, ExecutionResult};
pub use webhook::WebhookEvent;
