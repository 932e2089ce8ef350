//! Static descriptions of the action and trigger nodes exposed to the host.

use serde::Serialize;
use serde_json::{Value, json};

use crate::credentials::CREDENTIAL_NAME;
use crate::dispatch::supported_operations;
use crate::models::Resource;
use crate::trigger::EventCatalog;

pub const NODE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRef {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookDescription {
    pub name: String,
    pub http_method: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub version: u32,
    pub description: String,
    pub inputs: usize,
    pub output_names: Vec<String>,
    pub credentials: Vec<CredentialRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub webhooks: Vec<WebhookDescription>,
    pub properties: Vec<Value>,
}

impl NodeDescription {
    pub fn outputs(&self) -> usize {
        self.output_names.len()
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.iter().find(|p| p["name"] == name)
    }
}

/// Trigger node with one output per catalog event.
pub fn trigger_description(catalog: &EventCatalog) -> NodeDescription {
    let options: Vec<Value> = catalog
        .events()
        .iter()
        .map(|e| json!({"name": e.name, "value": e.id}))
        .collect();

    NodeDescription {
        display_name: "Apex Home Trigger".to_string(),
        name: "apexHomeTrigger".to_string(),
        version: NODE_VERSION,
        description: "Triggers when Apex Home events occur".to_string(),
        inputs: 0,
        output_names: catalog.channel_names(),
        credentials: vec![CredentialRef {
            name: CREDENTIAL_NAME.to_string(),
            required: false,
        }],
        webhooks: vec![WebhookDescription {
            name: "default".to_string(),
            http_method: "POST".to_string(),
            path: "webhook".to_string(),
        }],
        properties: vec![
            json!({
                "displayName": "Events",
                "name": "events",
                "type": "multiOptions",
                "options": options,
                "default": catalog.event_ids(),
            }),
            json!({
                "displayName": "Options",
                "name": "options",
                "type": "collection",
                "default": {},
                "options": [
                    {"name": "responseStatusCode", "type": "number", "default": 200},
                    {"name": "responseBody", "type": "string", "default": ""},
                    {"name": "responseHeaders", "type": "fixedCollection", "default": {}},
                    {"name": "testEvent", "type": "string", "default": crate::trigger::DEFAULT_TEST_EVENT},
                ],
            }),
        ],
    }
}

/// Action node listing each resource and the operations the dispatcher routes for it.
pub fn action_description() -> NodeDescription {
    let resources: Vec<Value> = Resource::ALL
        .iter()
        .map(|r| json!({"name": r.display_name(), "value": r.as_str()}))
        .collect();

    let mut properties = vec![json!({
        "displayName": "Resource",
        "name": "resource",
        "type": "options",
        "options": resources,
        "default": Resource::ALL[0].as_str(),
    })];

    for resource in Resource::ALL {
        let operations = supported_operations(resource);
        let options: Vec<Value> = operations
            .iter()
            .map(|op| json!({"name": op.display_name(), "value": op.as_str()}))
            .collect();
        properties.push(json!({
            "displayName": "Operation",
            "name": "operation",
            "type": "options",
            "displayOptions": {"show": {"resource": [resource.as_str()]}},
            "options": options,
            "default": operations.first().map(|op| op.as_str()),
        }));
    }

    NodeDescription {
        display_name: "Apex Home Actions".to_string(),
        name: "apexhome".to_string(),
        version: NODE_VERSION,
        description: "Interact with Apex Home API".to_string(),
        inputs: 1,
        output_names: vec!["Main".to_string()],
        credentials: vec![CredentialRef {
            name: CREDENTIAL_NAME.to_string(),
            required: true,
        }],
        webhooks: Vec::new(),
        properties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::EventDefinition;

    #[test]
    fn test_trigger_outputs_follow_catalog() {
        let description = trigger_description(&EventCatalog::default());
        assert_eq!(description.outputs(), 3);
        assert_eq!(
            description.output_names,
            vec!["User Created", "User Updated", "User Removed"]
        );
        assert_eq!(description.webhooks[0].http_method, "POST");
        assert_eq!(description.webhooks[0].path, "webhook");

        let events = description.property("events").unwrap();
        assert_eq!(events["type"], "multiOptions");
        assert_eq!(
            events["default"],
            json!(["user.created", "user.updated", "user.removed"])
        );
    }

    #[test]
    fn test_trigger_with_custom_catalog() {
        let catalog = EventCatalog::new(vec![EventDefinition {
            id: "page.created".to_string(),
            name: "Page Created".to_string(),
        }])
        .unwrap();
        let description = trigger_description(&catalog);
        assert_eq!(description.output_names, vec!["Page Created"]);
        assert_eq!(
            description.property("events").unwrap()["options"][0]["value"],
            "page.created"
        );
    }

    #[test]
    fn test_action_lists_resources_and_operations() {
        let description = action_description();
        assert_eq!(description.credentials[0].name, "apexHomeApi");
        assert!(description.credentials[0].required);
        assert!(description.webhooks.is_empty());

        let resources = description.property("resource").unwrap();
        assert_eq!(
            resources["options"].as_array().unwrap().len(),
            Resource::ALL.len()
        );

        let operation_blocks = description
            .properties
            .iter()
            .filter(|p| p["name"] == "operation")
            .count();
        assert_eq!(operation_blocks, Resource::ALL.len());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(action_description()).unwrap();
        assert_eq!(value["displayName"], "Apex Home Actions");
        assert!(value.get("webhooks").is_none());
        assert!(value.get("outputNames").is_some());
    }
}
