use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Operation, Parameters, Resource};
use crate::error::{ApexHomeError, Result};

/// One logical action built from one workflow input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub resource: Resource,
    pub operation: Operation,
    #[serde(default)]
    pub parameters: Parameters,
}

impl ActionRequest {
    pub fn new(resource: Resource, operation: Operation, parameters: Parameters) -> Self {
        Self {
            resource,
            operation,
            parameters,
        }
    }

    /// Build a request from a JSON item.
    ///
    /// The item selects the action with its `resource` and `operation` keys.
    /// Parameters come from a nested `parameters` object when present,
    /// otherwise from the remaining top-level keys.
    pub fn from_item(item: &Value) -> Result<Self> {
        let Some(object) = item.as_object() else {
            return Err(ApexHomeError::invalid_parameter(
                "item",
                "expected a JSON object",
            ));
        };

        let resource_name = object
            .get("resource")
            .and_then(Value::as_str)
            .ok_or_else(|| ApexHomeError::MissingParameter("resource".to_string()))?;
        let operation_name = object
            .get("operation")
            .and_then(Value::as_str)
            .ok_or_else(|| ApexHomeError::MissingParameter("operation".to_string()))?;

        let (Some(resource), Some(operation)) =
            (Resource::parse(resource_name), Operation::parse(operation_name))
        else {
            return Err(ApexHomeError::unsupported(resource_name, operation_name));
        };

        let parameters = match object.get("parameters").and_then(Value::as_object) {
            Some(nested) => Parameters::from(nested.clone()),
            None => {
                let mut rest = object.clone();
                rest.remove("resource");
                rest.remove("operation");
                Parameters::from(rest)
            }
        };

        Ok(Self::new(resource, operation, parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_flat_item() {
        let item = json!({"resource": "user", "operation": "info", "userId": 5});
        let request = ActionRequest::from_item(&item).unwrap();
        assert_eq!(request.resource, Resource::User);
        assert_eq!(request.operation, Operation::Info);
        assert_eq!(request.parameters.identifier("userId").unwrap(), "5");
        assert!(request.parameters.get("resource").is_none());
    }

    #[test]
    fn test_from_nested_item() {
        let item = json!({
            "resource": "page",
            "operation": "delete",
            "parameters": {"pageId": "9"}
        });
        let request = ActionRequest::from_item(&item).unwrap();
        assert_eq!(request.parameters.identifier("pageId").unwrap(), "9");
    }

    #[test]
    fn test_unknown_resource_is_unsupported() {
        let item = json!({"resource": "garage", "operation": "open"});
        let err = ActionRequest::from_item(&item).unwrap_err();
        assert!(matches!(
            err,
            ApexHomeError::UnsupportedOperation { ref resource, ref operation }
                if resource == "garage" && operation == "open"
        ));
    }

    #[test]
    fn test_missing_operation() {
        let item = json!({"resource": "user"});
        assert!(matches!(
            ActionRequest::from_item(&item),
            Err(ApexHomeError::MissingParameter(name)) if name == "operation"
        ));
    }
}
