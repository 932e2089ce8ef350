use serde::Serialize;
use serde_json::Value;

use super::{Route, parse_tags};
use crate::error::Result;
use crate::models::{HttpMethod, Operation, Parameters};

const DEFAULT_NOTIFICATION_TYPE: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub action_name: String,
    pub action_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBody {
    pub app_name: String,
    pub app_icon: String,
    pub title: String,
    pub text: String,
    pub html: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_button: Option<ActionButton>,
}

impl NotificationBody {
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        let button_text = params.optional_str("buttonText")?;
        let button_link = params.optional_str("buttonLink")?;

        // The button is only sent when both halves are filled in.
        let action_button = if !button_text.is_empty() && !button_link.is_empty() {
            Some(ActionButton {
                action_name: button_text,
                action_url: button_link,
            })
        } else {
            None
        };

        Ok(Self {
            app_name: params.required_str("appName")?,
            app_icon: params.optional_str("appIcon")?,
            title: params.required_str("title")?,
            text: params.optional_str("text")?,
            html: params.optional_str("html")?,
            kind: params.str_or("type", DEFAULT_NOTIFICATION_TYPE)?,
            tags: parse_tags(&params.optional_str("tags")?),
            action_button,
        })
    }
}

fn send_body(params: &Parameters) -> Result<Value> {
    Ok(serde_json::to_value(NotificationBody::from_parameters(params)?)?)
}

pub(super) fn routes() -> Vec<(Operation, Route)> {
    vec![(
        Operation::Send,
        Route::new(HttpMethod::Post, "/api/v1/public/notification/push").with_body(send_body),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Parameters {
        Parameters::new()
            .with("appName", "Home")
            .with("title", "Door open")
            .with("tags", "security, door")
    }

    #[test]
    fn test_body_without_button() {
        let body = send_body(&base().with("buttonText", "Open")).unwrap();
        assert!(body.get("actionButton").is_none());
        assert_eq!(body["tags"], json!(["security", "door"]));
        assert_eq!(body["type"], "info");
        assert_eq!(body["appIcon"], "");
    }

    #[test]
    fn test_body_with_button() {
        let body = send_body(
            &base()
                .with("buttonText", "Open camera")
                .with("buttonLink", "https://home.example.com/cam"),
        )
        .unwrap();
        assert_eq!(
            body["actionButton"],
            json!({
                "actionName": "Open camera",
                "actionUrl": "https://home.example.com/cam"
            })
        );
    }

    #[test]
    fn test_link_without_text_omits_button() {
        let body = send_body(&base().with("buttonLink", "https://x.example")).unwrap();
        assert!(body.get("actionButton").is_none());
    }

    #[test]
    fn test_title_required() {
        let params = Parameters::new().with("appName", "Home");
        assert!(NotificationBody::from_parameters(&params).is_err());
    }
}
