use serde::Serialize;
use serde_json::Value;

use super::{Route, crud_routes};
use crate::error::Result;
use crate::models::{HttpMethod, Operation, Parameters};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBody {
    pub page_title: String,
    pub page_content: String,
    pub is_published: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePublishBody {
    pub is_published: bool,
}

impl PageBody {
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            page_title: params.required_str("pageTitle")?,
            page_content: params.optional_str("pageContent")?,
            is_published: params.bool_or("publish", false)?,
        })
    }
}

fn page_body(params: &Parameters) -> Result<Value> {
    Ok(serde_json::to_value(PageBody::from_parameters(params)?)?)
}

fn publish_body(params: &Parameters) -> Result<Value> {
    let body = PagePublishBody {
        is_published: params.bool_or("publish", true)?,
    };
    Ok(serde_json::to_value(body)?)
}

pub(super) fn routes() -> Vec<(Operation, Route)> {
    let mut routes = crud_routes(
        "/api/v1/public/page",
        "/api/v1/public/page/{pageId}",
        "/api/v1/public/pages",
        "pageId",
        page_body,
    );
    routes.push((
        Operation::Publish,
        Route::new(HttpMethod::Patch, "/api/v1/public/page/{pageId}/publish")
            .with_id("pageId")
            .with_body(publish_body),
    ));
    routes
}
