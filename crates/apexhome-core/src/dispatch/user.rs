use serde::Serialize;
use serde_json::Value;

use super::{Route, crud_routes};
use crate::error::Result;
use crate::models::{Operation, Parameters};

/// Body for user create and update. Admin rights are not part of the public API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub site_name: String,
}

impl UserBody {
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            username: params.required_str("username")?,
            password: params.required_str("password")?,
            full_name: params.optional_str("fullName")?,
            site_name: params.optional_str("siteName")?,
        })
    }
}

fn user_body(params: &Parameters) -> Result<Value> {
    Ok(serde_json::to_value(UserBody::from_parameters(params)?)?)
}

pub(super) fn routes() -> Vec<(Operation, Route)> {
    crud_routes(
        "/api/v1/public/user",
        "/api/v1/public/user/{userId}",
        "/api/v1/public/users",
        "userId",
        user_body,
    )
}
