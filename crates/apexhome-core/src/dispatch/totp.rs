use serde::Serialize;
use serde_json::Value;

use super::{Route, crud_routes};
use crate::error::Result;
use crate::models::{Operation, Parameters};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpBody {
    pub service_name: String,
    pub account_name: String,
    pub secret_key: String,
}

impl TotpBody {
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            service_name: params.required_str("serviceName")?,
            account_name: params.required_str("accountName")?,
            secret_key: params.required_str("secretKey")?,
        })
    }
}

fn totp_body(params: &Parameters) -> Result<Value> {
    Ok(serde_json::to_value(TotpBody::from_parameters(params)?)?)
}

pub(super) fn routes() -> Vec<(Operation, Route)> {
    crud_routes(
        "/api/v1/public/totp",
        "/api/v1/public/totp/{totpId}",
        "/api/v1/public/totps",
        "totpId",
        totp_body,
    )
}
