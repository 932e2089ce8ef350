use serde::Serialize;
use serde_json::Value;

use super::{Route, crud_routes};
use crate::error::Result;
use crate::models::{Operation, Parameters};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDeviceBody {
    pub device_mac: String,
    pub device_name: String,
    pub device_ip: String,
}

impl NetworkDeviceBody {
    pub fn from_parameters(params: &Parameters) -> Result<Self> {
        Ok(Self {
            device_mac: params.required_str("deviceMac")?,
            device_name: params.required_str("deviceName")?,
            device_ip: params.optional_str("deviceIp")?,
        })
    }
}

fn device_body(params: &Parameters) -> Result<Value> {
    Ok(serde_json::to_value(NetworkDeviceBody::from_parameters(
        params,
    )?)?)
}

// The list endpoint shares the collection path; there is no plural form.
pub(super) fn routes() -> Vec<(Operation, Route)> {
    crud_routes(
        "/api/v1/public/network-devices",
        "/api/v1/public/network-devices/{deviceId}",
        "/api/v1/public/network-devices",
        "deviceId",
        device_body,
    )
}
