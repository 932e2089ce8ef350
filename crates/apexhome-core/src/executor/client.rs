//! HTTP client for the Apex Home public API.

use reqwest::{Client, StatusCode, header};
use serde_json::Value;
use tracing::{debug, warn};

use super::RawResponse;
use crate::credentials::ApexHomeCredentials;
use crate::error::{ApexHomeError, Result};
use crate::http_client::build_http_client;
use crate::models::{ResolvedCall, ResponseKind};

const API_KEY_HEADER: &str = "X-API-Key";
const CREDENTIAL_TEST_PATH: &str = "/api/v1/public/test";

/// Decoded response of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Binary(RawResponse),
}

/// Sends resolved calls to one Apex Home instance.
#[derive(Debug, Clone)]
pub struct ApexHomeClient {
    http: Client,
    credentials: ApexHomeCredentials,
}

impl ApexHomeClient {
    pub fn new(credentials: ApexHomeCredentials) -> Self {
        Self::with_http_client(credentials, build_http_client())
    }

    /// Use a caller-provided client, e.g. one the host configured with timeouts.
    pub fn with_http_client(credentials: ApexHomeCredentials, http: Client) -> Self {
        Self { http, credentials }
    }

    pub fn credentials(&self) -> &ApexHomeCredentials {
        &self.credentials
    }

    pub async fn send(&self, call: &ResolvedCall) -> Result<ResponseBody> {
        let url = call.url(&self.credentials.url);
        debug!(method = %call.method, url = %url, "Sending Apex Home request");

        let mut request = self
            .http
            .request(call.method.into(), &url)
            .header(API_KEY_HEADER, &self.credentials.api_key);

        if let Some(body) = &call.body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), url = %url, "Apex Home request failed");
            return Err(ApexHomeError::transport(
                Some(status.as_u16()),
                error_message(status, &text),
            ));
        }

        match call.response {
            ResponseKind::Json => {
                let text = response.text().await?;
                Ok(ResponseBody::Json(decode_json(&text)))
            }
            ResponseKind::Binary => {
                let bytes = response.bytes().await?;
                Ok(ResponseBody::Binary(RawResponse::Bytes(bytes.to_vec())))
            }
        }
    }

    /// Check the credentials against the instance's test endpoint.
    pub async fn test_credentials(&self) -> Result<()> {
        let base = self
            .credentials
            .url
            .strip_suffix('/')
            .unwrap_or(&self.credentials.url);
        let url = format!("{}{}", base, CREDENTIAL_TEST_PATH);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(url = %url, "Authentication successful");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        Err(ApexHomeError::InvalidCredentials(error_message(status, &text)))
    }
}

/// Empty bodies decode to `null`, non-JSON text to a JSON string.
fn decode_json(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}
