use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const BACKUP_MIME_TYPE: &str = "application/apex";
pub const BACKUP_FILE_NAME: &str = "response.apex";

/// Binary attachment produced by the backup operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    /// Base64-encoded content
    pub data: String,
    pub mime_type: String,
    pub file_name: String,
}

impl BinaryData {
    pub fn apex_backup(bytes: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            mime_type: BACKUP_MIME_TYPE.to_string(),
            file_name: BACKUP_FILE_NAME.to_string(),
        }
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Outcome of one input item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(default)]
    pub response: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<BinaryData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Index of the input item this result belongs to
    pub paired_item: usize,
}

impl ExecutionResult {
    pub fn success(response: Value, paired_item: usize) -> Self {
        Self {
            success: true,
            response,
            binary: None,
            request: None,
            error: None,
            paired_item,
        }
    }

    pub fn failure(message: impl Into<String>, paired_item: usize) -> Self {
        Self {
            success: false,
            response: Value::Null,
            binary: None,
            request: None,
            error: Some(message.into()),
            paired_item,
        }
    }

    pub fn with_binary(mut self, binary: BinaryData) -> Self {
        self.binary = Some(binary);
        self
    }

    pub fn with_request(mut self, request: Option<Value>) -> Self {
        self.request = request;
        self
    }
}
