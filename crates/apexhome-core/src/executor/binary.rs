use serde_json::Value;

use crate::models::BinaryData;

/// Response payload as the transport handed it over.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Bytes(Vec<u8>),
    Text(String),
    Json(Value),
}

impl RawResponse {
    /// Coerce any representation into raw bytes.
    ///
    /// Text is taken as latin-1, so every char maps to its low byte. JSON
    /// values are re-serialized.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RawResponse::Bytes(bytes) => bytes,
            RawResponse::Text(text) => text.chars().map(|c| c as u32 as u8).collect(),
            RawResponse::Json(Value::String(text)) => RawResponse::Text(text).into_bytes(),
            RawResponse::Json(value) => value.to_string().into_bytes(),
        }
    }

    /// Encode as an Apex backup. Also returns the raw byte count.
    pub fn into_backup(self) -> (BinaryData, usize) {
        let bytes = self.into_bytes();
        (BinaryData::apex_backup(&bytes), bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    #[test]
    fn test_bytes_round_trip_to_base64() {
        let bytes = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0xff, 0x80];
        let (binary, size) = RawResponse::Bytes(bytes.clone()).into_backup();
        assert_eq!(size, bytes.len());
        assert_eq!(binary.data, STANDARD.encode(&bytes));
        assert_eq!(binary.mime_type, "application/apex");
        assert_eq!(binary.file_name, "response.apex");
    }

    #[test]
    fn test_text_is_latin1() {
        let text: String = [0x41u8, 0xe9, 0xff].iter().map(|b| *b as char).collect();
        assert_eq!(RawResponse::Text(text).into_bytes(), vec![0x41, 0xe9, 0xff]);
    }

    #[test]
    fn test_json_is_reserialized() {
        assert_eq!(
            RawResponse::Json(json!({"a": 1})).into_bytes(),
            br#"{"a":1}"#.to_vec()
        );
        assert_eq!(RawResponse::Json(json!("AB")).into_bytes(), b"AB".to_vec());
    }
}
