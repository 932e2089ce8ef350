pub mod describe;
pub mod resolve;
pub mod run;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Read;

/// Read action items from a file or stdin. A single object counts as one item.
pub fn read_items(input: &str) -> Result<Vec<Value>> {
    let content = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read items from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
    };

    parse_items(&content)
}

fn parse_items(content: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(content).context("Input is not valid JSON")?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        _ => bail!("Input must be a JSON object or an array of objects"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        assert_eq!(parse_items(r#"[{"a": 1}, {"b": 2}]"#).unwrap().len(), 2);
        assert_eq!(parse_items(r#"{"a": 1}"#).unwrap().len(), 1);
        assert!(parse_items("42").is_err());
        assert!(parse_items("not json").is_err());
    }
}
