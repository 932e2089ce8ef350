use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ApexHomeError, Result};

/// Typed view over the parameter values the host supplies for one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(Map<String, Value>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests and the CLI.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// String parameter that must be present. Numbers and booleans are
    /// accepted in their textual form.
    pub fn required_str(&self, name: &str) -> Result<String> {
        match self.get(name) {
            None => Err(ApexHomeError::MissingParameter(name.to_string())),
            Some(value) => scalar_to_string(name, value),
        }
    }

    /// String parameter that falls back to an empty string when absent.
    pub fn optional_str(&self, name: &str) -> Result<String> {
        match self.get(name) {
            None => Ok(String::new()),
            Some(value) => scalar_to_string(name, value),
        }
    }

    pub fn str_or(&self, name: &str, default: &str) -> Result<String> {
        let value = self.optional_str(name)?;
        if value.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(value)
        }
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => match s.trim() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(ApexHomeError::invalid_parameter(
                    name,
                    format!("expected a boolean, got '{}'", other),
                )),
            },
            Some(other) => Err(ApexHomeError::invalid_parameter(
                name,
                format!("expected a boolean, got {}", other),
            )),
        }
    }

    /// Path identifier such as `userId`. Accepts an integer or a non-empty string.
    pub fn identifier(&self, name: &str) -> Result<String> {
        match self.get(name) {
            None => Err(ApexHomeError::MissingParameter(name.to_string())),
            Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(other) => Err(ApexHomeError::invalid_parameter(
                name,
                format!("expected an identifier, got {}", other),
            )),
        }
    }
}

fn scalar_to_string(name: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ApexHomeError::invalid_parameter(
            name,
            format!("expected a string, got {}", other),
        )),
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
