//! Normalized `(status, body)` result of a PetFriends call.

use crate::error::CliError;
use crate::types::{AuthKey, Pet, PetList};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Response body, parsed as JSON when possible.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Parse `raw` as JSON, keeping it as text if it is not valid JSON.
    pub fn from_text(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(raw),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Body::Json(value) => value.is_null(),
            Body::Text(text) => text.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Body,
}

impl ApiResponse {
    pub fn new(status: u16, body: Body) -> Self {
        Self { status, body }
    }

    /// The service signals success with 200 only.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn json(&self) -> Option<&Value> {
        self.body.as_json()
    }

    /// Top-level field of a JSON object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json().and_then(|value| value.get(name))
    }

    /// Top-level string field of a JSON object body.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Deserialize the body into `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, CliError> {
        match &self.body {
            Body::Json(value) => serde_json::from_value(value.clone()).map_err(|e| {
                CliError::unexpected_body(format!(
                    "status {}: {} in {}",
                    self.status,
                    e,
                    truncate(&value.to_string(), 120)
                ))
            }),
            Body::Text(text) => Err(CliError::unexpected_body(format!(
                "status {}: expected JSON, got {:?}",
                self.status,
                truncate(text, 120)
            ))),
        }
    }

    /// Key from a `GET /api/key` body.
    pub fn auth_key(&self) -> Result<AuthKey, CliError> {
        self.parse()
    }

    /// Pet from a create, update or photo upload body.
    pub fn pet(&self) -> Result<Pet, CliError> {
        self.parse()
    }

    /// Pets from a `GET /api/pets` body.
    pub fn pets(&self) -> Result<PetList, CliError> {
        self.parse()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
