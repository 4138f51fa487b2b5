//! The normalized `{success, result | error}` envelope every operation returns.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of one call to the image server.
///
/// Holds the `{"success": ..., "result" | "error": ...}` object exactly as the
/// server sent it, including any fields beyond those three; the accessors
/// below are typed views over it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteropResponse {
    fields: Map<String, Value>,
}

impl InteropResponse {
    pub fn success(result: Value) -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(true));
        fields.insert("result".to_string(), result);
        Self { fields }
    }

    pub fn failure(error: impl Into<RemoteError>) -> Self {
        let mut fields = Map::new();
        fields.insert("success".to_string(), Value::Bool(false));
        fields.insert("error".to_string(), error.into().into_value());
        Self { fields }
    }

    /// Interpret a parsed 2xx body.
    ///
    /// An object with a boolean `success` field is the server's own envelope
    /// and is kept verbatim; anything else becomes the `result`.
    pub fn from_remote_body(body: Value) -> Self {
        match body {
            Value::Object(fields) if fields.get("success").is_some_and(Value::is_boolean) => {
                Self { fields }
            }
            other => Self::success(other),
        }
    }

    /// Interpret the JSON object of a non-2xx body carrying an `error` field.
    ///
    /// Every field is kept; `success` is forced to `false`.
    pub(crate) fn from_error_body(mut fields: Map<String, Value>) -> Self {
        fields.insert("success".to_string(), Value::Bool(false));
        Self { fields }
    }

    pub fn is_success(&self) -> bool {
        self.fields.get("success").and_then(Value::as_bool) == Some(true)
    }

    /// The `result` field of a successful response, when present.
    pub fn result(&self) -> Option<&Value> {
        if self.is_success() {
            self.fields.get("result")
        } else {
            None
        }
    }

    /// The `error` field of a failed response, when present.
    pub fn error(&self) -> Option<RemoteError> {
        if self.is_success() {
            None
        } else {
            self.fields.get("error").cloned().map(RemoteError::from)
        }
    }

    /// Every top-level field as received.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Split into result or error. An absent field reads as `null`.
    pub fn into_result(mut self) -> Result<Value, RemoteError> {
        if self.is_success() {
            Ok(self.fields.remove("result").unwrap_or(Value::Null))
        } else {
            Err(RemoteError::from(
                self.fields.remove("error").unwrap_or(Value::Null),
            ))
        }
    }

    /// The response as a plain JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Error payload sent by the image server.
///
/// Older servers send a plain string; newer ones send an object with
/// `description`, `stack_trace` and `receiver`. Either way the payload is kept
/// exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteError {
    Message(String),
    Structured(StructuredError),
    Other(Value),
}

impl RemoteError {
    /// Human readable summary: the message, or the structured description.
    pub fn summary(&self) -> String {
        match self {
            Self::Message(message) => message.clone(),
            Self::Structured(error) => error
                .description()
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(error.fields().clone()).to_string()),
            Self::Other(value) => value.to_string(),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Self::Message(message) => Value::String(message),
            Self::Structured(error) => Value::Object(error.fields),
            Self::Other(value) => value,
        }
    }
}

impl From<Value> for RemoteError {
    fn from(value: Value) -> Self {
        match value {
            Value::String(message) => Self::Message(message),
            Value::Object(fields) => Self::Structured(StructuredError { fields }),
            other => Self::Other(other),
        }
    }
}

impl From<String> for RemoteError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for RemoteError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// Structured error object, stored verbatim with typed accessors on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredError {
    fields: Map<String, Value>,
}

impl StructuredError {
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.get("description").and_then(Value::as_str)
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.fields.get("stack_trace").and_then(Value::as_str)
    }

    /// Typed view of `receiver`; `None` when absent or not object shaped.
    pub fn receiver(&self) -> Option<ErrorReceiver> {
        self.fields
            .get("receiver")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// The object that raised the error inside the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReceiver {
    #[serde(default)]
    pub class: Option<String>,
    #[serde(rename = "self", default)]
    pub self_description: Option<String>,
    #[serde(default)]
    pub variables: Option<Value>,
}
