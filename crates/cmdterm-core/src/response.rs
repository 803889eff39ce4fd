//! Decoding of the `/command` response body.

use serde_json::Value;

use crate::error::{ConsoleError, Result};

/// Parsed command response.
///
/// `output` is `None` when the body carried no `output` key or an explicit
/// `null`; the console substitutes its configured placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResponse {
    pub output: Option<String>,
}

impl CommandResponse {
    /// Response with a plain string output.
    #[must_use]
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
        }
    }

    /// Decode a JSON body. The body must be an object; scalar and composite
    /// `output` values are rendered as their JSON text.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let Value::Object(mut fields) = value else {
            return Err(ConsoleError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };
        let output = match fields.remove("output") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => Some(other.to_string()),
        };
        Ok(Self { output })
    }

    /// Decode an HTTP response: non-2xx statuses are errors regardless of
    /// body.
    pub fn from_http(status: u16, body: &str) -> Result<Self> {
        if !(200..300).contains(&status) {
            return Err(ConsoleError::Status { status });
        }
        Self::from_json(body)
    }

    /// The reply text, or `placeholder` when the server sent none.
    #[must_use]
    pub fn output_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.output.as_deref().unwrap_or(placeholder)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
