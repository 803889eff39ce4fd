//! Command text normalization and the outbound request shape.

use core::fmt;

/// A submitted command: trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(String);

impl Command {
    /// Normalize raw input. Returns `None` when nothing is left after
    /// trimming surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One outbound command request: a single multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    /// Endpoint path the request is posted to.
    pub endpoint: String,
    /// Form field name.
    pub field: String,
    pub command: Command,
}

impl CommandRequest {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, field: impl Into<String>, command: Command) -> Self {
        Self {
            endpoint: endpoint.into(),
            field: field.into(),
            command,
        }
    }

    /// The form fields to encode, in order.
    #[must_use]
    pub fn form_fields(&self) -> [(&str, &str); 1] {
        [(self.field.as_str(), self.command.as_str())]
    }
}
