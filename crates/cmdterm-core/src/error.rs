//! Console error types.

use thiserror::Error;

/// Everything that can go wrong while mounting the console or running an
/// exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A required DOM element was not found at mount time.
    #[error("missing {role} element `#{id}`")]
    MissingElement {
        /// Which console handle (`form`, `input`, `output`).
        role: &'static str,
        /// The element id that was looked up.
        id: String,
    },

    /// A DOM element exists but is not of the expected type.
    #[error("element `#{id}` is not a {expected}")]
    ElementType {
        /// The element id that was looked up.
        id: String,
        /// Expected element interface, e.g. `HTMLInputElement`.
        expected: &'static str,
    },

    /// Invalid console configuration.
    #[error("invalid console config: {0}")]
    Config(String),

    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result alias for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;
