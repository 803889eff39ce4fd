//! Console configuration.
//!
//! Every key is optional; an empty JSON object yields the defaults the
//! stock host page expects (`#cmd-form`, `#cmd`, `#terminal-output`,
//! `POST /command` with field `cmd`).

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};
use crate::{DEFAULT_ENDPOINT, DEFAULT_FIELD, DEFAULT_FORM_ID, DEFAULT_INPUT_ID, DEFAULT_OUTPUT_ID};

/// How overlapping submissions are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangePolicy {
    /// Dispatch every submission immediately. Replies land in arrival order.
    Concurrent,
    /// One exchange in flight; later submissions are echoed and queued, and
    /// the view is marked busy while waiting. Replies land in submission
    /// order.
    #[default]
    Serialized,
}

/// How reply text is turned into markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupPolicy {
    /// HTML-escape the server's `output`.
    #[default]
    Escaped,
    /// Insert `output` as markup. Only for endpoints trusted to sanitize.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub endpoint: String,
    pub field: String,
    pub form_id: String,
    pub input_id: String,
    pub output_id: String,
    pub policy: ExchangePolicy,
    pub markup: MarkupPolicy,
    /// Prefix for echo entries.
    pub echo_prefix: String,
    /// Reply text used when the response has no `output`.
    pub missing_output: String,
    /// Mount automatically when the module starts.
    pub autostart: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            field: DEFAULT_FIELD.to_owned(),
            form_id: DEFAULT_FORM_ID.to_owned(),
            input_id: DEFAULT_INPUT_ID.to_owned(),
            output_id: DEFAULT_OUTPUT_ID.to_owned(),
            policy: ExchangePolicy::default(),
            markup: MarkupPolicy::default(),
            echo_prefix: "> ".to_owned(),
            missing_output: "(no output)".to_owned(),
            autostart: true,
        }
    }
}

impl ConsoleConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConsoleError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that could never mount or dispatch.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("endpoint", &self.endpoint),
            ("field", &self.field),
            ("form_id", &self.form_id),
            ("input_id", &self.input_id),
            ("output_id", &self.output_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConsoleError::Config(format!("`{key}` must not be empty")));
            }
        }
        Ok(())
    }
}
