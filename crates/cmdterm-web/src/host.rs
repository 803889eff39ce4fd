//! Host glue that does not touch JS types, so it builds and tests natively.

use cmdterm_core::{ConsoleConfig, Result};
use tracing::Level;

/// Version of the JS-facing API (`mountConsole`, `drainConsoleDiagnostics`).
pub const CMDTERM_JS_API_VERSION: &str = "1.0.0";

/// Id of the optional `<script type="application/json">` config element.
pub const CONFIG_SCRIPT_ID: &str = "cmdterm-config";

/// Parse the embedded config document. A missing or blank element means
/// defaults.
pub fn parse_embedded_config(text: Option<&str>) -> Result<ConsoleConfig> {
    match text.map(str::trim) {
        None | Some("") => Ok(ConsoleConfig::default()),
        Some(json) => ConsoleConfig::from_json(json),
    }
}

/// Browser console method used for a tracing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl ConsoleMethod {
    #[must_use]
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            _ => Self::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConsoleMethod, parse_embedded_config};
    use cmdterm_core::{ConsoleConfig, ConsoleError, ExchangePolicy};
    use pretty_assertions::assert_eq;
    use tracing::Level;

    #[test]
    fn absent_or_blank_config_means_defaults() {
        assert_eq!(parse_embedded_config(None).unwrap(), ConsoleConfig::default());
        assert_eq!(
            parse_embedded_config(Some("  \n ")).unwrap(),
            ConsoleConfig::default()
        );
    }

    #[test]
    fn embedded_config_overrides_defaults() {
        let config =
            parse_embedded_config(Some(r#" {"policy":"concurrent","autostart":false} "#)).unwrap();
        assert_eq!(config.policy, ExchangePolicy::Concurrent);
        assert!(!config.autostart);
        assert_eq!(config.endpoint, "/command");
    }

    #[test]
    fn broken_embedded_config_is_a_config_error() {
        let err = parse_embedded_config(Some("{not json")).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleMethod::for_level(Level::ERROR), ConsoleMethod::Error);
        assert_eq!(ConsoleMethod::for_level(Level::WARN), ConsoleMethod::Warn);
        assert_eq!(ConsoleMethod::for_level(Level::INFO), ConsoleMethod::Info);
        assert_eq!(ConsoleMethod::for_level(Level::DEBUG), ConsoleMethod::Debug);
        assert_eq!(ConsoleMethod::for_level(Level::TRACE), ConsoleMethod::Debug);
    }
}
