//! Configuration for the editing core.
//!
//! Hosts normally hand over their formatter settings as an
//! [`IndentOptions`] value. For standalone use every setting can also be
//! read from environment variables prefixed with `GHERKIN_ASSIST_`.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// Log level enumeration matching tracing levels. Defaults to `Info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging.
    Trace,
    /// Debug-level information.
    Debug,
    /// Standard informational messages.
    #[default]
    Info,
    /// Potential problems.
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(AssistError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Character used for one level of indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndentStyle {
    /// One tab character per level.
    Tab,
    /// `indent_size` spaces per level.
    #[default]
    Space,
}

impl FromStr for IndentStyle {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab" | "tabs" => Ok(Self::Tab),
            "space" | "spaces" => Ok(Self::Space),
            _ => Err(AssistError::InvalidConfig(format!(
                "unknown indent style '{s}', expected 'tab' or 'space'"
            ))),
        }
    }
}

/// Indentation settings read from the host's formatter configuration.
///
/// The three `*_indent_size` values count indentation levels, not
/// characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndentOptions {
    /// Tabs or spaces.
    pub indent_style: IndentStyle,
    /// Spaces per level when `indent_style` is `Space`.
    pub indent_size: usize,
    /// Levels added below `Feature` and `Rule`.
    pub scenario_indent_size: usize,
    /// Levels added below `Background`, `Scenario` and `Scenario Outline`.
    pub step_indent_size: usize,
    /// Levels added below `Examples`.
    pub table_indent_size: usize,
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Space,
            indent_size: 4,
            scenario_indent_size: 1,
            step_indent_size: 1,
            table_indent_size: 1,
        }
    }
}

/// Configuration for the editing core.
///
/// # Environment Variables
///
/// - `GHERKIN_ASSIST_LOG_LEVEL`: trace, debug, info, warn or error
/// - `GHERKIN_ASSIST_SMART_INDENT`: `true`/`false`, smart line breaks
/// - `GHERKIN_ASSIST_INDENT_STYLE`: `tab` or `space`
/// - `GHERKIN_ASSIST_INDENT_SIZE`: spaces per level
/// - `GHERKIN_ASSIST_SCENARIO_INDENT`, `GHERKIN_ASSIST_STEP_INDENT`,
///   `GHERKIN_ASSIST_TABLE_INDENT`: levels per element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// Log level used by [`init_logging`](crate::logging::init_logging).
    pub log_level: LogLevel,
    /// Whether line breaks get structure-aware indentation.
    pub smart_indent_on_enter: bool,
    /// Indentation settings.
    pub indent: IndentOptions,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            smart_indent_on_enter: true,
            indent: IndentOptions::default(),
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize, AssistError> {
    value.trim().parse().map_err(|_| {
        AssistError::InvalidConfig(format!(
            "invalid value '{value}' for {key}, expected a non-negative integer"
        ))
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, AssistError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AssistError::InvalidConfig(format!(
            "invalid value '{value}' for {key}, expected true or false"
        ))),
    }
}

impl AssistConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns `AssistError::InvalidConfig` if a variable holds an invalid
    /// value.
    pub fn from_env() -> Result<Self, AssistError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `AssistError::InvalidConfig` if a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AssistError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup("GHERKIN_ASSIST_LOG_LEVEL") {
            config.log_level = value.parse()?;
        }
        if let Some(value) = lookup("GHERKIN_ASSIST_SMART_INDENT") {
            config.smart_indent_on_enter = parse_flag("GHERKIN_ASSIST_SMART_INDENT", &value)?;
        }
        if let Some(value) = lookup("GHERKIN_ASSIST_INDENT_STYLE") {
            config.indent.indent_style = value.parse()?;
        }

        let sizes: [(&str, &mut usize); 4] = [
            ("GHERKIN_ASSIST_INDENT_SIZE", &mut config.indent.indent_size),
            (
                "GHERKIN_ASSIST_SCENARIO_INDENT",
                &mut config.indent.scenario_indent_size,
            ),
            (
                "GHERKIN_ASSIST_STEP_INDENT",
                &mut config.indent.step_indent_size,
            ),
            (
                "GHERKIN_ASSIST_TABLE_INDENT",
                &mut config.indent.table_indent_size,
            ),
        ];
        for (key, slot) in sizes {
            if let Some(value) = lookup(key) {
                *slot = parse_number(key, &value)?;
            }
        }

        Ok(config)
    }

    /// Apply optional overrides, typically from the host, on top of the
    /// environment-based values.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        indent: Option<IndentOptions>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(options) = indent {
            self.indent = options;
        }
        self
    }

    /// Return a copy with the given log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Return a copy with the given indentation settings.
    #[must_use]
    pub fn with_indent(mut self, indent: IndentOptions) -> Self {
        self.indent = indent;
        self
    }

    /// Return a copy with smart line breaks switched on or off.
    #[must_use]
    pub fn with_smart_indent(mut self, enabled: bool) -> Self {
        self.smart_indent_on_enter = enabled;
        self
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!("TRACE".parse::<LogLevel>().ok(), Some(LogLevel::Trace));
        assert_eq!("warning".parse::<LogLevel>().ok(), Some(LogLevel::Warn));
        assert!("loud"
            .parse::<LogLevel>()
            .unwrap_err()
            .to_string()
            .contains("unknown log level"));
    }

    #[test]
    fn defaults_match_conventional_gherkin_layout() {
        let config = AssistConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.smart_indent_on_enter);
        assert_eq!(config.indent.indent_style, IndentStyle::Space);
        assert_eq!(config.indent.indent_size, 4);
        assert_eq!(config.indent.step_indent_size, 1);
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = AssistConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AssistConfig::default());
    }

    #[test]
    fn lookup_overrides_every_setting() {
        let config = AssistConfig::from_lookup(lookup_from(&[
            ("GHERKIN_ASSIST_LOG_LEVEL", "debug"),
            ("GHERKIN_ASSIST_SMART_INDENT", "off"),
            ("GHERKIN_ASSIST_INDENT_STYLE", "tab"),
            ("GHERKIN_ASSIST_INDENT_SIZE", "2"),
            ("GHERKIN_ASSIST_SCENARIO_INDENT", "3"),
            ("GHERKIN_ASSIST_STEP_INDENT", "4"),
            ("GHERKIN_ASSIST_TABLE_INDENT", "5"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(!config.smart_indent_on_enter);
        assert_eq!(
            config.indent,
            IndentOptions {
                indent_style: IndentStyle::Tab,
                indent_size: 2,
                scenario_indent_size: 3,
                step_indent_size: 4,
                table_indent_size: 5,
            }
        );
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = AssistConfig::from_lookup(lookup_from(&[("GHERKIN_ASSIST_STEP_INDENT", "-1")]))
            .unwrap_err();
        assert!(err.to_string().contains("GHERKIN_ASSIST_STEP_INDENT"));
    }

    #[test]
    fn overrides_take_precedence() {
        let indent = IndentOptions {
            indent_size: 2,
            ..IndentOptions::default()
        };
        let config = AssistConfig::default().apply_overrides(Some(LogLevel::Error), Some(indent));
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.indent.indent_size, 2);

        let untouched = AssistConfig::default().apply_overrides(None, None);
        assert_eq!(untouched, AssistConfig::default());
    }

    #[test]
    fn indent_options_deserialise_from_camel_case() {
        let options: IndentOptions = serde_json::from_str(
            r#"{"indentStyle":"tab","indentSize":8,"stepIndentSize":2}"#,
        )
        .unwrap();
        assert_eq!(options.indent_style, IndentStyle::Tab);
        assert_eq!(options.indent_size, 8);
        assert_eq!(options.step_indent_size, 2);
        assert_eq!(options.scenario_indent_size, 1);
    }
}
