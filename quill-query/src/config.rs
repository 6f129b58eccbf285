//! Configuration file parsing for `quill.toml`.
//!
//! ```toml
//! [formatter]
//! on_depth_exceeded = "truncate"   # or "error"
//! escape = "quotes-only"           # or "full"
//!
//! [logging]
//! level = "debug"
//! format = "pretty"
//! ```
//!
//! `${VAR}` references are expanded from the environment before parsing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{QueryError, QueryResult};
use crate::format::{DepthPolicy, EscapePolicy, Formatter};

/// Environment variable naming a config file for [`QuillConfig::from_env`].
pub const CONFIG_ENV_VAR: &str = "QUILL_CONFIG";

/// Main configuration structure for `quill.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QuillConfig {
    /// Value formatter settings.
    #[serde(default)]
    pub formatter: FormatterConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QuillConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            QueryError::invalid_config(format!("failed to read {}", path.display())).with_source(e)
        })?;

        content.parse()
    }

    /// Load the file named by `QUILL_CONFIG`, or the defaults when unset.
    pub fn from_env() -> QueryResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Formatter built from the `[formatter]` section.
    pub fn formatter(&self) -> Formatter {
        Formatter::from(&self.formatter)
    }
}

impl FromStr for QuillConfig {
    type Err = QueryError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let expanded = expand_env_vars(content);

        toml::from_str(&expanded)
            .map_err(|e| QueryError::invalid_config(e.message().to_string()).with_source(e))
    }
}

/// Formatter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    /// What to do with values nested past the depth limit.
    #[serde(default)]
    pub on_depth_exceeded: DepthPolicy,

    /// String escaping.
    #[serde(default)]
    pub escape: EscapePolicy,
}

impl From<&FormatterConfig> for Formatter {
    fn from(config: &FormatterConfig) -> Self {
        Formatter::new()
            .with_depth_policy(config.on_depth_exceeded)
            .with_escape(config.escape)
    }
}

/// Logging configuration.
///
/// Unset keys fall back to the `QUILL_LOG_LEVEL` / `QUILL_LOG_FORMAT`
/// environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,

    /// Output format (json, pretty, compact).
    pub format: Option<String>,
}

/// Expand environment variables in the format `${VAR_NAME}`.
///
/// Unknown variables are left as written.
fn expand_env_vars(content: &str) -> String {
    let Ok(re) = regex_lite::Regex::new(r"\$\{([^}]+)\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QuillConfig::default();
        assert_eq!(config.formatter.on_depth_exceeded, DepthPolicy::Truncate);
        assert_eq!(config.formatter.escape, EscapePolicy::QuotesOnly);
        assert_eq!(config.formatter(), Formatter::new());
    }

    #[test]
    fn test_parse_formatter_section() {
        let config: QuillConfig = r#"
            [formatter]
            on_depth_exceeded = "error"
            escape = "full"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.formatter.on_depth_exceeded, DepthPolicy::Error);
        assert_eq!(config.formatter().escape_policy(), EscapePolicy::Full);
        assert_eq!(config.formatter().depth_policy(), DepthPolicy::Error);
    }

    #[test]
    fn test_empty_config() {
        let config: QuillConfig = "".parse().unwrap();
        assert_eq!(config, QuillConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = "[formatter]\nmax_depth = 20\n".parse::<QuillConfig>().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfiguration);
    }

    #[test]
    fn test_env_expansion() {
        // SAFETY: test runs in isolation
        unsafe {
            std::env::set_var("QUILL_TEST_LOG_LEVEL", "trace");
        }
        let config: QuillConfig = "[logging]\nlevel = \"${QUILL_TEST_LOG_LEVEL}\"\n".parse().unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("trace"));
    }

    #[test]
    fn test_unknown_env_left_as_is() {
        assert_eq!(expand_env_vars("${QUILL_SURELY_UNSET_VAR}"), "${QUILL_SURELY_UNSET_VAR}");
    }

    #[test]
    fn test_missing_file() {
        let err = QuillConfig::from_file("/nonexistent/quill.toml").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidConfiguration);
        assert!(err.source.is_some());
    }
}
