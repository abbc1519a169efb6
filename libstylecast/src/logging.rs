//! Centralized logging configuration for the Stylecast binaries
//!
//! Supports text, JSON, and pretty-printed output on stderr, configured
//! either explicitly or through `STYLECAST_LOG_FORMAT` / `STYLECAST_LOG_LEVEL`.
//!
//! # Examples
//!
//! ```no_run
//! use libstylecast::logging::{LoggingConfig, LogFormat};
//!
//! let config = LoggingConfig::new(LogFormat::Json, "info".to_string(), false);
//! config.init();
//! ```

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub verbose: bool,
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// * `verbose` - if true, defaults to debug level
    pub fn new(format: LogFormat, level: String, verbose: bool) -> Self {
        Self {
            format,
            level,
            verbose,
        }
    }

    /// Build from `STYLECAST_LOG_FORMAT` and `STYLECAST_LOG_LEVEL`,
    /// falling back to text at info level
    pub fn from_env() -> Self {
        let format = std::env::var("STYLECAST_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogFormat::Text);

        let level = std::env::var("STYLECAST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self::new(format, level, false)
    }

    /// Initialize logging with the configured settings
    ///
    /// Call once at program start. A second call is ignored.
    pub fn init(&self) {
        use tracing_subscriber::EnvFilter;

        let default_level = if self.verbose { "debug" } else { self.level.as_str() };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let result = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .flatten_event(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .try_init(),
        };

        if result.is_err() {
            tracing::debug!("Logging already initialized");
        }
    }
}

/// Initialize logging from the environment
///
/// ```bash
/// STYLECAST_LOG_FORMAT=json STYLECAST_LOG_LEVEL=debug style-replay actions.jsonl
/// ```
pub fn init_default() {
    LoggingConfig::from_env().init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        // Case insensitive
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let result = "invalid".parse::<LogFormat>();
        assert!(result.unwrap_err().contains("Invalid log format: 'invalid'"));
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for format in [LogFormat::Text, LogFormat::Json, LogFormat::Pretty] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("STYLECAST_LOG_FORMAT", "json");
        std::env::set_var("STYLECAST_LOG_LEVEL", "trace");
        let config = LoggingConfig::from_env();
        std::env::remove_var("STYLECAST_LOG_FORMAT");
        std::env::remove_var("STYLECAST_LOG_LEVEL");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "trace");
        assert!(!config.verbose);
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        std::env::remove_var("STYLECAST_LOG_FORMAT");
        std::env::remove_var("STYLECAST_LOG_LEVEL");
        let config = LoggingConfig::from_env();

        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.level, "info");
    }
}
