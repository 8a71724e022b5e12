//! Logging utilities and configuration for the typeset engine.
//!
//! Inference runs once per profiled column, often over wide tables, so the
//! per-step events are gated behind [`LogConfig`] and only evaluated when
//! enabled.

use tracing::Level;

/// Logging configuration for a typeset.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level for typeset components
    pub base_level: Level,
    /// Whether to log every state popped and expanded by the inference search
    pub log_search_steps: bool,
    /// Whether to log relation coercions
    pub log_coercions: bool,
    /// Maximum length for logged field values (to prevent huge logs)
    pub max_field_length: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            base_level: Level::INFO,
            log_search_steps: false,
            log_coercions: true,
            max_field_length: 256,
        }
    }
}

impl LogConfig {
    /// Creates a verbose configuration suitable for debugging.
    pub fn verbose() -> Self {
        Self {
            base_level: Level::DEBUG,
            log_search_steps: true,
            log_coercions: true,
            max_field_length: 1024,
        }
    }

    /// Creates a minimal configuration for production with lowest overhead.
    pub fn production() -> Self {
        Self {
            base_level: Level::WARN,
            log_search_steps: false,
            log_coercions: false,
            max_field_length: 128,
        }
    }

    /// Whether per-step search events should be emitted.
    ///
    /// Requires both the flag and a base level of `DEBUG` or more verbose.
    pub fn search_steps_enabled(&self) -> bool {
        self.log_search_steps && self.base_level >= Level::DEBUG
    }

    /// Whether relation coercion events should be emitted.
    pub fn coercions_enabled(&self) -> bool {
        self.log_coercions && self.base_level >= Level::DEBUG
    }
}

/// Macro for conditional search-step logging.
#[macro_export]
macro_rules! log_step {
    ($config:expr, $($arg:tt)*) => {
        if $config.search_steps_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Macro for conditional coercion logging.
#[macro_export]
macro_rules! log_coercion {
    ($config:expr, $($arg:tt)*) => {
        if $config.coercions_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Truncates a string to the maximum field length if needed.
pub fn truncate_field(value: &str, max_length: usize) -> String {
    if value.len() <= max_length {
        value.to_string()
    } else {
        let mut end = max_length;
        while !value.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...(truncated)", &value[..end])
    }
}

/// Utilities for setting up structured logging.
pub mod setup {
    use tracing::Level;

    /// Configuration for the logging subscriber.
    #[derive(Debug, Clone)]
    pub struct LoggingConfig {
        /// Log level for the application
        pub level: Level,
        /// Log level for typeset components specifically
        pub typeset_level: Level,
        /// Whether to use JSON output format
        pub json_format: bool,
        /// Environment filter override
        pub env_filter: Option<String>,
    }

    impl Default for LoggingConfig {
        fn default() -> Self {
            Self {
                level: Level::INFO,
                typeset_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }
    }

    impl LoggingConfig {
        /// Creates a configuration for production use.
        pub fn production() -> Self {
            Self {
                level: Level::WARN,
                typeset_level: Level::INFO,
                json_format: true,
                env_filter: None,
            }
        }

        /// Creates a configuration for development use.
        pub fn development() -> Self {
            Self {
                level: Level::DEBUG,
                typeset_level: Level::DEBUG,
                json_format: false,
                env_filter: None,
            }
        }

        /// Sets the log level for the application.
        pub fn with_level(mut self, level: Level) -> Self {
            self.level = level;
            self
        }

        /// Sets the log level for typeset components.
        pub fn with_typeset_level(mut self, level: Level) -> Self {
            self.typeset_level = level;
            self
        }

        /// Sets whether to use JSON output format.
        pub fn with_json_format(mut self, enabled: bool) -> Self {
            self.json_format = enabled;
            self
        }

        /// Sets a custom environment filter.
        pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
            self.env_filter = Some(filter.into());
            self
        }

        /// Builds the environment filter string.
        pub fn env_filter(&self) -> String {
            if let Some(ref filter) = self.env_filter {
                filter.clone()
            } else {
                format!(
                    "{},term_typeset={}",
                    self.level.as_str().to_lowercase(),
                    self.typeset_level.as_str().to_lowercase()
                )
            }
        }
    }

    /// Initializes a global `tracing` subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured filter.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use term_typeset::logging::setup::{LoggingConfig, init_logging};
    ///
    /// init_logging(LoggingConfig::development().with_json_format(true)).unwrap();
    /// ```
    pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.env_filter()));

        let fmt_layer = if config.json_format {
            tracing_subscriber::fmt::layer().json().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::setup::LoggingConfig;
    use super::*;

    #[test]
    fn test_log_config_defaults() {
        let config = LogConfig::default();
        assert_eq!(config.base_level, Level::INFO);
        assert!(!config.log_search_steps);
        assert!(config.log_coercions);
        assert_eq!(config.max_field_length, 256);
    }

    #[test]
    fn test_log_config_presets() {
        let verbose = LogConfig::verbose();
        assert_eq!(verbose.base_level, Level::DEBUG);
        assert!(verbose.log_search_steps);

        let production = LogConfig::production();
        assert_eq!(production.base_level, Level::WARN);
        assert!(!production.log_search_steps);
        assert!(!production.log_coercions);
    }

    #[test]
    fn test_search_steps_follow_base_level() {
        assert!(LogConfig::verbose().search_steps_enabled());
        assert!(!LogConfig::default().search_steps_enabled());

        let quiet = LogConfig {
            log_search_steps: true,
            ..LogConfig::production()
        };
        assert!(!quiet.search_steps_enabled());

        let trace = LogConfig {
            base_level: Level::TRACE,
            ..LogConfig::verbose()
        };
        assert!(trace.search_steps_enabled());
    }

    #[test]
    fn test_coercions_follow_base_level() {
        assert!(LogConfig::verbose().coercions_enabled());
        // flag is on by default but INFO is above the coercion events
        assert!(!LogConfig::default().coercions_enabled());
        assert!(!LogConfig::production().coercions_enabled());

        let debug = LogConfig {
            base_level: Level::DEBUG,
            ..LogConfig::default()
        };
        assert!(debug.coercions_enabled());
    }

    #[test]
    fn test_truncate_field() {
        assert_eq!(truncate_field("hello", 10), "hello");
        assert_eq!(
            truncate_field("this is a very long text that should be truncated", 10),
            "this is a ...(truncated)"
        );
        // never splits a multi-byte character
        assert_eq!(truncate_field("Élysée", 1), "...(truncated)");
    }

    #[test]
    fn test_env_filter() {
        assert_eq!(
            LoggingConfig::default().env_filter(),
            "info,term_typeset=debug"
        );
        assert_eq!(
            LoggingConfig::default()
                .with_env_filter("warn")
                .env_filter(),
            "warn"
        );
    }
}
