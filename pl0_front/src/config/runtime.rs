// RUNTIME PREFERENCES
//
// Behavioural switches that do not affect security limits. Each field
// defaults from a `PL0_*` environment variable; a TOML file may override
// them via `RuntimeConfig::load`.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use thiserror::Error;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Reject sources without the `.pl0` extension
    pub require_pl0_extension: bool,

    /// Treat a zero-byte source as an error instead of an EOF-only program
    pub reject_empty_files: bool,

    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_pl0_extension: env_flag(env_vars::REQUIRE_PL0_EXTENSION, false),
            reject_empty_files: env_flag(env_vars::REJECT_EMPTY_FILES, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Emit a W020 warning for every character the scanner skips
    pub log_skipped_characters: bool,

    /// Count tokens per kind in the lexer metrics
    pub collect_detailed_metrics: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            log_skipped_characters: env_flag(env_vars::LEXICAL_LOG_SKIPPED, true),
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolPreferences {
    /// Log each new symbol table row at debug level
    pub log_registrations: bool,
}

impl Default for SymbolPreferences {
    fn default() -> Self {
        Self {
            log_registrations: env_flag(env_vars::SYMBOLS_LOG_REGISTRATIONS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPreferences {
    pub token_report_path: String,
    pub symbol_report_path: String,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            token_report_path: env_string(env_vars::REPORT_TOKENS_PATH, "tokens.txt"),
            symbol_report_path: env_string(env_vars::REPORT_SYMBOLS_PATH, "symbol_table.txt"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// JSON lines instead of the plain console format
    pub use_structured_logging: bool,

    pub enable_console_logging: bool,

    pub min_log_level: LogLevel,

    /// Print the cargo-style diagnostic summary after a run
    pub enable_cargo_style_output: bool,

    /// Attach the current source file to every event
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env_flag(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse a log level from an environment variable value
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum RuntimeConfigError {
    #[error("Cannot read runtime configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid runtime configuration '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub symbols: SymbolPreferences,
    pub report: ReportPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text. Missing tables and keys keep their
    /// environment-derived defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, RuntimeConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text).map_err(|source| RuntimeConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File processor
    pub const REQUIRE_PL0_EXTENSION: &str = "PL0_REQUIRE_PL0_EXTENSION";
    pub const REJECT_EMPTY_FILES: &str = "PL0_REJECT_EMPTY_FILES";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "PL0_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_LOG_SKIPPED: &str = "PL0_LEXICAL_LOG_SKIPPED";
    pub const LEXICAL_DETAILED_METRICS: &str = "PL0_LEXICAL_DETAILED_METRICS";

    // Symbols
    pub const SYMBOLS_LOG_REGISTRATIONS: &str = "PL0_SYMBOLS_LOG_REGISTRATIONS";

    // Reports
    pub const REPORT_TOKENS_PATH: &str = "PL0_REPORT_TOKENS_PATH";
    pub const REPORT_SYMBOLS_PATH: &str = "PL0_REPORT_SYMBOLS_PATH";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "PL0_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "PL0_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "PL0_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "PL0_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "PL0_LOGGING_INCLUDE_FILE_CONTEXT";
}
