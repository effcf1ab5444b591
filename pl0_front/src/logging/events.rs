//! Log events emitted by the front end

use super::codes::{self, Code};
use crate::utils::Span;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Ordered from most to least severe; a logger at level L keeps events <= L
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placeholder codes for events that carry none from the registry
pub mod placeholder {
    use super::Code;

    pub const WARNING: Code = Code::new("W000");
    pub const INFO: Code = Code::new("I000");
    pub const DEBUG: Code = Code::new("D000");
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    /// Sorted so rendered context is stable across runs
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, code, message)
    }

    pub fn uncoded_warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, placeholder::WARNING, message)
    }

    /// Stage completion; logged at info level
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, placeholder::INFO, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, placeholder::DEBUG, message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    /// Errors and warnings are kept by the collector
    pub fn is_diagnostic(&self) -> bool {
        self.is_error() || self.is_warning()
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.code.as_str())
    }

    /// `[LEVEL] CODE - message at line:column`
    pub fn format(&self) -> String {
        match &self.span {
            Some(span) => format!(
                "[{}] {} - {} at {}",
                self.level,
                self.code.as_str(),
                self.message,
                span.start
            ),
            None => format!("[{}] {} - {}", self.level, self.code.as_str(), self.message),
        }
    }

    /// Console line followed by registry metadata and context
    pub fn format_detailed(&self) -> String {
        let mut lines = vec![
            self.format(),
            format!("  Category: {}", self.category()),
            format!("  Severity: {}", self.severity()),
        ];

        if self.is_error() {
            lines.push(format!("  Recoverable: {}", self.is_recoverable()));
            lines.push(format!("  Requires halt: {}", self.requires_halt()));
        }

        if codes::get_error_metadata(self.code.as_str()).is_some() {
            lines.push(format!("  Description: {}", self.description()));
            lines.push(format!("  Recommended action: {}", self.recommended_action()));
        }

        if !self.context.is_empty() {
            lines.push("  Context:".to_string());
            lines.extend(
                self.context
                    .iter()
                    .map(|(key, value)| format!("    {}: {}", key, value)),
            );
        }

        lines.join("\n")
    }

    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&JsonEvent::from(self))
    }
}

#[derive(Serialize)]
struct JsonSpan {
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
}

#[derive(Serialize)]
struct JsonErrorMetadata {
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
}

/// Borrowed wire shape of one structured log line
#[derive(Serialize)]
struct JsonEvent<'a> {
    timestamp: String,
    level: &'static str,
    code: &'static str,
    message: &'a str,
    category: &'static str,
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_metadata: Option<JsonErrorMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<JsonSpan>,
    #[serde(skip_serializing_if = "no_context")]
    context: &'a BTreeMap<String, String>,
}

fn no_context(context: &&BTreeMap<String, String>) -> bool {
    context.is_empty()
}

impl<'a> From<&'a LogEvent> for JsonEvent<'a> {
    fn from(event: &'a LogEvent) -> Self {
        Self {
            timestamp: event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            level: event.level.as_str(),
            code: event.code.as_str(),
            message: &event.message,
            category: event.category(),
            severity: event.severity(),
            error_metadata: event.is_error().then(|| JsonErrorMetadata {
                recoverable: event.is_recoverable(),
                requires_halt: event.requires_halt(),
                description: event.description(),
                recommended_action: event.recommended_action(),
            }),
            span: event.span.map(|span| JsonSpan {
                start_line: span.start.line,
                start_column: span.start.column,
                end_line: span.end.line,
                end_column: span.end.column,
            }),
            context: &event.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "File not found");

        assert!(event.is_error());
        assert!(event.is_diagnostic());
        assert_eq!(event.code.as_str(), "E011");
        assert_eq!(event.category(), "FileProcessing");
        assert!(event.requires_halt());
    }

    #[test]
    fn test_event_formatting_includes_position() {
        let start = Position::new(4, 2, 3);
        let event = LogEvent::warning(
            codes::lexical::UNRECOGNIZED_CHARACTER,
            "Skipped unrecognized character",
        )
        .with_span(Span::new(start, start.advance('#')));

        let formatted = event.format();
        assert!(formatted.starts_with("[WARN] W020"));
        assert!(formatted.ends_with("at 2:3"));
    }

    #[test]
    fn test_uncoded_events_use_placeholders() {
        assert_eq!(LogEvent::uncoded_warning("odd").code, placeholder::WARNING);
        assert_eq!(LogEvent::info("hello").code.as_str(), "I000");
        assert!(!LogEvent::debug("state").is_diagnostic());
    }

    #[test]
    fn test_detailed_format_sorts_context() {
        let event = LogEvent::error(codes::file_processing::FILE_TOO_LARGE, "File too large")
            .with_context("size", "1024")
            .with_context("limit", "512");

        let detailed = event.format_detailed();
        let limit_at = detailed.find("limit: 512").unwrap();
        let size_at = detailed.find("size: 1024").unwrap();
        assert!(limit_at < size_at);
        assert!(detailed.contains("Requires halt: true"));
        assert!(detailed.contains("Description:"));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::success(codes::success::TOKENIZATION_COMPLETE, "Tokenized")
            .with_context("tokens", "12");

        let json: serde_json::Value =
            serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "INFO");
        assert_eq!(json["code"], "I020");
        assert_eq!(json["context"]["tokens"], "12");
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
        assert!(json.get("error_metadata").is_none());
        assert!(json.get("span").is_none());
    }

    #[test]
    fn test_json_error_carries_span_and_metadata() {
        let start = Position::start();
        let event = LogEvent::error(codes::lexical::LEXEME_TOO_LONG, "Lexeme too long")
            .with_span(Span::new(start, start.advance('x')));

        let json: serde_json::Value =
            serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["span"]["start_line"], 1);
        assert_eq!(json["span"]["end_column"], 2);
        assert_eq!(json["error_metadata"]["requires_halt"], true);
        assert!(json.get("context").is_none());
    }
}
