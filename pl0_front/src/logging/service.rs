//! Logger sinks and the level-filtering service in front of them

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Errors and warnings go to stderr so reports piped from stdout stay clean
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
        LogLevel::Info | LogLevel::Debug => println!("{}", line),
    }
}

pub struct LoggingService {
    sink: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(sink: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { sink, min_level }
    }

    /// Console or JSON-lines output chosen by the runtime preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let mut fan_out = MultiLogger::new(min_level);

        if config::use_console_logging() {
            let sink: Arc<dyn Logger> = if config::use_structured_logging() {
                Arc::new(StructuredLogger::new(min_level))
            } else {
                Arc::new(ConsoleLogger::new(min_level))
            };
            fan_out = fan_out.with_logger(sink);
        }

        Self::new(Arc::new(fan_out), min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.sink.log(&event);
        }
    }

    pub fn log_error(&self, code: Code, message: &str) {
        self.log_event(LogEvent::error(code, message));
    }

    pub fn log_warning(&self, code: Code, message: &str) {
        self.log_event(LogEvent::warning(code, message));
    }

    pub fn log_success(&self, code: Code, message: &str) {
        self.log_event(LogEvent::success(code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Human-readable single-line events
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            emit(event.level, &event.format());
        }
    }
}

/// JSON lines, falling back to the plain format if serialization fails
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            let line = event.format_json().unwrap_or_else(|_| event.format());
            emit(event.level, &line);
        }
    }
}

/// Bounded in-memory sink for assertions on emitted diagnostics
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::get_error_buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    fn events(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events().clone()
    }

    /// Codes of every recorded event, oldest first
    pub fn codes(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.code.as_str()).collect()
    }

    pub fn clear(&self) {
        self.events().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    pub fn count_with_code(&self, code: Code) -> usize {
        self.events().iter().filter(|e| e.code == code).count()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.events().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_event_with_code(&self, code: Code) -> bool {
        self.events().iter().any(|e| e.code == code)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.events();
        if events.len() == self.capacity {
            events.remove(0);
        }
        events.push(event.clone());
    }
}

/// Forwards each event to every attached sink
pub struct MultiLogger {
    sinks: Vec<Arc<dyn Logger>>,
    min_level: LogLevel,
}

impl MultiLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            sinks: Vec::new(),
            min_level,
        }
    }

    pub fn with_logger(mut self, sink: Arc<dyn Logger>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        if event.level > self.min_level {
            return;
        }
        for sink in &self.sinks {
            sink.log(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger_records_codes_in_order() {
        let logger = MemoryLogger::with_capacity(16);

        logger.log(&LogEvent::warning(
            codes::lexical::UNRECOGNIZED_CHARACTER,
            "Skipped '#'",
        ));
        logger.log(&LogEvent::warning(
            codes::lexical::UNRECOGNIZED_CHARACTER,
            "Skipped '@'",
        ));
        logger.log(&LogEvent::success(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization complete",
        ));

        assert_eq!(logger.codes(), vec!["W020", "W020", "I020"]);
        assert_eq!(logger.count_with_code(codes::lexical::UNRECOGNIZED_CHARACTER), 2);
        assert!(!logger.has_error_with_code(codes::lexical::UNRECOGNIZED_CHARACTER));

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_memory_logger_drops_oldest_at_capacity() {
        let logger = MemoryLogger::with_capacity(2);
        logger.log(&LogEvent::info("first"));
        logger.log(&LogEvent::info("second"));
        logger.log(&LogEvent::error(codes::symbols::SYMBOL_LIMIT_EXCEEDED, "third"));

        let messages: Vec<String> = logger.get_events().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["second", "third"]);
    }

    #[test]
    fn test_multi_logger_respects_its_own_level() {
        let memory = Arc::new(MemoryLogger::with_capacity(8));
        let fan_out = MultiLogger::new(LogLevel::Warning).with_logger(memory.clone());
        assert_eq!(fan_out.len(), 1);

        fan_out.log(&LogEvent::debug("Classifier state"));
        fan_out.log(&LogEvent::warning(codes::symbols::DANGLING_CONSTANT, "const c;"));

        assert_eq!(memory.codes(), vec!["W030"]);
    }

    #[test]
    fn test_service_level_filtering() {
        let logger = Arc::new(MemoryLogger::with_capacity(8));
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_debug("Debug message");
        service.log_info("Info message");
        service.log_warning(codes::lexical::UNTERMINATED_COMMENT, "Comment runs to EOF");
        service.log_success(codes::success::SYMBOL_TABLE_COMPLETE, "Done");
        service.log_error(codes::lexical::TOKEN_LIMIT_EXCEEDED, "Too many tokens");

        assert_eq!(logger.codes(), vec!["E020"]);
        assert_eq!(service.min_level(), LogLevel::Error);
    }
}
