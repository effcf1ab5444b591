//! Global logging for the front end
//!
//! A process-wide `LoggingService` and `ErrorCollector` live in `OnceLock`s.
//! The current source file is tracked per thread so every event can name it,
//! and errors and warnings are collected for a cargo-style summary.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::Span;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, Logger, LoggingService, MemoryLogger, MultiLogger, StructuredLogger,
};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

/// Initialize global logging from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(LoggingService::with_config()))
}

/// Install a caller-built service; tests pass one wrapping a `MemoryLogger`
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())?;
    GLOBAL_ERROR_COLLECTOR.get_or_init(|| Arc::new(ErrorCollector::new()));
    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(Arc::as_ref)
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR.get().map(Arc::as_ref)
}

/// Restores the previously active file context when dropped
struct FileContextGuard {
    previous: Option<FileProcessingContext>,
}

impl Drop for FileContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    }
}

fn enter_file_context(file_path: PathBuf, file_id: usize) -> FileContextGuard {
    let previous = get_current_file_context();
    set_file_context(file_path, file_id);
    FileContextGuard { previous }
}

pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    let context = FileProcessingContext::new(file_path, file_id);
    if let Some(collector) = try_get_global_error_collector() {
        collector.record_file_context(context.clone());
    }
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = Some(context));
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| ctx.borrow_mut().take());
}

/// Run `f` with `file_path` as this thread's current file. The outer context,
/// if any, is back in place afterwards even if `f` panics.
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = enter_file_context(file_path, file_id);
    f()
}

pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn build_event(event: LogEvent, span: Option<Span>, context: Vec<(&str, &str)>) -> LogEvent {
    let mut event = context
        .into_iter()
        .fold(event, |event, (key, value)| event.with_context(key, value));

    if let Some(span) = span {
        event = event.with_span(span);
    }

    if config::include_file_context() {
        if let Some(file_ctx) = get_current_file_context() {
            event = event
                .with_context("file", &file_ctx.file_path.display().to_string())
                .with_context("file_id", &file_ctx.file_id.to_string());
        }
    }

    event
}

/// Send to the global logger; diagnostics are also kept by the collector
fn dispatch(event: LogEvent) {
    if event.is_diagnostic() {
        let file_ctx = get_current_file_context();
        if let (Some(file_ctx), Some(collector)) = (file_ctx, try_get_global_error_collector()) {
            collector.record_event(&file_ctx.file_path, event.clone());
        }
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, &str)>,
) {
    let message = config::truncate_message(message);
    dispatch(build_event(LogEvent::error(code, &message), span, context));
}

pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, &str)>,
) {
    let message = config::truncate_message(message);
    let event = match code {
        Some(code) => LogEvent::warning(code, &message),
        None => LogEvent::uncoded_warning(&message),
    };
    dispatch(build_event(event, span, context));
}

pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::success(code, message), None, context));
}

pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::info(message), None, context));
}

pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(build_event(LogEvent::debug(message), None, context));
}

pub fn get_processing_summary() -> ProcessingSummary {
    try_get_global_error_collector()
        .map(ErrorCollector::get_summary)
        .unwrap_or_default()
}

pub fn get_file_diagnostics(file_path: &Path) -> Vec<LogEvent> {
    try_get_global_error_collector()
        .map(|collector| collector.get_file_events(file_path))
        .unwrap_or_default()
}

/// Cargo-style diagnostics for everything collected so far
pub fn cargo_style_summary() -> Option<String> {
    try_get_global_error_collector().map(collector::format_cargo_style_errors)
}

/// Log an error even when global logging was never initialized
pub fn safe_log_error(code: Code, message: &str) {
    match try_get_global_logger() {
        Some(logger) => logger.log_event(LogEvent::error(code, message)),
        None => eprintln!("[ERROR] {} - {} (logging not initialized)", code, message),
    }
}
