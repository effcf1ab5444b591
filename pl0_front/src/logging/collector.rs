//! Per-file diagnostic collection with cargo-style output

use super::config;
use super::events::LogEvent;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Context keys already shown in the `-->` location line
const LOCATION_KEYS: [&str; 2] = ["file", "file_id"];

#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Diagnostics discarded past the per-file limit
    pub dropped_events: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

#[derive(Debug, Default)]
struct FileDiagnostics {
    context: Option<FileProcessingContext>,
    events: Vec<LogEvent>,
    dropped: usize,
}

impl FileDiagnostics {
    fn errors(&self) -> impl Iterator<Item = &LogEvent> {
        self.events.iter().filter(|e| e.is_error())
    }

    fn warnings(&self) -> impl Iterator<Item = &LogEvent> {
        self.events.iter().filter(|e| e.is_warning())
    }
}

/// Errors and warnings grouped by source, in path order
pub struct ErrorCollector {
    files: Mutex<BTreeMap<PathBuf, FileDiagnostics>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(BTreeMap::new()),
        }
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<PathBuf, FileDiagnostics>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Keep `event` unless the file already holds the per-file maximum
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let limit = config::get_max_log_events_per_file();
        let mut files = self.files();
        let file = files.entry(file_path.to_path_buf()).or_default();

        if file.events.len() < limit {
            file.events.push(event);
        } else {
            file.dropped += 1;
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        let key = context.file_path.clone();
        self.files().entry(key).or_default().context = Some(context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        self.files()
            .get(file_path)
            .map(|file| file.events.clone())
            .unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.files()
            .get(file_path)
            .map(|file| file.errors().cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_file_warnings(&self, file_path: &Path) -> Vec<LogEvent> {
        self.files()
            .get(file_path)
            .map(|file| file.warnings().cloned().collect())
            .unwrap_or_default()
    }

    /// Time since the file context was first recorded
    pub fn file_elapsed(&self, file_path: &Path) -> Option<Duration> {
        self.files()
            .get(file_path)
            .and_then(|file| file.context.as_ref())
            .map(FileProcessingContext::elapsed)
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        self.files()
            .values()
            .fold(ProcessingSummary::default(), |mut summary, file| {
                let errors = file.errors().count();
                summary.total_files += 1;
                summary.total_errors += errors;
                summary.total_warnings += file.warnings().count();
                summary.dropped_events += file.dropped;
                if errors > 0 {
                    summary.files_with_errors += 1;
                }
                summary
            })
    }

    pub fn total_event_count(&self) -> usize {
        self.files().values().map(|file| file.events.len()).sum()
    }

    pub fn clear(&self) {
        self.files().clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn write_event(output: &mut String, label: &str, file_path: &Path, event: &LogEvent) {
    output.push_str(&format!("{}[{}]: {}\n", label, event.code, event.message));
    if let Some(span) = &event.span {
        output.push_str(&format!("  --> {}:{}\n", file_path.display(), span.start));
    }
    for (key, value) in &event.context {
        if !LOCATION_KEYS.contains(&key.as_str()) {
            output.push_str(&format!("  = {}: {}\n", key, value));
        }
    }
}

/// Render collected diagnostics the way cargo prints compiler output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, file) in collector.files().iter() {
        if file.events.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in file.errors() {
            write_event(&mut output, "error", file_path, event);
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            if super::codes::get_error_metadata(event.code.as_str()).is_some() {
                output.push_str(&format!("  = help: {}\n", event.recommended_action()));
            }
        }

        for event in file.warnings() {
            write_event(&mut output, "warning", file_path, event);
        }

        if file.dropped > 0 {
            output.push_str(&format!(
                "note: {} further diagnostics omitted (limit {} per file)\n",
                file.dropped,
                config::get_max_log_events_per_file()
            ));
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.has_errors() {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.has_warnings() {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_record_and_summarize() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("prog.pl0");
        collector.record_file_context(FileProcessingContext::new(path.clone(), 0));

        collector.record_event(
            &path,
            LogEvent::warning(codes::lexical::UNRECOGNIZED_CHARACTER, "Skipped '#'"),
        );
        collector.record_event(
            &path,
            LogEvent::error(codes::lexical::TOKEN_LIMIT_EXCEEDED, "Too many tokens"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 1);
        assert_eq!(summary.files_with_errors, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
        assert_eq!(collector.get_file_errors(&path).len(), 1);
        assert_eq!(collector.get_file_warnings(&path).len(), 1);
        assert!(collector.file_elapsed(&path).is_some());
    }

    #[test]
    fn test_file_context_is_kept_per_file() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("Program_Text.txt");
        collector.record_file_context(FileProcessingContext::new(path.clone(), 7));

        let files = collector.files();
        let context = files[&path].context.as_ref().unwrap();
        assert_eq!(context.file_path, path);
        assert_eq!(context.file_id, 7);
        drop(files);

        assert!(collector.file_elapsed(&path).is_some());
        assert!(collector.get_file_events(&path).is_empty());
        assert_eq!(collector.get_summary().total_files, 1);
        assert!(collector.file_elapsed(Path::new("other.pl0")).is_none());
    }

    #[test]
    fn test_per_file_limit_counts_dropped_events() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("noisy.pl0");
        let limit = config::get_max_log_events_per_file();

        for _ in 0..limit + 5 {
            collector.record_event(
                &path,
                LogEvent::warning(codes::lexical::UNRECOGNIZED_CHARACTER, "skip"),
            );
        }

        assert_eq!(collector.get_file_events(&path).len(), limit);
        assert_eq!(collector.get_summary().dropped_events, 5);
        assert!(format_cargo_style_errors(&collector).contains("5 further diagnostics omitted"));
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let path = PathBuf::from("prog.pl0");
        let start = Position::new(7, 2, 4);

        collector.record_event(
            &path,
            LogEvent::warning(codes::lexical::UNRECOGNIZED_CHARACTER, "Skipped '#'")
                .with_span(Span::new(start, start.advance('#')))
                .with_context("character", "#")
                .with_context("file", "prog.pl0"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking prog.pl0..."));
        assert!(output.contains("warning[W020]: Skipped '#'"));
        assert!(output.contains("--> prog.pl0:2:4"));
        assert!(output.contains("= character: #"));
        assert!(!output.contains("= file:"));
        assert!(output.contains("Total warnings: 1"));

        collector.clear();
        assert_eq!(collector.total_event_count(), 0);
    }
}
