//! Source file reader with compile-time limits and global logging integration

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// Extension accepted when `.pl0` files are required
pub const PL0_EXTENSION: &str = "pl0";

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("Invalid file path: {path:?}")]
    InvalidPath { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("Invalid file extension: expected .pl0, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_pl0_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable_bytes(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Program text and what was learned about the file while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace; lexes to a lone end-of-input token
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

pub struct FileProcessor {
    pub require_pl0_extension: bool,
    pub reject_empty_files: bool,
    pub enable_performance_logging: bool,
}

/// Log `error` under its own code and hand it back for `Err(..)`
fn reject(error: FileProcessorError, message: &str, file_path: &str) -> FileProcessorError {
    log_error!(error.error_code(), message, "file" => file_path, "reason" => &error);
    error
}

/// Map an I/O failure on `path` to the matching processor error
fn io_failure(error: &std::io::Error, path: &Path, action: &str) -> FileProcessorError {
    let path = path.display().to_string();
    match error.kind() {
        ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied { path },
        ErrorKind::InvalidData => FileProcessorError::InvalidEncoding { path },
        _ => FileProcessorError::IoError {
            message: format!("{} '{}': {}", action, path, error),
        },
    }
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_pl0_extension: false,
            reject_empty_files: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_pl0_extension: prefs.require_pl0_extension,
            reject_empty_files: prefs.reject_empty_files,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_pl0_extension_required(mut self, required: bool) -> Self {
        self.require_pl0_extension = required;
        self
    }

    pub fn with_empty_files_rejected(mut self, rejected: bool) -> Self {
        self.reject_empty_files = rejected;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    /// Read a program text file and return its contents with metadata.
    /// Checks run cheapest first: path, then size and extension from the
    /// file system, then encoding and line count on the contents.
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let started = Instant::now();
        log_debug!("Starting file processing", "file" => file_path);

        let path = self.resolve_path(file_path)?;
        let mut metadata = self.read_metadata(&path, file_path)?;
        self.check_metadata(&metadata, file_path)?;

        let source = fs::read_to_string(&path).map_err(|e| {
            reject(io_failure(&e, &path, "Failed to read"), "Failed to read file", file_path)
        })?;

        metadata.line_count = source.lines().count();
        if metadata.line_count > MAX_LINE_COUNT {
            return Err(reject(
                FileProcessorError::TooManyLines {
                    lines: metadata.line_count,
                    max_lines: MAX_LINE_COUNT,
                },
                "File exceeds maximum line count",
                file_path,
            ));
        }

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: started.elapsed(),
        };
        self.log_processing_success(&result, file_path);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        if !self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count
            );
            return;
        }

        log_success!(
            codes::success::FILE_PROCESSING_SUCCESS,
            "File processed successfully",
            "file" => file_path,
            "size" => result.metadata.human_readable_size(),
            "lines" => result.metadata.line_count,
            "chars" => result.char_count(),
            "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0),
            "is_large_file" => result.metadata.is_large_file()
        );
    }

    fn resolve_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        let invalid = || FileProcessorError::InvalidPath {
            path: file_path.to_string(),
        };

        if file_path.trim().is_empty() {
            return Err(reject(invalid(), "Empty file path provided", file_path));
        }

        let path = Path::new(file_path);
        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            return Err(reject(error, "File not found", file_path));
        }
        if !path.is_file() {
            return Err(reject(invalid(), "Path is not a file", file_path));
        }

        path.canonicalize().map_err(|e| {
            reject(io_failure(&e, path, "Failed to resolve"), "Failed to canonicalize path", file_path)
        })
    }

    fn read_metadata(&self, path: &Path, file_path: &str) -> Result<FileMetadata, FileProcessorError> {
        let fs_metadata = fs::metadata(path).map_err(|e| {
            reject(
                io_failure(&e, path, "Failed to read metadata for"),
                "Failed to read file metadata",
                file_path,
            )
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        let is_pl0_file = extension.as_deref() == Some(PL0_EXTENSION);

        let metadata = FileMetadata {
            path: path.to_path_buf(),
            size: fs_metadata.len(),
            extension,
            line_count: 0,
            is_pl0_file,
            modified: fs_metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size" => metadata.human_readable_size(),
            "extension" => metadata.extension.as_deref().unwrap_or("none"),
            "is_pl0" => is_pl0_file,
            "max_size_bytes" => MAX_FILE_SIZE
        );

        Ok(metadata)
    }

    fn check_metadata(&self, metadata: &FileMetadata, file_path: &str) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            return Err(reject(error, "File exceeds compile-time maximum size limit", file_path));
        }

        if self.reject_empty_files && metadata.size == 0 {
            let error = FileProcessorError::EmptyFile {
                path: file_path.to_string(),
            };
            return Err(reject(error, "File is empty", file_path));
        }

        if self.require_pl0_extension && !metadata.is_pl0_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            return Err(reject(error, "File does not have required .pl0 extension", file_path));
        }

        Ok(())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
