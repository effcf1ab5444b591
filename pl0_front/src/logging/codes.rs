//! Diagnostic codes and their classification metadata
//!
//! Every error, warning and success code emitted by the front end lives here
//! together with its severity, category and recovery behaviour.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Metadata attached to a registered code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("E001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("E002");
    pub const CONFIGURATION_ERROR: Code = Code::new("E003");
}

pub mod file_processing {
    use super::Code;

    pub const INVALID_PATH: Code = Code::new("E010");
    pub const FILE_NOT_FOUND: Code = Code::new("E011");
    pub const PERMISSION_DENIED: Code = Code::new("E012");
    pub const EMPTY_FILE: Code = Code::new("E013");
    pub const FILE_TOO_LARGE: Code = Code::new("E014");
    pub const TOO_MANY_LINES: Code = Code::new("E015");
    pub const INVALID_ENCODING: Code = Code::new("E016");
    pub const INVALID_EXTENSION: Code = Code::new("E017");
    pub const IO_ERROR: Code = Code::new("E018");
}

pub mod lexical {
    use super::Code;

    pub const TOKEN_LIMIT_EXCEEDED: Code = Code::new("E020");
    pub const LEXEME_TOO_LONG: Code = Code::new("E021");
    pub const UNRECOGNIZED_CHARACTER: Code = Code::new("W020");
    pub const UNTERMINATED_COMMENT: Code = Code::new("W021");
}

pub mod symbols {
    use super::Code;

    pub const SYMBOL_LIMIT_EXCEEDED: Code = Code::new("E030");
    pub const DANGLING_CONSTANT: Code = Code::new("W030");
}

pub mod report {
    use super::Code;

    pub const OUTPUT_CREATE_FAILED: Code = Code::new("E040");
    pub const OUTPUT_WRITE_FAILED: Code = Code::new("E041");
    pub const SERIALIZATION_FAILED: Code = Code::new("E042");
}

pub mod success {
    use super::Code;

    pub const PIPELINE_COMPLETE: Code = Code::new("I001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SYMBOL_TABLE_COMPLETE: Code = Code::new("I030");
    pub const REPORT_WRITTEN: Code = Code::new("I040");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

const REGISTERED: &[ErrorMetadata] = &[
    // System
    ErrorMetadata::new(
        "E001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "E002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or runtime initialization failure",
        "Check PL0_* environment variables and restart",
    ),
    ErrorMetadata::new(
        "E003",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix the configuration file syntax or remove the --config option",
    ),
    // File processing
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Source path is empty or malformed",
        "Pass a path to an existing program text file",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Source file not found",
        "Check the file path and working directory",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Permission denied while reading source",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E013",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Source file is empty",
        "Provide a program with at least one token",
    ),
    ErrorMetadata::new(
        "E014",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Source file exceeds the compile-time size limit",
        "Split the program or rebuild with a larger max_file_size",
    ),
    ErrorMetadata::new(
        "E015",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Source file exceeds the compile-time line limit",
        "Split the program or rebuild with a larger max_line_count",
    ),
    ErrorMetadata::new(
        "E016",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "Source file is not valid UTF-8",
        "Re-save the program text as UTF-8",
    ),
    ErrorMetadata::new(
        "E017",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Source file does not have the .pl0 extension",
        "Rename the file or unset PL0_REQUIRE_PL0_EXTENSION",
    ),
    ErrorMetadata::new(
        "E018",
        "FileProcessing",
        Severity::High,
        false,
        true,
        "I/O error while reading source",
        "Retry; check the storage device",
    ),
    // Lexical
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::High,
        false,
        true,
        "Token count exceeds the compile-time limit",
        "Split the program or rebuild with a larger max_token_count",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::Medium,
        false,
        true,
        "Identifier or number exceeds the maximum lexeme length",
        "Shorten the identifier or numeric literal",
    ),
    ErrorMetadata::new(
        "W020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Unrecognized character skipped",
        "Remove the character from the program text",
    ),
    ErrorMetadata::new(
        "W021",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Comment runs to end of input",
        "Close the comment with */",
    ),
    // Symbols
    ErrorMetadata::new(
        "E030",
        "Symbols",
        Severity::High,
        false,
        true,
        "Symbol count exceeds the compile-time limit",
        "Split the program or rebuild with a larger max_symbol_count",
    ),
    ErrorMetadata::new(
        "W030",
        "Symbols",
        Severity::Low,
        true,
        false,
        "Constant declared without a numeric value",
        "Write the constant as NAME = NUMBER",
    ),
    // Report output
    ErrorMetadata::new(
        "E040",
        "Report",
        Severity::High,
        false,
        true,
        "Report file could not be created",
        "Check the output directory exists and is writable",
    ),
    ErrorMetadata::new(
        "E041",
        "Report",
        Severity::High,
        false,
        true,
        "Report file could not be written",
        "Check free disk space",
    ),
    ErrorMetadata::new(
        "E042",
        "Report",
        Severity::Medium,
        false,
        true,
        "Result could not be serialized to JSON",
        "File a bug report",
    ),
];

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTERED
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::CONFIGURATION_ERROR,
            file_processing::INVALID_PATH,
            file_processing::FILE_NOT_FOUND,
            file_processing::PERMISSION_DENIED,
            file_processing::EMPTY_FILE,
            file_processing::FILE_TOO_LARGE,
            file_processing::TOO_MANY_LINES,
            file_processing::INVALID_ENCODING,
            file_processing::INVALID_EXTENSION,
            file_processing::IO_ERROR,
            lexical::TOKEN_LIMIT_EXCEEDED,
            lexical::LEXEME_TOO_LONG,
            lexical::UNRECOGNIZED_CHARACTER,
            lexical::UNTERMINATED_COMMENT,
            symbols::SYMBOL_LIMIT_EXCEEDED,
            symbols::DANGLING_CONSTANT,
            report::OUTPUT_CREATE_FAILED,
            report::OUTPUT_WRITE_FAILED,
            report::SERIALIZATION_FAILED,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "{} missing from registry",
                code
            );
        }
    }

    #[test]
    fn test_registry_codes_are_unique() {
        assert_eq!(get_error_registry().len(), REGISTERED.len());
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
        assert!(is_recoverable("Z999"));
        assert!(!requires_halt("Z999"));
    }

    #[test]
    fn test_skip_warnings_are_recoverable() {
        assert!(is_recoverable(lexical::UNRECOGNIZED_CHARACTER.as_str()));
        assert!(!requires_halt(lexical::UNRECOGNIZED_CHARACTER.as_str()));
        assert_eq!(get_category(lexical::UNRECOGNIZED_CHARACTER.as_str()), "Lexical");
    }
}
