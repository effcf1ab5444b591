//! Output sinks: token report, symbol table report and JSON

pub mod format;

use crate::logging::codes;
use crate::symbols::SymbolTable;
use crate::tokens::TokenStream;
use crate::{log_error, log_success};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub use format::{render_symbol_report, render_token_report};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Cannot create {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ReportError::CreateFailed { .. } => codes::report::OUTPUT_CREATE_FAILED,
            ReportError::WriteFailed { .. } => codes::report::OUTPUT_WRITE_FAILED,
            ReportError::Serialization(_) => codes::report::SERIALIZATION_FAILED,
        }
    }
}

/// Create `path` and write `contents` to it
fn write_output(path: &Path, contents: &str, kind: &str) -> Result<(), ReportError> {
    let result = File::create(path)
        .map_err(|source| ReportError::CreateFailed {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|mut file| {
            file.write_all(contents.as_bytes())
                .and_then(|_| file.flush())
                .map_err(|source| ReportError::WriteFailed {
                    path: path.to_path_buf(),
                    source,
                })
        });

    match &result {
        Ok(()) => log_success!(
            codes::success::REPORT_WRITTEN,
            "Report written",
            "report" => kind,
            "path" => path.display(),
            "bytes" => contents.len()
        ),
        Err(error) => log_error!(error.error_code(), "Report could not be written",
            "report" => kind,
            "path" => path.display(),
            "error" => error
        ),
    }

    result
}

pub fn write_token_report(path: &Path, tokens: &TokenStream) -> Result<(), ReportError> {
    write_output(path, &render_token_report(tokens), "tokens")
}

pub fn write_symbol_report(path: &Path, table: &SymbolTable) -> Result<(), ReportError> {
    write_output(path, &render_symbol_report(table), "symbols")
}

/// Pretty-printed JSON of any serializable result
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        let error = ReportError::from(e);
        log_error!(error.error_code(), "Serialization failed", "error" => error);
        error
    })?;
    write_output(path, &json, "json")
}
