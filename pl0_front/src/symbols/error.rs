//! Errors raised around symbol classification

use crate::config::compile_time::symbols::MAX_SYMBOL_COUNT;
use crate::logging::codes;

pub type SymbolResult<T> = Result<T, SymbolError>;

/// The classifier itself always completes; only table limits fail
#[derive(Debug, Clone, thiserror::Error)]
pub enum SymbolError {
    #[error("Too many symbols: {count} (max {})", MAX_SYMBOL_COUNT)]
    TooManySymbols { count: usize },
}

impl SymbolError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SymbolError::TooManySymbols { .. } => codes::symbols::SYMBOL_LIMIT_EXCEEDED,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_and_message() {
        let error = SymbolError::TooManySymbols { count: 7 };
        assert_eq!(error.error_code().as_str(), "E030");
        assert!(error.to_string().starts_with("Too many symbols: 7"));
    }
}
