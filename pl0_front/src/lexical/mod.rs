//! Lexical analysis: a table-driven DFA over classified characters
//!
//! [`source::CharacterSource`] feeds characters with one step of pushback,
//! [`classifier::classify`] maps them to table columns, and
//! [`machine::LexicalStateMachine`] walks [`states::TRANSITIONS`] with
//! maximal munch. [`LexicalAnalyzer`] adds compile-time limits, metrics and
//! logging for pipeline use.

pub mod analyzer;
pub mod classifier;
pub mod machine;
pub mod source;
pub mod states;

use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};
pub use classifier::{classify, CharacterClass};
pub use machine::{tokenize, LexicalStateMachine, ScanMetrics, SkippedCharacter};
pub use source::CharacterSource;
pub use states::LexState;

/// Tokenize a processed file with default preferences
pub fn tokenize_file_result(
    file_result: &FileProcessingResult,
) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize_file_result(file_result)
}

pub fn tokenize_file_result_with_preferences(
    file_result: &FileProcessingResult,
    preferences: LexicalPreferences,
) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize_file_result(file_result)
}
