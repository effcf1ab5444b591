//! Analyzer wrapper around the scanner: limits, metrics and logging

use super::machine::{LexicalStateMachine, ScanMetrics};
use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{SpannedToken, TokenClass, TokenStream};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;
use std::collections::BTreeMap;

/// Limits enforced on top of the scanner, which itself never fails
#[derive(Debug, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Too many tokens: {count} exceeds the limit of {}", MAX_TOKEN_COUNT)]
    TooManyTokens { count: usize },

    #[error("Lexeme too long at {span}: {length} characters (max {})", MAX_LEXEME_LENGTH)]
    LexemeTooLong { length: usize, span: Span },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::TooManyTokens { .. } => codes::lexical::TOKEN_LIMIT_EXCEEDED,
            LexerError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub number_tokens: usize,
    pub operator_tokens: usize,
    pub delimiter_tokens: usize,
    pub comment_count: usize,
    pub skipped_characters: usize,
    pub unterminated_comment: bool,
    pub max_lexeme_length: usize,

    /// Per-label counts, only filled when detailed metrics are enabled
    pub label_counts: BTreeMap<&'static str, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &SpannedToken, preferences: &LexicalPreferences) {
        let token = &token.value;
        self.total_tokens += 1;
        self.max_lexeme_length = self.max_lexeme_length.max(token.lexeme.len());

        match token.kind.class() {
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::Identifier => self.identifier_tokens += 1,
            TokenClass::Literal => self.number_tokens += 1,
            TokenClass::Operator => self.operator_tokens += 1,
            TokenClass::Delimiter => self.delimiter_tokens += 1,
            TokenClass::EndOfInput => {}
        }

        if preferences.collect_detailed_metrics {
            *self.label_counts.entry(token.kind.label()).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_scan(&mut self, scan: &ScanMetrics) {
        self.comment_count = scan.comments;
        self.skipped_characters = scan.skipped.len();
        self.unterminated_comment = scan.unterminated_comment.is_some();
    }
}

pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        log_debug!("Starting lexical analysis",
            "file" => file_result.metadata.path.display(),
            "line_count" => file_result.metadata.line_count,
            "file_size_bytes" => file_result.metadata.size
        );
        self.tokenize(&file_result.source)
    }

    /// Scan `source` to an EOF-terminated stream, enforcing token limits
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        let mut machine = LexicalStateMachine::new(source);
        let mut tokens = Vec::new();

        for token in machine.by_ref() {
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = token.span,
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let length = token.value.lexeme.chars().count();
            if !token.value.is_eof() && length > MAX_LEXEME_LENGTH {
                let error = LexerError::LexemeTooLong {
                    length,
                    span: token.span,
                };
                log_error!(error.error_code(), "Lexeme exceeds maximum length",
                    span = token.span,
                    "length" => length,
                    "limit" => MAX_LEXEME_LENGTH
                );
                return Err(error);
            }

            self.metrics.record_token(&token, &self.preferences);
            tokens.push(token);
        }

        let scan = machine.into_metrics();
        self.metrics.record_scan(&scan);
        self.report_scan_diagnostics(&scan);

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "tokens" => self.metrics.total_tokens,
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "numbers" => self.metrics.number_tokens,
            "operators" => self.metrics.operator_tokens,
            "comments" => self.metrics.comment_count,
            "skipped" => self.metrics.skipped_characters
        );

        Ok(TokenStream::new(tokens))
    }

    fn report_scan_diagnostics(&self, scan: &ScanMetrics) {
        if self.preferences.log_skipped_characters {
            for skipped in &scan.skipped {
                log_warning!(
                    code = codes::lexical::UNRECOGNIZED_CHARACTER,
                    "Unrecognized character skipped",
                    span = skipped.span,
                    "character" => format!("{:?}", skipped.character)
                );
            }
        }

        if let Some(start) = scan.unterminated_comment {
            log_warning!(
                code = codes::lexical::UNTERMINATED_COMMENT,
                "Comment runs to end of input",
                span = Span::empty_at(start),
                "line" => start.line
            );
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
