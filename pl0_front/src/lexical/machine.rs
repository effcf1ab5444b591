//! Table-driven maximal-munch scanner
//!
//! Each call to [`LexicalStateMachine::next_token`] starts in
//! [`LexState::Start`] and follows [`TRANSITIONS`](super::states::TRANSITIONS)
//! until no move exists. The longest accepted prefix wins; the one character
//! read past it is pushed back. Characters no token can start with are
//! recorded and skipped, so the scanner itself never fails.

use super::classifier::classify;
use super::source::CharacterSource;
use super::states::LexState;
use crate::grammar::keywords::resolve_identifier;
use crate::tokens::{SpannedToken, Token, TokenKind, TokenStream};
use crate::utils::{Position, Span, Spanned};
use serde::Serialize;

/// A character that could not begin any token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCharacter {
    pub character: char,
    pub span: Span,
}

/// What the scanner saw besides tokens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanMetrics {
    pub skipped: Vec<SkippedCharacter>,
    pub comments: usize,
    /// Where a `/*` with no closing `*/` began
    pub unterminated_comment: Option<Position>,
}

/// Longest accepted prefix seen so far in the current attempt
#[derive(Debug, Clone, Copy)]
struct Accepted {
    kind: TokenKind,
    len: usize,
    end: Position,
}

pub struct LexicalStateMachine<'a> {
    source: CharacterSource<'a>,
    lexeme: String,
    token_start: Position,
    comment_start: Option<Position>,
    finished: bool,
    metrics: ScanMetrics,
}

impl<'a> LexicalStateMachine<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            source: CharacterSource::new(text),
            lexeme: String::new(),
            token_start: Position::start(),
            comment_start: None,
            finished: false,
            metrics: ScanMetrics::default(),
        }
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn into_metrics(self) -> ScanMetrics {
        self.metrics
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an end-of-input token.
    pub fn next_token(&mut self) -> SpannedToken {
        if self.finished {
            return self.end_of_input();
        }

        let mut state = LexState::Start;
        let mut best: Option<Accepted> = None;
        self.lexeme.clear();

        loop {
            let before = self.source.position();
            let ch = self.source.next();
            let class = classify(ch);

            match (state.transition(class), ch) {
                (Some(next), Some(_)) if next.is_skip() => {
                    if state == LexState::Slash && next == LexState::Comment {
                        self.metrics.comments += 1;
                        self.comment_start = Some(self.token_start);
                    }
                    if next == LexState::Start {
                        self.comment_start = None;
                    }
                    self.lexeme.clear();
                    best = None;
                    state = next;
                }
                (Some(next), Some(c)) => {
                    if self.lexeme.is_empty() {
                        self.token_start = before;
                    }
                    self.lexeme.push(c);
                    state = next;

                    if let Some(kind) = next.accepting_kind() {
                        best = Some(Accepted {
                            kind,
                            len: self.lexeme.len(),
                            end: self.source.position(),
                        });
                        if next.is_immediate() {
                            return self.emit(kind, self.lexeme.len(), self.source.position());
                        }
                    }
                }
                // End of input never has a transition, so this is a rejection
                _ => {
                    let retract = !(ch.is_none() || (state == LexState::Start && best.is_none()));

                    if let Some(accepted) = best {
                        // Only one character past the accepted prefix is ever read
                        if retract {
                            self.source.retract(ch);
                        }
                        return self.emit(accepted.kind, accepted.len, accepted.end);
                    }

                    if ch.is_none() {
                        if matches!(state, LexState::Comment | LexState::CommentStar) {
                            self.metrics.unterminated_comment = self.comment_start;
                        } else {
                            // A trailing `:` or `!` with nothing after it
                            self.skip_attempt(None, before);
                        }
                        self.finished = true;
                        return self.end_of_input();
                    }

                    if retract {
                        self.source.retract(ch);
                    }
                    self.skip_attempt(ch, before);
                    state = LexState::Start;
                    self.lexeme.clear();
                }
            }
        }
    }

    /// Record the first character of a failed attempt and resynchronise
    fn skip_attempt(&mut self, failed: Option<char>, failed_at: Position) {
        let (character, start) = match (self.lexeme.chars().next(), failed) {
            (Some(first), _) => (first, self.token_start),
            (None, Some(c)) => (c, failed_at),
            (None, None) => return,
        };
        let end = start.advance(character);
        self.metrics.skipped.push(SkippedCharacter {
            character,
            span: Span::new(start, end),
        });
    }

    fn emit(&mut self, kind: TokenKind, len: usize, end: Position) -> SpannedToken {
        self.lexeme.truncate(len);
        let kind = if kind == TokenKind::Identifier {
            resolve_identifier(&self.lexeme)
        } else {
            kind
        };
        let token = Token::new(kind, std::mem::take(&mut self.lexeme));
        Spanned::new(token, Span::new(self.token_start, end))
    }

    fn end_of_input(&self) -> SpannedToken {
        Spanned::new(
            Token::end_of_input(),
            Span::empty_at(self.source.position()),
        )
    }
}

impl Iterator for LexicalStateMachine<'_> {
    type Item = SpannedToken;

    /// Yields every token, then the end-of-input token once
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        Some(self.next_token())
    }
}

/// Scan `text` to completion
pub fn tokenize(text: &str) -> (TokenStream, ScanMetrics) {
    let mut machine = LexicalStateMachine::new(text);
    let tokens: Vec<SpannedToken> = machine.by_ref().collect();
    (TokenStream::new(tokens), machine.into_metrics())
}
