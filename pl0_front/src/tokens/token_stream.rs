//! Ordered token sequence produced by the scanner

use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Span, Spanned};
use serde::Serialize;

pub type SpannedToken = Spanned<Token>;

/// All tokens of one source, ending with exactly one end-of-input token
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
}

impl TokenStream {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SpannedToken> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpannedToken> {
        self.tokens.iter()
    }

    /// Mutable access for the symbol pass, which rewrites classifications
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SpannedToken> {
        self.tokens.iter_mut()
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    pub fn has_eof(&self) -> bool {
        self.tokens.last().map(|t| t.value.is_eof()).unwrap_or(false)
    }

    pub fn count_of(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|t| t.value.kind == kind).count()
    }

    /// `(kind, lexeme)` pairs, convenient for comparisons
    pub fn kinds_and_lexemes(&self) -> Vec<(TokenKind, &str)> {
        self.tokens
            .iter()
            .map(|t| (t.value.kind, t.value.lexeme.as_str()))
            .collect()
    }

    /// Span of the first token with the given lexeme
    pub fn span_of(&self, lexeme: &str) -> Option<Span> {
        self.tokens
            .iter()
            .find(|t| t.value.lexeme == lexeme)
            .map(|t| t.span)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a SpannedToken;
    type IntoIter = std::slice::Iter<'a, SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanned(kind: TokenKind, lexeme: &str) -> SpannedToken {
        Spanned::new(Token::new(kind, lexeme), Span::dummy())
    }

    #[test]
    fn test_stream_queries() {
        let stream = TokenStream::new(vec![
            spanned(TokenKind::Var, "var"),
            spanned(TokenKind::Identifier, "x"),
            spanned(TokenKind::Semicolon, ";"),
            Spanned::new(Token::end_of_input(), Span::dummy()),
        ]);

        assert_eq!(stream.len(), 4);
        assert!(stream.has_eof());
        assert_eq!(stream.count_of(TokenKind::Identifier), 1);
        assert_eq!(stream.kinds_and_lexemes()[1], (TokenKind::Identifier, "x"));
    }

    #[test]
    fn test_empty_stream_has_no_eof() {
        assert!(!TokenStream::default().has_eof());
    }
}
