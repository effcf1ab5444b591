//! Reserved words and case-insensitive keyword resolution
use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Class,
    Const,
    Var,
    Procedure,
    Call,
    If,
    Then,
    While,
    Do,
    Odd,
}

const ALL_KEYWORDS: [Keyword; 10] = [
    Keyword::Class,
    Keyword::Const,
    Keyword::Var,
    Keyword::Procedure,
    Keyword::Call,
    Keyword::If,
    Keyword::Then,
    Keyword::While,
    Keyword::Do,
    Keyword::Odd,
];

impl Keyword {
    /// Canonical lowercase spelling
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Var => "var",
            Keyword::Procedure => "procedure",
            Keyword::Call => "call",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::Odd => "odd",
        }
    }

    /// Case-insensitive lookup: `ProCedure` and `PROCEDURE` both match
    pub fn from_str(word: &str) -> Option<Self> {
        ALL_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| keyword.as_str().eq_ignore_ascii_case(word))
    }

    pub const fn token_kind(self) -> TokenKind {
        match self {
            Keyword::Class => TokenKind::Class,
            Keyword::Const => TokenKind::Const,
            Keyword::Var => TokenKind::Var,
            Keyword::Procedure => TokenKind::Procedure,
            Keyword::Call => TokenKind::Call,
            Keyword::If => TokenKind::If,
            Keyword::Then => TokenKind::Then,
            Keyword::While => TokenKind::While,
            Keyword::Do => TokenKind::Do,
            Keyword::Odd => TokenKind::Odd,
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind for a scanned identifier lexeme: the reserved word's kind if the
/// lexeme spells one in any case, otherwise `Identifier`
pub fn resolve_identifier(lexeme: &str) -> TokenKind {
    Keyword::from_str(lexeme)
        .map(Keyword::token_kind)
        .unwrap_or(TokenKind::Identifier)
}
