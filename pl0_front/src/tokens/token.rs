//! Token kinds, display labels and the classified token record

use crate::symbols::SymbolKind;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Every token the scanner can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Identifier,
    Number,

    // === RESERVED WORDS ===
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

    // === ARITHMETIC ===
    Plus,
    Minus,
    Star,
    Slash,

    // === DELIMITERS ===
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Dot,

    // === ASSIGNMENT AND RELATIONS ===
    /// `:=`
    Assign,
    /// `=`, used both in const declarations and as assignment
    AssignEquals,
    /// `==`
    Equals,
    Less,
    LessEqual,
    /// `<>` or `!=`
    NotEqual,
    Greater,
    GreaterEqual,

    EndOfInput,
}

/// Coarse grouping used by metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Keyword,
    Identifier,
    Literal,
    Operator,
    Delimiter,
    EndOfInput,
}

impl TokenKind {
    /// Fixed label written to the token report
    pub const fn label(self) -> &'static str {
        match self {
            TokenKind::Identifier => "var",
            TokenKind::Number => "Numeric literal",
            TokenKind::Class => "$class",
            TokenKind::Const => "$Const",
            TokenKind::Var => "$VARDeclaration",
            TokenKind::Procedure => "$procedure",
            TokenKind::Call => "$call",
            TokenKind::If => "$if",
            TokenKind::Then => "$then",
            TokenKind::While => "$while",
            TokenKind::Do => "$do",
            TokenKind::Odd => "$odd",
            TokenKind::Plus | TokenKind::Minus => "$addop",
            TokenKind::Star | TokenKind::Slash => "$mop",
            TokenKind::LeftParen => "$LP",
            TokenKind::RightParen => "$RP",
            TokenKind::LeftBrace => "$LB",
            TokenKind::RightBrace => "$RB",
            TokenKind::Comma => "$comma",
            TokenKind::Semicolon => "$semi",
            TokenKind::Dot => "$dot",
            TokenKind::Assign | TokenKind::AssignEquals => "$=",
            TokenKind::Equals
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::NotEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => "$relop",
            TokenKind::EndOfInput => "$eof",
        }
    }

    pub const fn class(self) -> TokenClass {
        match self {
            TokenKind::Identifier => TokenClass::Identifier,
            TokenKind::Number => TokenClass::Literal,
            TokenKind::Class
            | TokenKind::Const
            | TokenKind::Var
            | TokenKind::Procedure
            | TokenKind::Call
            | TokenKind::If
            | TokenKind::Then
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::Odd => TokenClass::Keyword,
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Assign
            | TokenKind::AssignEquals
            | TokenKind::Equals
            | TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::NotEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => TokenClass::Operator,
            TokenKind::LeftParen
            | TokenKind::RightParen
            | TokenKind::LeftBrace
            | TokenKind::RightBrace
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Dot => TokenClass::Delimiter,
            TokenKind::EndOfInput => TokenClass::EndOfInput,
        }
    }

    pub const fn is_keyword(self) -> bool {
        matches!(self.class(), TokenClass::Keyword)
    }

    /// `+ - * /`, each of which may need a temporary
    pub const fn is_arithmetic_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash
        )
    }

    /// Tokens that close a statement or clause for temporary counting
    pub const fn is_statement_terminator(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::RightBrace
                | TokenKind::Then
                | TokenKind::Do
                | TokenKind::EndOfInput
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Report label of a token: its kind's label until the symbol pass assigns one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Kind(TokenKind),
    Symbol(SymbolKind),
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Kind(kind) => kind.label(),
            Classification::Symbol(kind) => kind.label(),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text exactly as written
    pub lexeme: String,
    pub classification: Classification,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            classification: Classification::Kind(kind),
        }
    }

    pub fn end_of_input() -> Self {
        Self::new(TokenKind::EndOfInput, "EOF")
    }

    /// Overwrite the report label with a symbol-table classification
    pub fn reclassify(&mut self, kind: SymbolKind) {
        self.classification = Classification::Symbol(kind);
    }

    pub fn label(&self) -> &'static str {
        self.classification.label()
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.lexeme, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_for_operator_groups() {
        assert_eq!(TokenKind::Plus.label(), "$addop");
        assert_eq!(TokenKind::Minus.label(), "$addop");
        assert_eq!(TokenKind::Star.label(), "$mop");
        assert_eq!(TokenKind::Slash.label(), "$mop");
        assert_eq!(TokenKind::Assign.label(), "$=");
        assert_eq!(TokenKind::AssignEquals.label(), "$=");
        assert_eq!(TokenKind::NotEqual.label(), "$relop");
        assert_eq!(TokenKind::EndOfInput.label(), "$eof");
    }

    #[test]
    fn test_terminators_and_operators() {
        assert!(TokenKind::Then.is_statement_terminator());
        assert!(TokenKind::EndOfInput.is_statement_terminator());
        assert!(!TokenKind::Comma.is_statement_terminator());
        assert!(TokenKind::Slash.is_arithmetic_operator());
        assert!(!TokenKind::Equals.is_arithmetic_operator());
        assert!(TokenKind::Odd.is_keyword());
    }

    #[test]
    fn test_reclassify_changes_label_only() {
        let mut token = Token::new(TokenKind::Identifier, "X");
        assert_eq!(token.label(), "var");

        token.reclassify(SymbolKind::ProgramName);
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.label(), "$program name");
    }

    #[test]
    fn test_token_serializes_label() {
        let token = Token::new(TokenKind::Number, "5");
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["kind"], "Number");
        assert_eq!(json["lexeme"], "5");
        assert_eq!(json["classification"], "Numeric literal");
    }
}
