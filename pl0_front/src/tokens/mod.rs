//! Token model for the scanner
//!
//! A [`Token`] carries its [`TokenKind`], the lexeme exactly as written, and a
//! classification label. The label starts as the kind's fixed report label
//! and is rewritten once by the symbol pass for identifiers and numbers.
//! [`TokenStream`] holds the complete, EOF-terminated output of one scan.

pub mod token;
pub mod token_stream;

pub use token::{Classification, Token, TokenClass, TokenKind};
pub use token_stream::{SpannedToken, TokenStream};

pub use crate::utils::{Position, Span, Spanned};
