//! Shared primitive types used across the lexer, symbol classifier and logging.

pub mod span;

pub use span::{Position, Span, Spanned};
