//! Reserved words of the language

pub mod keywords;

pub use keywords::{resolve_identifier, Keyword};
