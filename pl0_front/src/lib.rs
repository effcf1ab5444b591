//! Front end for a small Pascal-like teaching language
//!
//! Source text is scanned by a table-driven lexer into an EOF-terminated
//! [`tokens::TokenStream`], then a symbol-classification state machine
//! relabels the tokens and builds a [`symbols::SymbolTable`] with code and
//! data segment addresses.

pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod symbols;
pub mod tokens;
pub mod utils;

pub use lexical::tokenize;
pub use pipeline::{process_file, process_source, PipelineError, PipelineResult};
pub use symbols::{build_symbol_table, SymbolTable};
pub use tokens::{Token, TokenKind, TokenStream};

pub use pipeline::output::PipelineOutput;
