//! Symbol classification and the symbol table
//!
//! [`SymbolClassificationStateMachine`] walks a finished token stream,
//! relabels identifiers and numbers, and fills a [`SymbolTable`] with
//! per-segment addresses. `build_symbol_table` adds the compile-time symbol
//! limit and stage logging on top.

use crate::config::compile_time::symbols::MAX_SYMBOL_COUNT;
use crate::config::runtime::SymbolPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_debug, log_error, log_success};

pub mod classifier;
pub mod error;
pub mod table;

pub use classifier::{
    ActionColumn, SymbolAction, SymbolClassState, SymbolClassificationStateMachine,
    MAX_TEMPORARIES,
};
pub use error::{SymbolError, SymbolResult};
pub use table::{Segment, SymbolEntry, SymbolKind, SymbolTable, ADDRESS_STEP, UNKNOWN_VALUE};

/// Classify `tokens` with default preferences
pub fn build_symbol_table(tokens: &mut TokenStream) -> SymbolResult<SymbolTable> {
    build_symbol_table_with_preferences(tokens, SymbolPreferences::default())
}

pub fn build_symbol_table_with_preferences(
    tokens: &mut TokenStream,
    preferences: SymbolPreferences,
) -> SymbolResult<SymbolTable> {
    log_debug!("Starting symbol classification",
        "tokens" => tokens.len(),
        "log_registrations" => preferences.log_registrations
    );

    let mut machine = SymbolClassificationStateMachine::with_preferences(preferences);
    let table = machine.classify(tokens);

    if table.len() > MAX_SYMBOL_COUNT {
        let error = SymbolError::TooManySymbols { count: table.len() };
        log_error!(error.error_code(), "Symbol limit exceeded",
            "symbols" => table.len(),
            "limit" => MAX_SYMBOL_COUNT
        );
        return Err(error);
    }

    log_success!(
        codes::success::SYMBOL_TABLE_COMPLETE,
        "Symbol table built",
        "symbols" => table.len(),
        "code_segment" => table.in_segment(Segment::Code).count(),
        "data_segment" => table.in_segment(Segment::Data).count(),
        "max_operators_per_statement" => machine.max_operators(),
        "temporaries" => machine.max_operators().min(MAX_TEMPORARIES)
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;

    #[test]
    fn test_build_symbol_table() {
        let (mut stream, _) = tokenize("class X; var a; a := a * 2.");
        let table = build_symbol_table_with_preferences(
            &mut stream,
            SymbolPreferences {
                log_registrations: true,
            },
        )
        .unwrap();

        let names: Vec<&str> = table.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["X", "a", "2", "Temp1"]);
        assert_eq!(table.next_code_address(), ADDRESS_STEP);
        assert_eq!(table.next_data_address(), 3 * ADDRESS_STEP);
    }

    #[test]
    fn test_empty_stream_gives_empty_table() {
        let (mut stream, _) = tokenize("");
        let table = build_symbol_table(&mut stream).unwrap();
        assert!(table.is_empty());
    }
}
