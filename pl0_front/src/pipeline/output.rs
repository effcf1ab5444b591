use crate::lexical::LexicalMetrics;
use crate::symbols::SymbolTable;
use crate::tokens::TokenStream;
use serde::Serialize;

/// Serializable view of a finished run, used for `--json`
#[derive(Debug, Serialize)]
pub struct PipelineOutput<'a> {
    pub source: String,
    pub tokens: &'a TokenStream,
    pub symbols: &'a SymbolTable,
    pub lexical_metrics: &'a LexicalMetrics,
}
