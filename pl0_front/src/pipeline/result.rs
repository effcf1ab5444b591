use super::output::PipelineOutput;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::symbols::{Segment, SymbolTable};
use crate::tokens::TokenStream;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub file_processing: Duration,
    pub lexical_analysis: Duration,
    pub symbol_classification: Duration,
    pub total: Duration,
}

/// Everything one run produced: classified tokens and the symbol table
#[derive(Debug)]
pub struct PipelineResult {
    /// Display name of the input, a path or `<memory>`
    pub source_name: String,
    /// Present when the text came from a file
    pub file_metadata: Option<FileMetadata>,
    pub tokens: TokenStream,
    pub symbols: SymbolTable,
    pub lexical_metrics: LexicalMetrics,
    pub timings: StageTimings,
}

impl PipelineResult {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn output(&self) -> PipelineOutput<'_> {
        PipelineOutput {
            source: self.source_name.clone(),
            tokens: &self.tokens,
            symbols: &self.symbols,
            lexical_metrics: &self.lexical_metrics,
        }
    }

    pub fn log_success(&self) {
        let total_secs = self.timings.total.as_secs_f64();
        crate::log_success!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Front end pipeline succeeded",
            "source" => self.source_name.as_str(),
            "tokens" => self.token_count(),
            "symbols" => self.symbol_count(),
            "code_segment_bytes" => self.symbols.next_code_address(),
            "data_segment_bytes" => self.symbols.next_data_address(),
            "skipped_characters" => self.lexical_metrics.skipped_characters,
            "duration_ms" => format!("{:.2}", total_secs * 1000.0),
            "tokens_per_sec" => format!("{:.0}", self.token_count() as f64 / total_secs.max(f64::EPSILON))
        );
    }

    /// One-line human summary for the command line
    pub fn summary(&self) -> String {
        format!(
            "{}: {} tokens, {} symbols ({} CS, {} DS), {} skipped characters",
            self.source_name,
            self.token_count(),
            self.symbol_count(),
            self.symbols.in_segment(Segment::Code).count(),
            self.symbols.in_segment(Segment::Data).count(),
            self.lexical_metrics.skipped_characters
        )
    }
}
