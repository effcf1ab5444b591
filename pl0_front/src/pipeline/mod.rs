//! Three-stage front end: file processing, lexical analysis, symbol
//! classification
//!
//! Every entry point runs inside a file context so diagnostics from all
//! stages are grouped per source in the global collector.

mod error;
mod info;
pub mod output;
mod result;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::PipelineOutput;
pub use result::{PipelineResult, StageTimings};
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::report;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Name used for text that did not come from a file
pub const MEMORY_SOURCE: &str = "<memory>";

/// Process a file with environment-derived preferences
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting front end pipeline", "file" => file_path);

        let stage_start = Instant::now();
        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;
        let file_processing = stage_start.elapsed();

        let mut result = run_stages(file_path, &file_result.source, config)?;
        result.file_metadata = Some(file_result.metadata);
        result.timings.file_processing = file_processing;
        result.timings.total = start_time.elapsed();

        result.log_success();
        Ok(result)
    })
}

/// Run the lexer and classifier over in-memory text
pub fn process_source(text: &str) -> Result<PipelineResult, PipelineError> {
    process_source_with_config(text, &RuntimeConfig::default())
}

pub fn process_source_with_config(
    text: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(MEMORY_SOURCE), 0, || {
        crate::log_info!("Starting front end pipeline", "source" => MEMORY_SOURCE,
            "chars" => text.chars().count()
        );

        let mut result = run_stages(MEMORY_SOURCE, text, config)?;
        result.timings.total = start_time.elapsed();

        result.log_success();
        Ok(result)
    })
}

fn run_stages(
    source_name: &str,
    text: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let mut timings = StageTimings::default();

    let stage_start = Instant::now();
    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
    let mut tokens = analyzer.tokenize(text)?;
    timings.lexical_analysis = stage_start.elapsed();

    let stage_start = Instant::now();
    let symbols =
        crate::symbols::build_symbol_table_with_preferences(&mut tokens, config.symbols.clone())?;
    timings.symbol_classification = stage_start.elapsed();

    Ok(PipelineResult {
        source_name: source_name.to_string(),
        file_metadata: None,
        tokens,
        symbols,
        lexical_metrics: analyzer.metrics().clone(),
        timings,
    })
}

/// Write the token and symbol reports for a finished run
pub fn write_reports(
    result: &PipelineResult,
    tokens_path: &Path,
    symbols_path: &Path,
) -> Result<(), PipelineError> {
    report::write_token_report(tokens_path, &result.tokens)?;
    report::write_symbol_report(symbols_path, &result.symbols)?;
    Ok(())
}

/// Write the combined JSON view of a run
pub fn write_json_output(result: &PipelineResult, path: &Path) -> Result<(), PipelineError> {
    report::write_json(path, &result.output())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Segment, SymbolKind};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    const SAMPLE: &str = "class X;\nvar a, b;\nconst c = 5;\nbegin a := b + c end.\n";

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_process_source_end_to_end() {
        let result = process_source(SAMPLE).unwrap();

        assert_eq!(
            result.tokens.kinds_and_lexemes(),
            vec![
                (TokenKind::Class, "class"),
                (TokenKind::Identifier, "X"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Var, "var"),
                (TokenKind::Identifier, "a"),
                (TokenKind::Comma, ","),
                (TokenKind::Identifier, "b"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Const, "const"),
                (TokenKind::Identifier, "c"),
                (TokenKind::AssignEquals, "="),
                (TokenKind::Number, "5"),
                (TokenKind::Semicolon, ";"),
                (TokenKind::Identifier, "begin"),
                (TokenKind::Identifier, "a"),
                (TokenKind::Assign, ":="),
                (TokenKind::Identifier, "b"),
                (TokenKind::Plus, "+"),
                (TokenKind::Identifier, "c"),
                (TokenKind::Identifier, "end"),
                (TokenKind::Dot, "."),
                (TokenKind::EndOfInput, "EOF"),
            ]
        );
        assert!(result.file_metadata.is_none());
        assert_eq!(result.source_name, MEMORY_SOURCE);

        let rows: Vec<(&str, SymbolKind, u32, Segment)> = result
            .symbols
            .iter()
            .map(|e| (e.name.as_str(), e.kind, e.address, e.segment))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("X", SymbolKind::ProgramName, 0, Segment::Code),
                ("a", SymbolKind::Variable, 0, Segment::Data),
                ("b", SymbolKind::Variable, 2, Segment::Data),
                ("c", SymbolKind::Constant, 4, Segment::Data),
                ("Temp1", SymbolKind::Variable, 6, Segment::Data),
            ]
        );
        assert_eq!(result.symbols.lookup("c").map(|e| e.value.as_str()), Some("5"));
        assert!(result.summary().contains("5 symbols"));
    }

    #[test]
    fn test_process_file_end_to_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Program_Text.txt");
        fs::write(&path, SAMPLE).unwrap();

        let result = process_file(path.to_str().unwrap()).unwrap();
        let metadata = result.file_metadata.as_ref().unwrap();
        assert_eq!(metadata.line_count, 4);
        assert_eq!(result.tokens.count_of(TokenKind::Class), 1);
        assert_eq!(result.symbol_count(), 5);

        let tokens_path = dir.path().join("tokens.txt");
        let symbols_path = dir.path().join("symbol_table.txt");
        write_reports(&result, &tokens_path, &symbols_path).unwrap();
        assert!(fs::read_to_string(&symbols_path).unwrap().contains("Temp1"));

        let json_path = dir.path().join("out.json");
        write_json_output(&result, &json_path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["symbols"]["entries"][0]["name"], "X");
    }

    #[test]
    fn test_missing_file_is_file_processing_error() {
        let error = process_file("/definitely/not/here/Program_Text.txt").unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
        assert_eq!(error.stage(), "file processing");
        assert_eq!(error.error_code().as_str(), "E011");
    }

    #[test]
    fn test_empty_file_yields_eof_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Program_Text.txt");
        fs::write(&path, "").unwrap();

        let result = process_file(path.to_str().unwrap()).unwrap();
        assert_eq!(
            result.tokens.kinds_and_lexemes(),
            vec![(TokenKind::EndOfInput, "EOF")]
        );
        assert!(result.symbols.is_empty());

        let tokens_path = dir.path().join("tokens.txt");
        let symbols_path = dir.path().join("symbol_table.txt");
        write_reports(&result, &tokens_path, &symbols_path).unwrap();
        let token_report = fs::read_to_string(&tokens_path).unwrap();
        assert_eq!(
            token_report.lines().last(),
            Some(format!("{:<24} {}", "EOF", "$eof").as_str())
        );
        assert_eq!(fs::read_to_string(&symbols_path).unwrap().lines().count(), 4);
    }

    #[test]
    fn test_empty_file_rejected_when_configured() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let mut config = RuntimeConfig::default();
        config.file_processor.reject_empty_files = true;
        let error = process_file_with_config(path.to_str().unwrap(), &config).unwrap_err();
        assert_matches!(error, PipelineError::FileProcessing(_));
        assert_eq!(error.error_code().as_str(), "E013");
    }

    #[test]
    fn test_report_error_propagates() {
        let dir = tempdir().unwrap();
        let result = process_source("var x.").unwrap();
        let missing = dir.path().join("missing");

        let error = write_reports(
            &result,
            &missing.join("tokens.txt"),
            &missing.join("symbol_table.txt"),
        )
        .unwrap_err();
        assert_matches!(error, PipelineError::Report(_));
        assert_eq!(error.stage(), "report output");
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert_eq!(error.error_code().as_str(), "E001");
    }
}
