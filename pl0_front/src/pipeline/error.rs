use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::report::ReportError;
use crate::symbols::SymbolError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Symbol classification failed: {0}")]
    SymbolClassification(#[from] SymbolError),

    #[error("Report output failed: {0}")]
    Report(#[from] ReportError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::SymbolClassification(e) => e.error_code(),
            PipelineError::Report(e) => e.error_code(),
            PipelineError::Pipeline { .. } => crate::logging::codes::system::INTERNAL_ERROR,
        }
    }

    /// Name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::FileProcessing(_) => "file processing",
            PipelineError::LexicalAnalysis(_) => "lexical analysis",
            PipelineError::SymbolClassification(_) => "symbol classification",
            PipelineError::Report(_) => "report output",
            PipelineError::Pipeline { .. } => "pipeline",
        }
    }
}
