use crate::config::build_info;
use crate::config::compile_time::{file_processing, lexical, symbols};

/// Stages and compile-time limits of this build
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub build_profile: &'static str,
    pub max_file_size: u64,
    pub max_line_count: usize,
    pub max_token_count: usize,
    pub max_lexeme_length: usize,
    pub max_symbol_count: usize,
    pub global_logging_enabled: bool,
    pub cargo_style_output: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "PL/0 Front End Pipeline:\n\
             - Pipeline Stages: {} (file processing, lexical analysis, symbol classification)\n\
             - Build Profile: {}\n\
             - Max File Size: {} KB\n\
             - Max Line Count: {}\n\
             - Max Token Count: {}\n\
             - Max Lexeme Length: {}\n\
             - Max Symbol Count: {}\n\
             - Global Logging: {}\n\
             - Cargo-style Output: {}",
            self.pipeline_stages,
            self.build_profile,
            self.max_file_size / 1024,
            self.max_line_count,
            self.max_token_count,
            self.max_lexeme_length,
            self.max_symbol_count,
            self.global_logging_enabled,
            self.cargo_style_output
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage PL/0 front end ({} profile) with up to {} tokens and {} symbols",
            self.pipeline_stages, self.build_profile, self.max_token_count, self.max_symbol_count
        )
    }
}

pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        pipeline_stages: 3,
        build_profile: build_info::profile(),
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_line_count: file_processing::MAX_LINE_COUNT,
        max_token_count: lexical::MAX_TOKEN_COUNT,
        max_lexeme_length: lexical::MAX_LEXEME_LENGTH,
        max_symbol_count: symbols::MAX_SYMBOL_COUNT,
        global_logging_enabled: crate::logging::is_initialized(),
        cargo_style_output: crate::logging::config::use_cargo_style_output(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_reports_limits() {
        let info = get_pipeline_info();
        assert_eq!(info.pipeline_stages, 3);
        assert!(info.max_token_count > 0);

        let report = info.report();
        assert!(report.contains("symbol classification"));
        assert!(report.contains(&info.max_symbol_count.to_string()));
        assert!(info.summary().starts_with("3-stage"));
    }
}
