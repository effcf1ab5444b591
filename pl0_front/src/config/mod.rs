//! Configuration for the front end
//!
//! Compile-time limits are generated by build.rs from `config/<profile>.toml`;
//! runtime preferences come from `PL0_*` environment variables or an optional
//! TOML file.

include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("PL0_BUILD_PROFILE").unwrap_or("development")
    }

    pub fn config_dir() -> &'static str {
        option_env!("PL0_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(
            compile_time::file_processing::LARGE_FILE_THRESHOLD
                <= compile_time::file_processing::MAX_FILE_SIZE
        );
        assert!(compile_time::lexical::MAX_TOKEN_COUNT > 0);
        assert!(compile_time::lexical::MAX_LEXEME_LENGTH > 0);
        assert!(compile_time::symbols::MAX_SYMBOL_COUNT > 0);
    }

    #[test]
    fn test_build_info_names_profile() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
