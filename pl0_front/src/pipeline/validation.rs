use crate::logging::codes::{self, Code};

/// Codes any stage can emit; each must carry registry metadata
const STAGE_CODES: &[Code] = &[
    codes::file_processing::INVALID_PATH,
    codes::file_processing::FILE_NOT_FOUND,
    codes::file_processing::PERMISSION_DENIED,
    codes::file_processing::EMPTY_FILE,
    codes::file_processing::FILE_TOO_LARGE,
    codes::file_processing::TOO_MANY_LINES,
    codes::file_processing::INVALID_ENCODING,
    codes::file_processing::INVALID_EXTENSION,
    codes::file_processing::IO_ERROR,
    codes::lexical::TOKEN_LIMIT_EXCEEDED,
    codes::lexical::LEXEME_TOO_LONG,
    codes::lexical::UNRECOGNIZED_CHARACTER,
    codes::lexical::UNTERMINATED_COMMENT,
    codes::symbols::SYMBOL_LIMIT_EXCEEDED,
    codes::symbols::DANGLING_CONSTANT,
    codes::report::OUTPUT_CREATE_FAILED,
    codes::report::OUTPUT_WRITE_FAILED,
    codes::report::SERIALIZATION_FAILED,
];

/// Check that logging limits are sane and every stage code is registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::logging::config::validate_config()?;

    let missing: Vec<&str> = STAGE_CODES
        .iter()
        .map(Code::as_str)
        .filter(|code| codes::get_error_metadata(code).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(format!("Unregistered diagnostic codes: {}", missing.join(", ")));
    }

    crate::log_info!("Pipeline validation succeeded",
        "stages_validated" => 3,
        "codes_checked" => STAGE_CODES.len(),
        "profile" => crate::config::build_info::profile()
    );

    Ok(())
}
