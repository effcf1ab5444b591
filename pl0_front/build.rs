// build.rs - compile-time limits for the front end, read from config/<profile>.toml
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    symbols: SymbolLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LexicalLimits {
    max_token_count: usize,
    max_lexeme_length: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SymbolLimits {
    max_symbol_count: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingLimits {
    max_error_collection: usize,
    max_log_events_per_file: usize,
    max_log_message_length: usize,
}

/// One generated `pub const NAME: TYPE = VALUE;`
struct Constant {
    name: &'static str,
    ty: &'static str,
    value: u64,
}

const fn constant(name: &'static str, ty: &'static str, value: u64) -> Constant {
    Constant { name, ty, value }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PL0_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=PL0_CONFIG_DIR");

    let profile = env::var("PL0_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("PL0_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Exposed to config::build_info
    println!("cargo:rustc-env=PL0_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=PL0_CONFIG_DIR={}", config_dir);

    let config_path = locate_config(&config_dir, &profile);
    println!("cargo:rerun-if-changed={}", config_path.display());

    let text = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));
    let config: CompileTimeConfig = toml::from_str(&text)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    if let Err(problem) = validate_limits(&config, &profile) {
        panic!("{}: {}", config_path.display(), problem);
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");
    fs::write(
        Path::new(&out_dir).join("constants.rs"),
        render_constants(&config, &profile),
    )
    .expect("constants.rs must be writable");
}

/// `<workspace>/<config_dir>/<profile>.toml`; the crate lives one level down
fn locate_config(config_dir: &str, profile: &str) -> PathBuf {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR");
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("pl0_front must live inside the workspace");

    let path = workspace_root
        .join(config_dir)
        .join(format!("{}.toml", profile));
    if !path.exists() {
        panic!(
            "Configuration file not found: {} (set PL0_BUILD_PROFILE or PL0_CONFIG_DIR)",
            path.display()
        );
    }
    path
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) -> Result<(), String> {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    let files = &config.file_processing;
    let logging = &config.logging;

    if files.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        return Err("max_file_size exceeds the absolute maximum".to_string());
    }
    if files.large_file_threshold > files.max_file_size {
        return Err("large_file_threshold must not exceed max_file_size".to_string());
    }
    if config.lexical.max_token_count == 0
        || config.lexical.max_lexeme_length == 0
        || config.symbols.max_symbol_count == 0
    {
        return Err("token, lexeme and symbol limits must be non-zero".to_string());
    }
    if logging.max_log_events_per_file > logging.max_error_collection {
        return Err("max_log_events_per_file must not exceed max_error_collection".to_string());
    }
    if profile == "production" && files.max_file_size > 50_000_000 {
        return Err("max_file_size too high for the production profile".to_string());
    }
    Ok(())
}

fn render_constants(config: &CompileTimeConfig, profile: &str) -> String {
    let files = &config.file_processing;
    let logging = &config.logging;
    let sections: [(&str, Vec<Constant>); 4] = [
        (
            "file_processing",
            vec![
                constant("MAX_FILE_SIZE", "u64", files.max_file_size),
                constant("LARGE_FILE_THRESHOLD", "u64", files.large_file_threshold),
                constant("MAX_LINE_COUNT", "usize", files.max_line_count as u64),
            ],
        ),
        (
            "lexical",
            vec![
                constant("MAX_TOKEN_COUNT", "usize", config.lexical.max_token_count as u64),
                constant("MAX_LEXEME_LENGTH", "usize", config.lexical.max_lexeme_length as u64),
            ],
        ),
        (
            "symbols",
            vec![constant(
                "MAX_SYMBOL_COUNT",
                "usize",
                config.symbols.max_symbol_count as u64,
            )],
        ),
        (
            "logging",
            vec![
                constant("MAX_ERROR_COLLECTION", "usize", logging.max_error_collection as u64),
                constant("MAX_LOG_EVENTS_PER_FILE", "usize", logging.max_log_events_per_file as u64),
                constant("MAX_LOG_MESSAGE_LENGTH", "usize", logging.max_log_message_length as u64),
            ],
        ),
    ];

    let mut code = String::new();
    let _ = writeln!(code, "// Generated by build.rs from the {} profile. Do not edit.", profile);
    code.push_str("pub mod compile_time {\n");
    for (module, constants) in &sections {
        let _ = writeln!(code, "    pub mod {} {{", module);
        for c in constants {
            let _ = writeln!(code, "        pub const {}: {} = {};", c.name, c.ty, c.value);
        }
        code.push_str("    }\n");
    }
    code.push_str("}\n");
    code
}
