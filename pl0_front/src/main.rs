use pl0_front::config::runtime::RuntimeConfig;
use pl0_front::logging::{codes, LogEvent};
use pl0_front::{logging, pipeline};
use std::env;
use std::path::PathBuf;

const DEFAULT_SOURCE: &str = "Program_Text.txt";

/// Command-line options after parsing
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    source: Option<String>,
    tokens_path: Option<PathBuf>,
    symbols_path: Option<PathBuf>,
    json_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    quiet: bool,
    help: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("pl0_front");
    let options = parse_options(args.get(1..).unwrap_or_default());

    let config = match &options.config_path {
        Some(path) => RuntimeConfig::load(path).map_err(|e| {
            logging::safe_log_error(codes::system::CONFIGURATION_ERROR, &e.to_string());
            e
        })?,
        None => RuntimeConfig::default(),
    };

    logging::config::init_runtime_preferences(config.logging.clone())
        .and_then(|_| logging::init_global_logging())
        .map_err(|e| {
            logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
            e
        })?;
    pipeline::validate_pipeline()?;

    if options.help {
        print_help(program_name, &config);
        return Ok(());
    }

    let source = options.source.as_deref().unwrap_or(DEFAULT_SOURCE);
    let tokens_path = options
        .tokens_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report.token_report_path));
    let symbols_path = options
        .symbols_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.report.symbol_report_path));

    if !options.quiet {
        println!("Processing file: {}", source);
    }

    let outcome = pipeline::process_file_with_config(source, &config).and_then(|result| {
        pipeline::write_reports(&result, &tokens_path, &symbols_path)?;
        if let Some(json_path) = &options.json_path {
            pipeline::write_json_output(&result, json_path)?;
        }
        Ok(result)
    });

    match outcome {
        Ok(result) => {
            if !options.quiet {
                println!("\nSUCCESS: {}", result.summary());
                println!("  Tokens:  {}", tokens_path.display());
                println!("  Symbols: {}", symbols_path.display());
                if let Some(json_path) = &options.json_path {
                    println!("  JSON:    {}", json_path.display());
                }
            }
            print_cargo_style_summary(&config);
        }
        Err(error) => {
            eprintln!("\nFAILED: {}", error);
            print_detailed_error(&error);
            print_cargo_style_summary(&config);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--quiet" => options.quiet = true,
            "--tokens" => options.tokens_path = take_path(args, &mut i, "--tokens"),
            "--symbols" => options.symbols_path = take_path(args, &mut i, "--symbols"),
            "--json" => options.json_path = take_path(args, &mut i, "--json"),
            "--config" => options.config_path = take_path(args, &mut i, "--config"),
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            other => {
                if options.source.is_some() {
                    eprintln!("Warning: Extra argument '{}' ignored", other);
                } else {
                    options.source = Some(other.to_string());
                }
            }
        }
        i += 1;
    }

    options
}

/// Consume the value following a flag
fn take_path(args: &[String], i: &mut usize, flag: &str) -> Option<PathBuf> {
    match args.get(*i + 1) {
        Some(value) => {
            *i += 1;
            Some(PathBuf::from(value))
        }
        None => {
            eprintln!("Warning: {} requires a file path", flag);
            None
        }
    }
}

fn print_help(program_name: &str, config: &RuntimeConfig) {
    println!("PL/0 Front End v{}", env!("CARGO_PKG_VERSION"));
    println!("Table-driven lexer and symbol table builder");
    println!();
    println!("USAGE:");
    println!("    {} [SOURCE] [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    SOURCE    Program text to scan (default: {})", DEFAULT_SOURCE);
    println!();
    println!("OPTIONS:");
    println!(
        "    --tokens FILE       Token report path (default: {})",
        config.report.token_report_path
    );
    println!(
        "    --symbols FILE      Symbol table report path (default: {})",
        config.report.symbol_report_path
    );
    println!("    --json FILE         Also write tokens and symbols as JSON");
    println!("    --config FILE       Load runtime preferences from a TOML file");
    println!("    --quiet             Only print diagnostics");
    println!("    --help              Show this help message");
    println!();

    let pipeline_info = pipeline::get_pipeline_info();
    println!("PIPELINE CAPABILITIES:");
    for line in pipeline_info.report().lines() {
        println!("    {}", line);
    }
    println!();
    for line in logging::config::get_config_summary().lines() {
        println!("    {}", line);
    }
    println!();
    println!("{}", pl0_front::config::build_info::source_info());
}

fn print_cargo_style_summary(config: &RuntimeConfig) {
    if !config.logging.enable_cargo_style_output {
        return;
    }
    if let Some(summary) = logging::cargo_style_summary() {
        if !summary.is_empty() {
            eprintln!("{}", summary);
        }
    }
}

fn print_detailed_error(error: &pipeline::PipelineError) {
    eprintln!("{} stage failed [{}]:", capitalize(error.stage()), error.error_code().as_str());
    match error {
        pipeline::PipelineError::FileProcessing(file_err) => {
            eprintln!("  {}", file_err);
            eprintln!("  Category: {}", file_err.category());
        }
        pipeline::PipelineError::LexicalAnalysis(lex_err) => eprintln!("  {}", lex_err),
        pipeline::PipelineError::SymbolClassification(symbol_err) => {
            eprintln!("  {}", symbol_err)
        }
        pipeline::PipelineError::Report(report_err) => eprintln!("  {}", report_err),
        pipeline::PipelineError::Pipeline { message } => eprintln!("  {}", message),
    }

    let event = LogEvent::error(error.error_code(), &error.to_string());
    eprintln!("{}", event.format_detailed());
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
