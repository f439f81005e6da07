use anyhow::Result;
use clap::Parser;
use edm_validation::cli::CliError;
use edm_validation::cli::commands::validate::{ValidateOptions, handle_validate};
use edm_validation::cli::output::OutputFormat;
use edm_validation::model::DocumentFormat;
use edm_validation::models::EdmVersion;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Validate navigation properties and referential constraints of an EDM model
#[derive(Parser)]
#[command(name = "edm-validate")]
#[command(author, about, long_about = None)]
struct Cli {
    /// Model document, or `-` to read stdin
    input: String,

    /// Document format (yaml or json); guessed from the extension by default
    #[arg(long, value_parser = parse_format)]
    format: Option<DocumentFormat>,

    /// EDM version selecting the rule set (4.0 or 4.01)
    #[arg(long = "version", value_parser = parse_version)]
    edm_version: Option<EdmVersion>,

    /// Validation configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_format(value: &str) -> Result<DocumentFormat, String> {
    value.parse()
}

fn parse_version(value: &str) -> Result<EdmVersion, String> {
    value.parse()
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "edm_validation=debug".into())
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "edm_validation=warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = ValidateOptions {
        input: cli.input,
        format: cli.format,
        version: cli.edm_version,
        config: cli.config,
        output: cli.output,
    };

    match handle_validate(&options) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::ValidationError(_)) => Ok(ExitCode::FAILURE),
        Err(e) => Err(e.into()),
    }
}
