// astsim: structural similarity and declaration checks for a small C-like language

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};
use crossterm::style::Stylize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use astsim::api;
use astsim::config::{Config, OutputFormat, DEFAULT_LOG_FILTER};
use astsim::parser::ParseError;
use astsim::report;

#[derive(Debug, ClapParser)]
#[command(
    name = "astsim",
    version,
    about = "Compare and check snippets of a small C-like language"
)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set (e.g. "debug", "astsim=trace")
    #[arg(long, default_value = DEFAULT_LOG_FILTER, global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream of a file
    Tokenize { file: PathBuf },
    /// Parse a file and print its AST
    Parse { file: PathBuf },
    /// Structural similarity of two files
    Compare { first: PathBuf, second: PathBuf },
    /// Declaration/use checks on a file
    Check { file: PathBuf },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("cannot encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

fn read_source(path: &Path) -> Result<String, CliError> {
    debug!(path = %path.display(), "reading source");
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run one command. Returns whether the input had problems worth a non-zero exit.
fn run(command: &Command, config: &Config) -> Result<bool, CliError> {
    let styled = config.format == OutputFormat::Text && io::stdout().is_terminal();

    match command {
        Command::Tokenize { file } => {
            let tokenized = api::tokenize(&read_source(file)?);
            match config.format {
                OutputFormat::Json => print_json(&tokenized)?,
                OutputFormat::Text => print!("{}", report::render_tokens(&tokenized, styled)),
            }
            Ok(!tokenized.diagnostics.is_empty())
        }
        Command::Parse { file } => {
            let parsed = api::parse(&read_source(file)?)?;
            match config.format {
                OutputFormat::Json => print_json(&parsed)?,
                OutputFormat::Text => {
                    print!("{}", report::render_diagnostics(&parsed.diagnostics, styled));
                    print!("{}", report::render_tree(&parsed.program.to_tree(), styled));
                }
            }
            Ok(false)
        }
        Command::Compare { first, second } => {
            let comparison = api::compare(&read_source(first)?, &read_source(second)?);
            match config.format {
                OutputFormat::Json => print_json(&comparison)?,
                OutputFormat::Text => print!("{}", report::render_comparison(&comparison, styled)),
            }
            Ok(comparison.error.is_some())
        }
        Command::Check { file } => {
            let analysis = api::analyze_source(&read_source(file)?)?;
            match config.format {
                OutputFormat::Json => print_json(&analysis)?,
                OutputFormat::Text => print!("{}", report::render_report(&analysis, styled)),
            }
            Ok(analysis.has_errors())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config {
        format: cli.format,
        log_filter: cli.log_level.clone(),
    };
    config.init_logging();

    match run(&cli.command, &config) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(2)
        }
    }
}
