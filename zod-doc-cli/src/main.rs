//! # zod-doc
//!
//! Converts a JSON schema document exported from a TypeScript project into
//! documentation models.
//!
//! ## Usage
//!
//! ```bash
//! # Convert schemas.json into models.json
//! zod-doc convert
//!
//! # Choose input and output explicitly
//! zod-doc convert -i build/zod.json -o docs/models.json --compact
//!
//! # Preview the output without writing it
//! zod-doc convert --dry-run -vv
//!
//! # Fail when docs/models.json is stale
//! zod-doc check -p docs/models.json
//!
//! # Initialize configuration
//! zod-doc init
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use zod_doc_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::{CliError, CliResult, ConfigError},
    pipeline,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "zod-doc")]
#[command(author, version, about = "Convert Zod schema documents into documentation models", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a schema document into documentation models
    Convert {
        /// JSON schema document to convert
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the model JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write compact JSON instead of pretty-printed JSON
        #[arg(long)]
        compact: bool,

        /// Print the output instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check that a model file is up-to-date with its schema document
    Check {
        /// Path to the existing model file
        #[arg(short, long)]
        path: PathBuf,

        /// JSON schema document to convert
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new zod-doc configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let verbose = cli.verbose;

    match cli.command {
        Commands::Convert {
            input,
            output,
            compact,
            dry_run,
            config,
        } => {
            let config = ConfigManager::load(config.as_deref())?;
            let config = ConfigManager::merge_cli_args(
                config,
                &CliArgs {
                    document: input,
                    output,
                    pretty: compact.then_some(false),
                    log_level: verbosity_level(verbose),
                },
            );
            init_tracing(&config)?;
            cmd_convert(&config, dry_run)
        }

        Commands::Check {
            path,
            input,
            config,
        } => {
            let config = ConfigManager::load(config.as_deref())?;
            let config = ConfigManager::merge_cli_args(
                config,
                &CliArgs {
                    document: input,
                    log_level: verbosity_level(verbose),
                    ..Default::default()
                },
            );
            init_tracing(&config)?;
            cmd_check(&config, path)
        }

        Commands::Init { output, force } => cmd_init(output, force),
    }
}

/// Map `-v` occurrences to a filter directive.
fn verbosity_level(verbose: u8) -> Option<String> {
    let level = match verbose {
        0 => return None,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    Some(level.to_string())
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &Config) -> CliResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log.level)
            .map_err(|e| ConfigError::invalid_value("log.level", e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

/// Convert command implementation.
fn cmd_convert(config: &Config, dry_run: bool) -> CliResult<()> {
    println!(
        "{} {}",
        "Converting".cyan(),
        config.input.document.display()
    );

    let models = pipeline::convert_file(&config.input.document)?;
    println!("  Converted {} export(s)", models.len().to_string().green());

    let content = pipeline::render(&models, config.output.pretty)?;
    let writer = FileWriter::new(dry_run);

    match writer.write(&config.output.file, &content)? {
        WriteResult::Written { path, bytes } => {
            println!(
                "{} Written {} bytes to {}",
                "✓".green(),
                bytes,
                path.display()
            );
        }
        WriteResult::Unchanged { path } => {
            println!("{} {} is up-to-date", "✓".green(), path.display());
        }
        WriteResult::DryRun { content, path } => {
            println!(
                "{} Would write to {}:",
                "[dry-run]".yellow(),
                path.display()
            );
            println!("{}", "─".repeat(60).dimmed());
            print!("{}", content);
            println!("{}", "─".repeat(60).dimmed());
        }
    }

    Ok(())
}

/// Check command implementation.
fn cmd_check(config: &Config, model_path: PathBuf) -> CliResult<()> {
    println!("{}", "Checking models...".cyan());

    if !model_path.exists() {
        return Err(CliError::Validation(format!(
            "Model file not found: {}",
            model_path.display()
        )));
    }

    let existing = std::fs::read_to_string(&model_path)?;
    let models = pipeline::convert_file(&config.input.document)?;

    if pipeline::is_up_to_date(&existing, &models)? {
        println!("{} Models are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("{} Models are out of date", "✗".red());
        println!("  Run 'zod-doc convert' to update");
        Err(CliError::Validation("Models are out of date".to_string()))
    }
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> CliResult<()> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "Configuration file already exists",
        )));
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
