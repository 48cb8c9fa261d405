//! # jsm CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

/// JSON Schema validation toolchain.
///
/// Validates JSON and YAML instances against draft-07 schemas and prints
/// parsed schemas in canonical form.
#[derive(Parser, Debug)]
#[command(name = "jsm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate an instance against a schema.
    Validate(jsm_cli::validate::ValidateArgs),
    /// Parse a schema and print its canonical JSON.
    Inspect(jsm_cli::inspect::InspectArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => {
            let outcome = jsm_cli::validate::run_validate(&args)?;
            println!("{}", outcome.report);
            if outcome.result.is_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Inspect(args) => {
            println!("{}", jsm_cli::inspect::run_inspect(&args)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
