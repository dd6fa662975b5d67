mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};
use commands::CliError;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("coachdeck: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let config = cli.editor_config().validated();
    match &cli.command {
        Command::Template => {
            let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
            Ok(commands::template(&now))
        }
        Command::Fmt(args) => commands::fmt(&commands::read_input(&args.input)?),
        Command::Check(args) => {
            let violations = commands::check(&commands::read_input(&args.input)?)?;
            if violations.is_empty() {
                return Ok(String::new());
            }
            for violation in &violations {
                println!("{violation}");
            }
            Err(CliError::Violations { count: violations.len() })
        }
        Command::Catalog { search, json } => commands::catalog_listing(search.as_deref(), *json),
        Command::Drag { input, id, to } => commands::drag(&commands::read_input(&input.input)?, id, *to, config),
        Command::Resize { input, id, handle, to } => {
            commands::resize(&commands::read_input(&input.input)?, id, *handle, *to, config)
        }
        Command::Set { input, id, field, value } => {
            commands::set_field(&commands::read_input(&input.input)?, id, field, value)
        }
    }
}
