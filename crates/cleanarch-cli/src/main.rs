//! # CleanArch CLI
//!
//! Scaffolds a clean architecture .NET solution by driving the `dotnet` CLI.
//!
//! `main` parses arguments, installs logging, loads configuration, builds
//! the [`OutputManager`] and runs one command. Any [`CliError`] is rendered
//! once, here, on stderr.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! |  0   | Success, help or version                       |
//! |  1   | Any failure: bad arguments, config, failed step |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return handle_parse_error(e),
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("cleanarch: {e}");
        return ExitCode::from(1);
    }

    debug!(args = ?cli.global, "Arguments parsed");

    // `init` creates the file, so it must not require it to exist yet.
    let loaded = match cli.command {
        Commands::Init(_) => Ok(AppConfig::default()),
        _ => AppConfig::load(cli.global.config.as_ref()),
    };
    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            debug!(error = %format!("{e:#}"), "Configuration could not be loaded");
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: None,
                },
                &cli.global,
            );
        }
    };

    let output = OutputManager::new(&cli.global, &config);

    let Cli { global, command } = cli;
    match run(command, &global, config, output) {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, &global),
    }
}

#[instrument(skip_all)]
fn run(
    command: Commands,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let config_file = global.config.clone();
    match command {
        Commands::Create(cmd) => commands::create::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, config_file, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config_file, config, output),
    }
}

/// Help and version requests are not failures; every real parse error
/// exits with 1.
fn handle_parse_error(err: clap::Error) -> ExitCode {
    let code = match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    };
    // `print` routes help to stdout and errors to stderr.
    let _ = err.print();
    ExitCode::from(code)
}

/// Translate a `CliError` into a user message on stderr and an exit code.
fn handle_error(err: CliError, global: &GlobalArgs) -> ExitCode {
    err.log();

    let color = !global.no_color && std::io::stderr().is_terminal();
    eprint!("{}", err.render(global.verbose > 0, color));

    ExitCode::from(err.exit_code())
}
