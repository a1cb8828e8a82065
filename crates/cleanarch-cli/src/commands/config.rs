//! `cleanarch config`: inspect configuration values.

use std::path::PathBuf;

use crate::{cli::ConfigCommands, config::AppConfig, error::CliResult, output::OutputManager};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<PathBuf>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key)?;
            if output.is_json() {
                output.json(&serde_json::json!({ "key": key, "value": value }))?;
            } else {
                output.print(&value)?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current configuration:")?;
                output.print(config.to_toml()?.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            let path = AppConfig::active_path(config_file.as_ref());
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}
