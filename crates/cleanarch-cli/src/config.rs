//! User defaults for `cleanarch`, read once per run.
//!
//! Only the binary knows about configuration; the core receives plain
//! `ScaffoldOptions`. Sources, strongest first:
//!
//! 1. Command-line flags, applied by each command
//! 2. Environment variables: `CLEANARCH_` prefix, `__` between sections,
//!    e.g. `CLEANARCH_TOOLCHAIN__PROGRAM=/usr/share/dotnet/dotnet`
//! 3. Config file: `--config FILE`, else `config.toml` in the platform
//!    config directory (optional)
//! 4. [`AppConfig::default`]

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use cleanarch_core::domain::PresentationKind;

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "CLEANARCH";

/// Every recognised key, grouped by TOML table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for `create`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// External toolchain settings.
    pub toolchain: ToolchainConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// `webapi`, `console` or `none`.
    pub presentation: String,
    pub with_tests: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`. `auto` picks human output on a
    /// terminal and plain output otherwise.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Executable used for every toolchain command.
    pub program: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            presentation: PresentationKind::default().to_string(),
            with_tests: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: cleanarch_adapters::DEFAULT_PROGRAM.into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            output: OutputConfig::default(),
            toolchain: ToolchainConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode built-in defaults")?;

        let file = match config_file {
            Some(path) => file_source(path).required(true),
            None => file_source(&Self::config_path()).required(false),
        };

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// `config.toml` under the platform config directory, or
    /// `.cleanarch.toml` in the current directory when the platform has none.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "cleanarch", "cleanarch")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".cleanarch.toml"))
    }

    /// The file this run reads (or `init` writes).
    pub fn active_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file.cloned().unwrap_or_else(Self::config_path)
    }

    /// `defaults.presentation`, parsed.
    pub fn default_presentation(&self) -> CliResult<PresentationKind> {
        PresentationKind::from_str(&self.defaults.presentation).map_err(|e| {
            CliError::ConfigError {
                message: format!("defaults.presentation: {e}"),
                source: Some(Box::new(e)),
            }
        })
    }

    /// Value of a dotted key, as printed by `config get`.
    pub fn get(&self, key: &str) -> CliResult<String> {
        match key {
            "defaults.presentation" => Ok(self.defaults.presentation.clone()),
            "defaults.with_tests" => Ok(self.defaults.with_tests.to_string()),
            "output.no_color" => Ok(self.output.no_color.to_string()),
            "output.format" => Ok(self.output.format.clone()),
            "toolchain.program" => Ok(self.toolchain.program.clone()),
            _ => Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            }),
        }
    }

    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn file_source(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::new(&path.to_string_lossy(), FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_presentation_is_webapi() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.presentation, "webapi");
        assert_eq!(
            cfg.default_presentation().unwrap(),
            PresentationKind::WebApi
        );
    }

    #[test]
    fn default_program_is_dotnet() {
        assert_eq!(AppConfig::default().toolchain.program, "dotnet");
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleanarch.toml");
        std::fs::write(
            &path,
            "[defaults]\npresentation = \"console\"\nwith_tests = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.defaults.presentation, "console");
        assert!(cfg.defaults.with_tests);
        // untouched sections keep their defaults
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn bad_presentation_is_config_error() {
        let mut cfg = AppConfig::default();
        cfg.defaults.presentation = "blazor".into();
        assert!(matches!(
            cfg.default_presentation(),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.with_tests").unwrap(), "false");
        assert_eq!(cfg.get("toolchain.program").unwrap(), "dotnet");
        assert!(matches!(
            cfg.get("does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn toml_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, AppConfig::default().to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap(), AppConfig::default());
    }
}
