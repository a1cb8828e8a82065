//! Flags accepted by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more: `-v` info (each dotnet command), `-vv` debug (plan steps
    /// and process output), `-vvv` trace.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More logging on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Print errors only.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors"
    )]
    pub quiet: bool,

    /// Turn off ANSI styling. Also set by a non-empty `NO_COLOR`.
    #[arg(long = "no-color", global = true, env = "NO_COLOR", help = "Plain, uncoloured output")]
    pub no_color: bool,

    /// Read configuration from FILE instead of the platform config
    /// directory. `init` writes here too.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "CLEANARCH_CONFIG",
        help = "Use this configuration file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format: auto, human, plain or json"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the configuration, else human on a terminal and
    /// plain when piped.
    #[default]
    Auto,
    /// Colours and a progress spinner.
    Human,
    /// One line per step, no styling.
    Plain,
    /// A single JSON document on stdout.
    Json,
}
