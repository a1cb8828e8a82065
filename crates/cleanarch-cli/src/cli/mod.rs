//! Command-line surface of `cleanarch`, declared with clap's derive API.
//!
//! Parsing only. Converting flags into core options happens in
//! [`crate::commands`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use cleanarch_core::domain::PresentationKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name    = "cleanarch",
    bin_name = "cleanarch",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a clean architecture .NET solution",
    long_about = "CleanArch drives the dotnet CLI to lay out a multi-project \
                  clean architecture solution: Domain, Application, \
                  Infrastructure and an optional presentation project, wired \
                  together with project references, plus optional test projects.",
    after_help = "EXAMPLES:\n\
        \x20 cleanarch create Shop\n\
        \x20 cleanarch create Shop --presentation console --with-tests\n\
        \x20 cleanarch create Shop -p none --dry-run\n\
        \x20 cleanarch completions bash > /usr/share/bash-completion/completions/cleanarch",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new solution.
    #[command(
        visible_alias = "new",
        about = "Create a new clean architecture solution",
        after_help = "EXAMPLES:\n\
            \x20 cleanarch create Shop\n\
            \x20 cleanarch create Acme.Billing --presentation=console --with-tests\n\
            \x20 cleanarch create Shop -p none -o ./work --dry-run"
    )]
    Create(CreateArgs),

    /// Write a configuration file with every default spelled out.
    #[command(
        about = "Write a default configuration file",
        after_help = "EXAMPLES:\n\
            \x20 cleanarch init                       # default location\n\
            \x20 cleanarch init --force               # overwrite\n\
            \x20 cleanarch --config ./ca.toml init    # custom location"
    )]
    Init(InitArgs),

    #[command(
        about = "Print a shell completion script",
        after_help = "EXAMPLES:\n\
            \x20 cleanarch completions bash > ~/.local/share/bash-completion/completions/cleanarch\n\
            \x20 cleanarch completions zsh  > ~/.zfunc/_cleanarch\n\
            \x20 cleanarch completions fish > ~/.config/fish/completions/cleanarch.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the CleanArch configuration.
    #[command(
        about = "Show configuration values",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 cleanarch config get defaults.presentation\n\
            \x20 cleanarch config list\n\
            \x20 cleanarch config path"
    )]
    Config(ConfigCommands),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Solution name. Becomes the root namespace and the prefix of every
    /// project, so it must be a valid dotted C# identifier.
    #[arg(value_name = "NAME", help = "Solution name, e.g. Shop or Acme.Billing")]
    pub name: String,

    /// Presentation project kind. Defaults to `defaults.presentation` from
    /// the configuration (webapi out of the box).
    #[arg(
        short = 'p',
        long = "presentation",
        value_name = "KIND",
        value_enum,
        help = "Presentation project: webapi, console or none"
    )]
    pub presentation: Option<Presentation>,

    /// Also generate unit and integration test projects.
    #[arg(long = "with-tests", help = "Add xUnit test projects")]
    pub with_tests: bool,

    /// Directory the solution is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Print the plan without running anything.
    #[arg(long = "dry-run", help = "Show the steps without executing them")]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short = 'f', long = "force", help = "Replace a configuration file that already exists")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Target shell")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one effective value.
    Get {
        /// Dotted key path, e.g. `defaults.presentation`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print where the configuration file is read from.
    Path,
}

/// Command-line spelling of [`PresentationKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum Presentation {
    /// ASP.NET Core Web API with Swagger.
    #[value(alias = "api")]
    WebApi,
    /// Console application.
    Console,
    /// No presentation project.
    None,
}

impl From<Presentation> for PresentationKind {
    fn from(value: Presentation) -> Self {
        match value {
            Presentation::WebApi => Self::WebApi,
            Presentation::Console => Self::Console,
            Presentation::None => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn argument_definitions_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create_command() {
        let cli = Cli::parse_from(["cleanarch", "create", "Shop"]);
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.name, "Shop");
                assert_eq!(args.presentation, None);
                assert!(!args.with_tests);
                assert!(!args.dry_run);
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn presentation_accepts_equals_and_short_forms() {
        let forms: [&[&str]; 2] = [
            &["cleanarch", "create", "Shop", "--presentation=console"],
            &["cleanarch", "create", "Shop", "-p", "console"],
        ];
        for argv in forms {
            let Commands::Create(args) = Cli::parse_from(argv).command else {
                panic!("expected Create");
            };
            assert_eq!(args.presentation, Some(Presentation::Console));
        }
    }

    #[test]
    fn unknown_presentation_is_rejected() {
        assert!(Cli::try_parse_from(["cleanarch", "create", "Shop", "-p", "blazor"]).is_err());
    }

    #[test]
    fn presentation_maps_to_core() {
        assert_eq!(PresentationKind::from(Presentation::WebApi), PresentationKind::WebApi);
        assert_eq!(PresentationKind::from(Presentation::None), PresentationKind::None);
    }

    #[test]
    fn new_is_an_alias_for_create() {
        let cli = Cli::parse_from(["cleanarch", "new", "Shop", "--with-tests"]);
        assert!(matches!(cli.command, Commands::Create(CreateArgs { with_tests: true, .. })));
    }

    #[test]
    fn quiet_excludes_verbose() {
        let err = Cli::try_parse_from(["cleanarch", "-q", "-v", "config", "list"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
