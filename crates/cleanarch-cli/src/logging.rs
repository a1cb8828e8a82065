//! Tracing subscriber setup.
//!
//! Only the binary installs a subscriber; `cleanarch-core` and
//! `cleanarch-adapters` just emit events. Everything goes to stderr so
//! `--output-format json` keeps stdout machine-readable.
//!
//! `-q` → error, none → warn, `-v` → info, `-vv` → debug, `-vvv` → trace.
//! A set `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

const CRATES: [&str; 3] = ["cleanarch", "cleanarch_core", "cleanarch_adapters"];

/// What the flags ask of the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: Level,
    ansi: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_tty: bool) -> Self {
        let level = if args.quiet {
            Level::ERROR
        } else {
            match args.verbose {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };

        Self {
            level,
            ansi: stderr_is_tty && !args.no_color,
        }
    }

    fn directives(&self) -> String {
        let level = self.level.as_str().to_ascii_lowercase();
        CRATES
            .iter()
            .map(|krate| format!("{krate}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Could not install the tracing subscriber: {e}"))
}
