//! Everything a command writes to stdout goes through [`OutputManager`].
//!
//! It is also the [`ScaffoldObserver`] handed to the core service, so step
//! progress follows the same format and quiet rules as the rest of the
//! command output.

use std::io::{self, IsTerminal};
use std::sync::Mutex;
use std::time::Duration;

use clap::ValueEnum;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use cleanarch_core::{
    application::{ScaffoldObserver, StepOutcome},
    domain::Step,
    error::CleanArchError,
};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

const TICK: char = '\u{2713}';
const BANG: char = '\u{26a0}';
const NOTE: char = '\u{2139}';

/// Stdout writer for one command invocation.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
    spinner: Mutex<Option<ProgressBar>>,
}

impl OutputManager {
    /// The flags win over `[output]` in the configuration.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            resolved_format: resolve_format(
                args.output_format,
                &config.output.format,
                io::stdout().is_terminal(),
            ),
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
            spinner: Mutex::new(None),
        }
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            Ok(())
        } else {
            self.term.write_line(line)
        }
    }

    fn tagged(&self, symbol: char, msg: &str, paint: AnsiColors) -> io::Result<()> {
        if self.no_color {
            self.emit(&format!("{symbol} {msg}"))
        } else {
            self.emit(&format!(
                "{} {}",
                symbol.color(paint).bold(),
                msg.color(paint)
            ))
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.tagged(TICK, msg, AnsiColors::Green)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.tagged(BANG, msg, AnsiColors::Yellow)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.tagged(NOTE, msg, AnsiColors::Blue)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.no_color {
            self.emit(text)
        } else {
            self.emit(&text.cyan().bold().to_string())
        }
    }

    /// Pretty-printed document on stdout. `--quiet` does not apply: a JSON
    /// consumer always gets its document.
    pub fn json<T: Serialize>(&self, value: &T) -> CliResult<()> {
        let text = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput {
            message: format!("Could not encode the JSON document: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.term.write_line(&text)?;
        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }

    // ── Spinner ───────────────────────────────────────────────────────────

    fn spinner_message(&self, message: String) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        pb.set_message(message);
    }

    /// Run `f` with the spinner line cleared so regular output is not torn.
    fn above_spinner(&self, f: impl FnOnce()) {
        match self.spinner.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(pb) => pb.suspend(f),
                None => f(),
            },
            Err(_) => f(),
        }
    }

    /// Stop and erase the spinner, if one is running.
    pub fn finish_progress(&self) {
        if let Some(pb) = self.spinner.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_and_clear();
        }
    }
}

impl ScaffoldObserver for OutputManager {
    fn step_started(&self, ordinal: usize, total: usize, step: &Step) {
        if self.quiet {
            return;
        }
        match self.resolved_format {
            OutputFormat::Human => self.spinner_message(format!("[{ordinal}/{total}] {step}")),
            OutputFormat::Plain => {
                let _ = self.term.write_line(&format!("[{ordinal}/{total}] {step}"));
            }
            OutputFormat::Json | OutputFormat::Auto => {}
        }
    }

    fn step_finished(&self, ordinal: usize, total: usize, step: &Step, outcome: &StepOutcome) {
        if ordinal == total {
            self.finish_progress();
        }
        if self.resolved_format == OutputFormat::Human
            && matches!(outcome, StepOutcome::AlreadyApplied)
        {
            self.above_spinner(|| {
                let _ = self.info(&format!("{step}: already done"));
            });
        }
    }

    fn step_failed(&self, _ordinal: usize, _total: usize, _step: &Step, _error: &CleanArchError) {
        // The error itself is rendered once by the top-level handler.
        self.finish_progress();
    }

    fn warning(&self, message: &str) {
        if self.is_json() {
            return;
        }
        self.above_spinner(|| {
            let _ = OutputManager::warning(self, message);
        });
    }
}

impl Drop for OutputManager {
    fn drop(&mut self) {
        self.finish_progress();
    }
}

/// Flag beats config; `auto` in both falls back to terminal detection.
fn resolve_format(flag: OutputFormat, configured: &str, stdout_is_tty: bool) -> OutputFormat {
    let chosen = match flag {
        OutputFormat::Auto => OutputFormat::from_str(configured, true).unwrap_or_default(),
        explicit => explicit,
    };

    match chosen {
        OutputFormat::Auto if stdout_is_tty => OutputFormat::Human,
        OutputFormat::Auto => OutputFormat::Plain,
        explicit => explicit,
    }
}
