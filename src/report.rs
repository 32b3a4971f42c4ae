//! Human-readable and JSON reporting.
//!
//! Diagnostics are plain stdout lines, printed as each package is checked;
//! the run ends with a single aggregate verdict. Logging (`tracing`) is a
//! separate channel for debugging and never carries report content.

use console::style;
use serde::Serialize;

use crate::checker::{any_errored, CheckOutcome, CheckResult};

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also print a line for each satisfied package.
    Verbose,
    /// Print diagnostics for failing packages plus the verdict.
    #[default]
    Normal,
    /// Print the verdict only.
    Quiet,
}

impl OutputMode {
    /// Whether satisfied packages get a line.
    pub fn shows_passes(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether failing packages get diagnostic lines.
    pub fn shows_diagnostics(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Writes the scan report to stdout.
#[derive(Debug)]
pub struct Reporter {
    mode: OutputMode,
}

impl Reporter {
    /// Create a reporter for the given mode.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print the line for one checked package, if the mode calls for one.
    pub fn package_line(&self, result: &CheckResult) {
        match &result.outcome {
            CheckOutcome::Satisfied { version } => {
                if self.mode.shows_passes() {
                    let version = version.as_deref().unwrap_or("unknown version");
                    println!("{} {} {}", style("ok").green(), result.name, version);
                }
            }
            CheckOutcome::LoadFailure { message } => {
                if self.mode.shows_diagnostics() {
                    println!(
                        "{} failed to load '{}': {}",
                        style("Error:").red(),
                        result.name,
                        message
                    );
                }
            }
            CheckOutcome::VersionTooLow {
                required,
                installed,
            } => {
                if self.mode.shows_diagnostics() {
                    println!(
                        "{} {} version {} or later is required, you have version {}",
                        style("Error:").red(),
                        result.name,
                        required,
                        installed
                    );
                }
            }
        }
    }

    /// Print the aggregate verdict for a finished scan.
    pub fn verdict(&self, results: &[CheckResult]) {
        if any_errored(results) {
            println!();
            println!(
                "{}",
                style("There are errors that you must resolve before continuing.")
                    .red()
                    .bold()
            );
            println!("Re-run envcheck once they are fixed.");
        } else {
            println!();
            println!("{}", style("Your environment is good to go!").green().bold());
        }
    }
}

/// Machine-readable report for `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub errored: bool,
    pub results: &'a [CheckResult],
}

impl<'a> JsonReport<'a> {
    /// Build a report over finished results.
    pub fn new(results: &'a [CheckResult]) -> Self {
        Self {
            errored: any_errored(results),
            results,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn render(&self) -> String {
        // CheckResult contains only string data; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
