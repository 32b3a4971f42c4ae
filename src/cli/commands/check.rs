//! The `check` command: run the preflight scan.
//!
//! Iterates the effective requirement table in name order, checks every
//! entry (no early exit), prints per-package diagnostics as they happen,
//! then prints one aggregate verdict. Exits 1 when anything errored, 0
//! otherwise.

use std::path::{Path, PathBuf};

use crate::checker::{any_errored, Checker, CheckResult};
use crate::cli::args::{CheckArgs, Cli};
use crate::cli::commands::{Command, CommandResult};
use crate::error::Result;
use crate::registry::Registry;
use crate::report::{JsonReport, OutputMode, Reporter};

/// Implementation of the `check` command.
pub struct CheckCommand {
    working_dir: PathBuf,
    config: Option<PathBuf>,
    mode: OutputMode,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(working_dir: &Path, cli: &Cli, args: CheckArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config: cli.config.clone(),
            mode: cli.output_mode(),
            args,
        }
    }

    /// Run every configured check and collect the results.
    ///
    /// When `reporter` is set, a line is printed per package as its check
    /// completes (JSON mode collects silently and renders at the end).
    fn scan(&self, registry: &Registry, reporter: Option<&Reporter>) -> Vec<CheckResult> {
        let checker = Checker::new(registry);
        let mut results = Vec::with_capacity(registry.len());

        for requirement in registry.iter() {
            tracing::debug!("checking requirement '{}'", requirement.name);
            let result = CheckResult {
                name: requirement.name.clone(),
                outcome: checker.check_package(requirement),
            };
            if let Some(reporter) = reporter {
                reporter.package_line(&result);
            }
            results.push(result);
        }

        results
    }
}

impl Command for CheckCommand {
    fn execute(&self) -> Result<CommandResult> {
        let registry = Registry::load(&self.working_dir, self.config.as_deref())?;
        tracing::debug!("loaded {} requirements", registry.len());

        let results = if self.args.json {
            self.scan(&registry, None)
        } else {
            let reporter = Reporter::new(self.mode);
            let results = self.scan(&registry, Some(&reporter));
            reporter.verdict(&results);
            results
        };

        if self.args.json {
            println!("{}", JsonReport::new(&results).render());
        }

        if any_errored(&results) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn cli(argv: &[&str]) -> Cli {
        Cli::parse_from(argv)
    }

    fn write_config(dir: &Path, body: &str) {
        fs::write(dir.join("envcheck.yml"), body).unwrap();
    }

    #[test]
    fn scan_checks_every_entry_in_order() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
replace: true
requirements:
  zeta:
    probe: { type: command, command: echo, args: ["1.0"] }
  alpha:
    probe: { type: command, command: echo, args: ["2.0"] }
"#,
        );
        let cmd = CheckCommand::new(temp.path(), &cli(&["envcheck"]), CheckArgs::default());
        let registry = Registry::load(temp.path(), None).unwrap();
        let results = cmd.scan(&registry, None);

        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn execute_fails_when_any_requirement_errors() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
replace: true
requirements:
  present:
    probe: { type: command, command: echo, args: ["1.0"] }
  absent:
    probe: { type: command, command: definitely-not-a-real-binary-xyz }
"#,
        );
        let cmd = CheckCommand::new(temp.path(), &cli(&["envcheck"]), CheckArgs::default());
        let result = cmd.execute().unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn execute_succeeds_when_all_pass() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
replace: true
requirements:
  tool:
    minimum: "1.0"
    probe: { type: command, command: echo, args: ["1.2.3"] }
"#,
        );
        let cmd = CheckCommand::new(temp.path(), &cli(&["envcheck"]), CheckArgs::default());
        let result = cmd.execute().unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn execute_propagates_config_errors() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "requirements: [broken");
        let cmd = CheckCommand::new(temp.path(), &cli(&["envcheck"]), CheckArgs::default());
        assert!(cmd.execute().is_err());
    }
}
