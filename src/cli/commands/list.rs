//! The `list` command: show the effective requirement table.

use std::path::{Path, PathBuf};

use console::style;

use crate::cli::args::{Cli, ListArgs};
use crate::cli::commands::{Command, CommandResult};
use crate::error::Result;
use crate::registry::{Registry, Requirement};

/// Implementation of the `list` command.
pub struct ListCommand {
    working_dir: PathBuf,
    config: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(working_dir: &Path, cli: &Cli, args: ListArgs) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            config: cli.config.clone(),
            args,
        }
    }

    fn print_human(&self, registry: &Registry) {
        println!(
            "Requirements ({} entries, interpreter: {}):",
            registry.len(),
            registry.interpreter()
        );
        let width = registry
            .iter()
            .map(|r| r.name.len())
            .max()
            .unwrap_or(0);
        for req in registry.iter() {
            let minimum = match &req.minimum {
                Some(m) => format!(">= {}", m),
                None => "any".to_string(),
            };
            println!(
                "  {:width$}  {:10}  {}",
                style(&req.name).bold(),
                minimum,
                req.probe.describe(),
                width = width
            );
        }
    }

    fn print_json(&self, registry: &Registry) {
        let entries: Vec<&Requirement> = registry.iter().collect();
        // Requirement contains only string data; serialization cannot fail
        let rendered =
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string());
        println!("{}", rendered);
    }
}

impl Command for ListCommand {
    fn execute(&self) -> Result<CommandResult> {
        let registry = Registry::load(&self.working_dir, self.config.as_deref())?;

        if self.args.json {
            self.print_json(&registry);
        } else {
            self.print_human(&registry);
        }

        Ok(CommandResult::success())
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

    #[test]
    fn list_executes_against_builtins() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(temp.path(), &cli(&["envcheck"]), ListArgs::default());
        let result = cmd.execute().unwrap();
        assert!(result.success);
    }

    #[test]
    fn list_propagates_missing_explicit_config() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yml");
        let cli = Cli::parse_from(["envcheck", "--config", missing.to_str().unwrap()]);
        let cmd = ListCommand::new(temp.path(), &cli, ListArgs::default());
        assert!(cmd.execute().is_err());
    }

    #[test]
    fn list_json_mode_executes() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("envcheck.yml"),
            "replace: true\nrequirements:\n  tool:\n    probe: { type: command, command: echo }\n",
        )
        .unwrap();
        let cmd = ListCommand::new(temp.path(), &cli(&["envcheck"]), ListArgs { json: true });
        let result = cmd.execute().unwrap();
        assert!(result.success);
    }
}
