//! Version probes: how a requirement is detected on the system.
//!
//! A compiled binary cannot import a package by a runtime name the way a
//! dynamic language can, so availability is a capability probe: can the named
//! package be located, and if so, what version does it report? Each
//! requirement carries a [`VersionProbe`] variant describing its probe, and
//! probing shells out to the relevant ecosystem tool.
//!
//! Probes never propagate failures — a probe that cannot run resolves to
//! [`ProbeOutcome::LoadFailed`] with the underlying error text, and the
//! checker turns that into a per-package diagnostic.

use std::process::Command;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default pattern for pulling a version out of command output.
///
/// Matches the first dotted-numeric run, optionally with a short suffix
/// ("1.2.3", "3.20.0-rc1", "1.6").
const DEFAULT_VERSION_PATTERN: &str = r"\d+(?:\.\d+)+[0-9A-Za-z.\-]*|\d+";

/// The conventional Python version attribute.
pub const DEFAULT_VERSION_ATTR: &str = "__version__";

/// How to detect a requirement and obtain its version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VersionProbe {
    /// Import a Python module via the configured interpreter and read its
    /// version attribute. Most packages report via `__version__`; the
    /// attribute is configurable because at least one (xlwt) uses a
    /// differently-cased name.
    PythonModule {
        module: String,
        #[serde(default = "default_version_attr")]
        version_attr: String,
    },

    /// Run an executable and extract the version from its output.
    Command {
        command: String,
        #[serde(default = "default_command_args")]
        args: Vec<String>,
        /// Override for the version-extraction regex. If the pattern has a
        /// capture group, group 1 is the version; otherwise the whole match.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
}

fn default_version_attr() -> String {
    DEFAULT_VERSION_ATTR.to_string()
}

fn default_command_args() -> Vec<String> {
    vec!["--version".to_string()]
}

/// Result of running a probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The package was located. `version` is `None` when the package exists
    /// but reports no recognizable version.
    Loaded { version: Option<String> },

    /// The package could not be located or failed to initialize.
    LoadFailed { message: String },
}

impl VersionProbe {
    /// A python-module probe with the conventional version attribute.
    pub fn python_module(module: &str) -> Self {
        VersionProbe::PythonModule {
            module: module.to_string(),
            version_attr: DEFAULT_VERSION_ATTR.to_string(),
        }
    }

    /// A python-module probe with a non-standard version attribute.
    pub fn python_module_with_attr(module: &str, version_attr: &str) -> Self {
        VersionProbe::PythonModule {
            module: module.to_string(),
            version_attr: version_attr.to_string(),
        }
    }

    /// Short description of the probe kind, for listings.
    pub fn describe(&self) -> String {
        match self {
            VersionProbe::PythonModule { module, .. } => format!("python module '{}'", module),
            VersionProbe::Command { command, args, .. } => {
                format!("command '{} {}'", command, args.join(" "))
            }
        }
    }

    /// Validate the probe definition without running it.
    ///
    /// Returns an error message for definitions that can never work, such as
    /// an empty command or a version pattern that fails to compile.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            VersionProbe::PythonModule { module, .. } => {
                if module.is_empty() {
                    return Err("module name is empty".to_string());
                }
                if !module
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
                {
                    return Err(format!("'{}' is not a valid module name", module));
                }
                Ok(())
            }
            VersionProbe::Command {
                command, pattern, ..
            } => {
                if command.is_empty() {
                    return Err("command is empty".to_string());
                }
                if let Some(p) = pattern {
                    Regex::new(p).map_err(|e| format!("bad version pattern: {}", e))?;
                }
                Ok(())
            }
        }
    }

    /// Run the probe. `interpreter` is the Python interpreter used for
    /// python-module probes (ignored by command probes).
    pub fn run(&self, interpreter: &str) -> ProbeOutcome {
        match self {
            VersionProbe::PythonModule {
                module,
                version_attr,
            } => run_python_module(interpreter, module, version_attr),
            VersionProbe::Command {
                command,
                args,
                pattern,
            } => run_command(command, args, pattern.as_deref()),
        }
    }
}

/// Build the interpreter one-liner for a python-module probe.
///
/// A missing version attribute prints an empty line rather than raising, so
/// "loaded but versionless" is distinguishable from an import failure.
fn python_script(module: &str, version_attr: &str) -> String {
    format!(
        "import {m}; v = getattr({m}, \"{a}\", None); print(\"\" if v is None else v)",
        m = module,
        a = version_attr
    )
}

fn run_python_module(interpreter: &str, module: &str, version_attr: &str) -> ProbeOutcome {
    tracing::debug!("probing python module '{}' via {}", module, interpreter);

    let output = Command::new(interpreter)
        .arg("-c")
        .arg(python_script(module, version_attr))
        .output();

    let output = match output {
        Ok(out) => out,
        Err(e) => {
            return ProbeOutcome::LoadFailed {
                message: format!("could not run {}: {}", interpreter, e),
            }
        }
    };

    if !output.status.success() {
        // The last traceback line carries the actual error
        // (e.g. "ModuleNotFoundError: No module named 'numpy'")
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = last_nonempty_line(&stderr)
            .unwrap_or_else(|| format!("{} exited with {}", interpreter, output.status));
        return ProbeOutcome::LoadFailed { message };
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim();
    ProbeOutcome::Loaded {
        version: if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        },
    }
}

fn run_command(command: &str, args: &[String], pattern: Option<&str>) -> ProbeOutcome {
    tracing::debug!("probing command '{}' with args {:?}", command, args);

    let output = match Command::new(command).args(args).output() {
        Ok(out) => out,
        Err(e) => {
            return ProbeOutcome::LoadFailed {
                message: format!("could not run {}: {}", command, e),
            }
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = last_nonempty_line(&stderr)
            .unwrap_or_else(|| format!("{} exited with {}", command, output.status));
        return ProbeOutcome::LoadFailed { message };
    }

    let re = match Regex::new(pattern.unwrap_or(DEFAULT_VERSION_PATTERN)) {
        Ok(re) => re,
        // Unreachable when the registry validated the probe, but probes can
        // also be constructed directly
        Err(e) => {
            return ProbeOutcome::LoadFailed {
                message: format!("bad version pattern: {}", e),
            }
        }
    };

    // Tools disagree about which stream carries the version line
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let version = extract_version(&re, &stdout).or_else(|| extract_version(&re, &stderr));

    ProbeOutcome::Loaded { version }
}

fn extract_version(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    let m = caps.get(1).or_else(|| caps.get(0))?;
    let version = m.as_str().trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

fn last_nonempty_line(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(String::from)
}
