//! Requirement registry and configuration loading.
//!
//! The registry is the table of packages to check: each entry pairs a name
//! with an optional minimum version and a [`VersionProbe`]. A built-in table
//! ships with the binary; a project can extend or replace it with an
//! `envcheck.yml` file.
//!
//! Requirements are keyed in a `BTreeMap` so evaluation (and therefore report
//! ordering) is deterministic across runs.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnvcheckError, Result};
use crate::probe::VersionProbe;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "envcheck.yml";

/// Default Python interpreter for python-module probes.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// A single package requirement.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Requirement {
    /// Package name (registry key).
    pub name: String,
    /// Lowest acceptable version; `None` means any installed version passes.
    pub minimum: Option<String>,
    /// How to detect the package.
    pub probe: VersionProbe,
}

/// The effective set of requirements to check.
#[derive(Debug)]
pub struct Registry {
    interpreter: String,
    requirements: BTreeMap<String, Requirement>,
}

/// On-disk config file shape.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    /// When true, the file replaces the built-in table instead of merging
    /// over it.
    #[serde(default)]
    replace: bool,

    /// Python interpreter override for python-module probes.
    interpreter: Option<String>,

    #[serde(default)]
    requirements: BTreeMap<String, RequirementConfig>,
}

/// A requirement as declared in config.
#[derive(Debug, Deserialize)]
struct RequirementConfig {
    minimum: Option<String>,

    /// Defaults to a python-module probe importing the requirement's name.
    probe: Option<VersionProbe>,
}

impl Registry {
    /// The built-in requirement table.
    ///
    /// These are the packages the original workshop preflight script
    /// checked; xlwt reports its version via `__VERSION__` rather than the
    /// conventional attribute.
    pub fn builtin() -> Self {
        const TABLE: &[(&str, Option<&str>)] = &[
            ("IPython", Some("4.0")),
            ("jupyter", Some("1.0")),
            ("numpy", Some("1.6")),
            ("scipy", Some("0.15")),
            ("matplotlib", Some("1.3")),
            ("astropy", Some("1.1")),
            ("photutils", Some("0.2")),
            ("skimage", Some("0.11")),
            ("pandas", Some("0.17.1")),
            ("xlwt", Some("1.0.0")),
            ("astroquery", Some("0.2.6")),
            ("glue", None),
        ];

        let mut requirements = BTreeMap::new();
        for &(name, minimum) in TABLE {
            let probe = if name == "xlwt" {
                VersionProbe::python_module_with_attr(name, "__VERSION__")
            } else {
                VersionProbe::python_module(name)
            };
            requirements.insert(
                name.to_string(),
                Requirement {
                    name: name.to_string(),
                    minimum: minimum.map(String::from),
                    probe,
                },
            );
        }

        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            requirements,
        }
    }

    /// Load the effective registry for a working directory.
    ///
    /// An explicit `--config` path must exist; the default `envcheck.yml` is
    /// optional. Config entries merge over the built-in table by name unless
    /// the file sets `replace: true`.
    pub fn load(working_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(EnvcheckError::ConfigNotFound {
                        path: p.to_path_buf(),
                    });
                }
                Some(p.to_path_buf())
            }
            None => {
                let default = working_dir.join(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut registry = Self::builtin();
        if let Some(path) = path {
            tracing::debug!("loading requirement config from {}", path.display());
            let content = fs::read_to_string(&path)?;
            let config: ConfigFile =
                serde_yaml::from_str(&content).map_err(|e| EnvcheckError::ConfigParseError {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            registry.apply(config);
        }

        registry.validate()?;
        Ok(registry)
    }

    /// Merge a parsed config file into the registry.
    fn apply(&mut self, config: ConfigFile) {
        if config.replace {
            self.requirements.clear();
        }
        if let Some(interpreter) = config.interpreter {
            self.interpreter = interpreter;
        }
        for (name, req) in config.requirements {
            let probe = req
                .probe
                .unwrap_or_else(|| VersionProbe::python_module(&name));
            self.requirements.insert(
                name.clone(),
                Requirement {
                    name,
                    minimum: req.minimum,
                    probe,
                },
            );
        }
    }

    /// Validate every probe definition.
    fn validate(&self) -> Result<()> {
        for req in self.requirements.values() {
            req.probe
                .validate()
                .map_err(|message| EnvcheckError::InvalidProbe {
                    requirement: req.name.clone(),
                    message,
                })?;
        }
        Ok(())
    }

    /// The Python interpreter used by python-module probes.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    /// Look up a requirement by name.
    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.requirements.get(name)
    }

    /// Requirements in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.values()
    }

    /// Number of requirements.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Whether the registry has no requirements.
    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
