//! Per-package checking.
//!
//! The checker answers one question per requirement: did it error? A
//! requirement errors when its package fails to load, or loads but reports a
//! version below the configured minimum. Both cases are recovered here and
//! returned as data — no check failure ever propagates, so every package is
//! checked independently even when earlier ones fail.

use serde::Serialize;

use crate::probe::ProbeOutcome;
use crate::registry::{Registry, Requirement};
use crate::version::Version;

/// The outcome of checking one requirement.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum CheckOutcome {
    /// Package loaded and, if a minimum was configured, satisfies it.
    /// `version` is what the package reported, when available.
    Satisfied {
        #[serde(skip_serializing_if = "Option::is_none")]
        version: Option<String>,
    },

    /// Package could not be located or failed to initialize. Also used when
    /// a minimum is configured but the package reports no version at all:
    /// an unverifiable requirement is treated as not loaded.
    LoadFailure { message: String },

    /// Package loaded but its version is below the configured minimum.
    VersionTooLow { required: String, installed: String },
}

impl CheckOutcome {
    /// Whether this outcome counts as an error.
    pub fn errored(&self) -> bool {
        !matches!(self, CheckOutcome::Satisfied { .. })
    }
}

/// Outcome of one requirement, tagged with its name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// Whether this result counts as an error.
    pub fn errored(&self) -> bool {
        self.outcome.errored()
    }
}

/// Checks requirements against the system.
pub struct Checker<'a> {
    registry: &'a Registry,
}

impl<'a> Checker<'a> {
    /// Create a checker over a registry.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Check a single requirement.
    ///
    /// 1. Probe for the package. Load failure resolves to
    ///    [`CheckOutcome::LoadFailure`].
    /// 2. With a configured minimum, compare the reported version leniently;
    ///    installed < minimum resolves to [`CheckOutcome::VersionTooLow`].
    /// 3. Otherwise the requirement is satisfied.
    pub fn check_package(&self, requirement: &Requirement) -> CheckOutcome {
        let version = match requirement.probe.run(self.registry.interpreter()) {
            ProbeOutcome::LoadFailed { message } => {
                return CheckOutcome::LoadFailure { message }
            }
            ProbeOutcome::Loaded { version } => version,
        };

        let Some(minimum) = &requirement.minimum else {
            return CheckOutcome::Satisfied { version };
        };

        let Some(installed) = version else {
            return CheckOutcome::LoadFailure {
                message: format!(
                    "loaded, but reports no version (minimum {} required)",
                    minimum
                ),
            };
        };

        if Version::parse(&installed).satisfies(&Version::parse(minimum)) {
            CheckOutcome::Satisfied {
                version: Some(installed),
            }
        } else {
            CheckOutcome::VersionTooLow {
                required: minimum.clone(),
                installed,
            }
        }
    }

    /// Check one requirement by name from the registry.
    pub fn check_named(&self, name: &str) -> Option<CheckResult> {
        self.registry.get(name).map(|req| CheckResult {
            name: req.name.clone(),
            outcome: self.check_package(req),
        })
    }
}

/// Aggregate verdict: errored iff at least one result errored.
pub fn any_errored(results: &[CheckResult]) -> bool {
    results.iter().any(CheckResult::errored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::VersionProbe;

    /// A requirement whose probe echoes a fixed version string.
    fn echo_requirement(name: &str, reported: &str, minimum: Option<&str>) -> Requirement {
        Requirement {
            name: name.to_string(),
            minimum: minimum.map(String::from),
            probe: VersionProbe::Command {
                command: "echo".to_string(),
                args: vec![reported.to_string()],
                pattern: None,
            },
        }
    }

    fn missing_requirement(name: &str, minimum: Option<&str>) -> Requirement {
        Requirement {
            name: name.to_string(),
            minimum: minimum.map(String::from),
            probe: VersionProbe::Command {
                command: "definitely-not-a-real-binary-xyz".to_string(),
                args: vec![],
                pattern: None,
            },
        }
    }

    #[test]
    fn missing_package_is_load_failure() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&missing_requirement("numpy", Some("1.6")));
        assert!(matches!(outcome, CheckOutcome::LoadFailure { .. }));
        assert!(outcome.errored());
    }

    #[test]
    fn missing_package_without_minimum_still_errors() {
        // With no minimum, errored iff the package fails to load
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&missing_requirement("glue", None));
        assert!(outcome.errored());
    }

    #[test]
    fn equal_version_satisfies_minimum() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&echo_requirement("scipy", "0.15", Some("0.15")));
        assert_eq!(
            outcome,
            CheckOutcome::Satisfied {
                version: Some("0.15".to_string())
            }
        );
        assert!(!outcome.errored());
    }

    #[test]
    fn lenient_comparison_tolerates_segment_counts() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&echo_requirement("numpy", "1.6.0", Some("1.6")));
        assert!(!outcome.errored());
    }

    #[test]
    fn version_below_minimum_errors_with_both_versions() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&echo_requirement("pandas", "0.17.0", Some("0.17.1")));
        assert_eq!(
            outcome,
            CheckOutcome::VersionTooLow {
                required: "0.17.1".to_string(),
                installed: "0.17.0".to_string(),
            }
        );
        assert!(outcome.errored());
    }

    #[test]
    fn no_minimum_passes_regardless_of_version() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&echo_requirement("glue", "0.0.1-weird", None));
        assert!(!outcome.errored());
    }

    #[test]
    fn loaded_without_version_and_minimum_is_load_failure() {
        // Open design point resolved: unverifiable counts as not loaded
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&echo_requirement("mystery", "no digits", Some("1.0")));
        match outcome {
            CheckOutcome::LoadFailure { ref message } => {
                assert!(message.contains("reports no version"));
            }
            ref other => panic!("expected LoadFailure, got {:?}", other),
        }
    }

    #[test]
    fn loaded_without_version_and_no_minimum_passes() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let outcome = checker.check_package(&echo_requirement("mystery", "no digits", None));
        assert_eq!(outcome, CheckOutcome::Satisfied { version: None });
    }

    #[test]
    fn check_is_idempotent() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        let req = echo_requirement("scipy", "0.15", Some("0.15"));
        assert_eq!(checker.check_package(&req), checker.check_package(&req));
    }

    #[test]
    fn check_named_unknown_is_none() {
        let registry = Registry::builtin();
        let checker = Checker::new(&registry);
        assert!(checker.check_named("not-in-registry").is_none());
    }

    #[test]
    fn any_errored_is_logical_or() {
        let ok = CheckResult {
            name: "a".to_string(),
            outcome: CheckOutcome::Satisfied { version: None },
        };
        let bad = CheckResult {
            name: "b".to_string(),
            outcome: CheckOutcome::LoadFailure {
                message: "gone".to_string(),
            },
        };
        assert!(!any_errored(&[ok.clone()]));
        assert!(any_errored(&[ok.clone(), bad.clone()]));
        assert!(any_errored(&[bad.clone(), ok]));
        assert!(!any_errored(&[]));
    }

    #[test]
    fn check_result_serializes_with_status_tag() {
        let result = CheckResult {
            name: "pandas".to_string(),
            outcome: CheckOutcome::VersionTooLow {
                required: "0.17.1".to_string(),
                installed: "0.17.0".to_string(),
            },
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["name"], "pandas");
        assert_eq!(json["status"], "version-too-low");
        assert_eq!(json["required"], "0.17.1");
        assert_eq!(json["installed"], "0.17.0");
    }
}
