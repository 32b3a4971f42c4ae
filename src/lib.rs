//! envcheck - Preflight checker for required packages and minimum versions.
//!
//! envcheck verifies that a set of named packages are present on the system
//! and meet minimum version requirements, printing a human-readable pass/fail
//! report. It is a preflight check for a training environment: every package
//! is checked independently, diagnostics go to stdout, and the run ends with
//! a single aggregate verdict.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`checker`] - Per-package check logic and outcomes
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Version probes (python modules, arbitrary commands)
//! - [`registry`] - Requirement table and config file loading
//! - [`report`] - Human-readable and JSON reporting
//! - [`version`] - Lenient version ordering
//!
//! # Example
//!
//! ```
//! use envcheck::version::Version;
//!
//! // Lenient comparison tolerates differing segment counts
//! assert!(Version::parse("1.6").satisfies(&Version::parse("1.6.0")));
//! assert!(Version::parse("0.17.1").satisfies(&Version::parse("0.17")));
//! assert!(!Version::parse("0.17.0").satisfies(&Version::parse("0.17.1")));
//! ```

pub mod checker;
pub mod cli;
pub mod error;
pub mod probe;
pub mod registry;
pub mod report;
pub mod version;

pub use error::{EnvcheckError, Result};
