//! Error types for envcheck operations.
//!
//! This module defines [`EnvcheckError`], the error type for the ambient
//! surface (config loading, probe definitions, IO), and a [`Result`] alias.
//!
//! Per-package check failures are deliberately NOT represented here: a
//! package that fails to load or reports a too-low version is recovered at
//! the point of the check and surfaced as printed diagnostics plus a boolean
//! (see [`crate::checker::CheckOutcome`]). Nothing per-package escapes to the
//! process level.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envcheck operations.
#[derive(Debug, Error)]
pub enum EnvcheckError {
    /// Explicitly requested configuration file not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A requirement's probe definition is unusable (e.g., bad regex).
    #[error("Invalid probe for requirement '{requirement}': {message}")]
    InvalidProbe {
        requirement: String,
        message: String,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envcheck operations.
pub type Result<T> = std::result::Result<T, EnvcheckError>;
