//! Error types for metacheck operations.
//!
//! This module defines [`MetacheckError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Check findings (a missing file, a broken link, a misbehaving hook) are
//! *not* errors: every checker is a pure collector that returns them as
//! plain strings for the report. `MetacheckError` covers infrastructure
//! faults only - a sandbox that cannot be created, a git binary that cannot
//! be spawned - which abort the run.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for metacheck operations.
#[derive(Debug, Error)]
pub enum MetacheckError {
    /// The toolkit source root could not be located.
    #[error("Cannot find meta-process/ directory")]
    RootNotFound,

    /// An explicitly supplied root does not look like a toolkit tree.
    #[error("Not a toolkit root (no install.sh): {path}")]
    InvalidRoot { path: PathBuf },

    /// An external command could not be spawned or exited non-zero where
    /// success was required for the check to proceed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for metacheck operations.
pub type Result<T> = std::result::Result<T, MetacheckError>;
