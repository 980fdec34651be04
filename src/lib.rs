//! Metacheck - self-test harness for the meta-process scaffolding toolkit.
//!
//! The toolkit itself is a tree of scripts, git lifecycle hooks, assistant
//! hooks, and templates placed into host projects by `install.sh`. Metacheck
//! verifies that the tree is internally consistent:
//!
//! 1. Every file the installer promises to place exists in the source tree.
//! 2. Every relative markdown cross-reference resolves to a real file.
//! 3. Installing into a fresh repository actually produces working hooks.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`install`] - Sandboxed end-to-end install verification
//! - [`links`] - Markdown cross-reference resolution
//! - [`manifest`] - Required-file manifest verification
//! - [`proc`] - External process execution
//! - [`report`] - Check sequencing, rendering, and exit status
//! - [`root`] - Toolkit source-root discovery
//!
//! # Example
//!
//! ```no_run
//! use metacheck::report::{self, Selection};
//! use std::path::Path;
//!
//! let root = Path::new("/path/to/meta-process");
//! let exit = report::run(root, Selection::all(), false).unwrap();
//! assert_eq!(exit, 0);
//! ```

pub mod cli;
pub mod error;
pub mod install;
pub mod links;
pub mod manifest;
pub mod proc;
pub mod report;
pub mod root;

pub use error::{MetacheckError, Result};
