//! Toolkit source-root discovery.
//!
//! The binary is expected to live in the toolkit's `scripts/` directory,
//! so the executable's own parent is tried first, then the working
//! directory's `meta-process/` child. An explicit `--root` wins over both
//! but is still validated against the layout.

use crate::error::{MetacheckError, Result};
use std::path::{Path, PathBuf};

/// Whether a directory looks like a toolkit source tree.
pub fn is_toolkit_root(dir: &Path) -> bool {
    dir.join("install.sh").is_file()
}

/// Locate the toolkit source root.
///
/// Resolution order: explicit override, executable-directory heuristic,
/// `<cwd>/meta-process/`. The returned path is canonical so link targets
/// can be containment-tested against it. Failure maps to exit status 2.
pub fn find(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        if is_toolkit_root(dir) {
            return Ok(dir.canonicalize()?);
        }
        return Err(MetacheckError::InvalidRoot {
            path: dir.to_path_buf(),
        });
    }

    // Installed into the toolkit tree: <root>/scripts/metacheck.
    if let Some(root) = root_from_executable() {
        return Ok(root);
    }

    // Invoked from a host repo that vendors the toolkit.
    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join("meta-process");
        if is_toolkit_root(&candidate) {
            return Ok(candidate.canonicalize()?);
        }
    }

    Err(MetacheckError::RootNotFound)
}

fn root_from_executable() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?.canonicalize().ok()?;
    let script_dir = exe.parent()?;
    if script_dir.file_name()? == "scripts" {
        let root = script_dir.parent()?;
        if is_toolkit_root(root) {
            return Some(root.to_path_buf());
        }
    }
    None
}
