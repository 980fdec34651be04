//! Shared fixture: a complete, installable toolkit tree.
//!
//! Builds every manifest-required file plus a working `install.sh` whose
//! observable behavior (files placed, hooks-path config, commit-msg
//! accept/reject) matches what the install check asserts.

use metacheck::manifest;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Toolkit {
    // Held for its Drop; the tree lives inside it.
    _temp: TempDir,
    pub root: PathBuf,
}

/// Commit-msg hook that enforces a bracketed category prefix.
pub const STRICT_COMMIT_MSG_HOOK: &str = r#"#!/bin/sh
head -n1 "$1" | grep -qE '^\[[A-Za-z][A-Za-z -]*\]' || {
    echo "commit message must start with a [Category] prefix" >&2
    exit 1
}
"#;

/// Defective commit-msg hook that accepts any message.
pub const LAX_COMMIT_MSG_HOOK: &str = "#!/bin/sh\nexit 0\n";

/// Render an `install.sh` that places the expected minimal/full file
/// sets, installs the given commit-msg hook, and points
/// `core.hooksPath` at the hooks directory.
pub fn install_script(commit_msg_hook: &str) -> String {
    format!(
        r#"#!/usr/bin/env bash
set -euo pipefail

target="$1"
mode="${{2:---minimal}}"

mkdir -p "$target/hooks" "$target/docs/plans" "$target/scripts/meta" "$target/.claude/hooks"

touch "$target/meta-process.yaml" \
      "$target/docs/plans/TEMPLATE.md" \
      "$target/docs/plans/CLAUDE.md" \
      "$target/CLAUDE.md" \
      "$target/ISSUES.md" \
      "$target/scripts/meta/parse_plan.py" \
      "$target/.claude/settings.json" \
      "$target/.claude/hooks/track-reads.sh" \
      "$target/.claude/hooks/gate-edit.sh" \
      "$target/.claude/hooks/post-edit-quiz.sh"

printf '#!/bin/sh\nexit 0\n' > "$target/hooks/pre-commit"
printf '#!/bin/sh\nexit 0\n' > "$target/hooks/post-commit"

cat > "$target/hooks/commit-msg" <<'HOOK'
{commit_msg_hook}HOOK

chmod +x "$target/hooks/pre-commit" "$target/hooks/post-commit" "$target/hooks/commit-msg"

git -C "$target" config core.hooksPath hooks

if [ "$mode" = "--full" ]; then
    mkdir -p "$target/acceptance_gates" \
             "$target/.claude/hooks/worktree-coordination" \
             "$target/scripts/meta/worktree-coordination" \
             "$target/docs/meta-patterns/worktree-coordination" \
             "$target/docs/adr"
    touch "$target/acceptance_gates/EXAMPLE.yaml" \
          "$target/scripts/relationships.yaml" \
          "$target/.claude/hooks/protect-main.sh" \
          "$target/.claude/hooks/check-references-reviewed.sh" \
          "$target/.claude/hooks/worktree-coordination/block-cd-worktree.sh" \
          "$target/scripts/meta/check_doc_coupling.py" \
          "$target/scripts/meta/worktree-coordination/check_claims.py" \
          "$target/docs/meta-patterns/01_README.md" \
          "$target/docs/meta-patterns/worktree-coordination/18_claim-system.md" \
          "$target/docs/adr/CLAUDE.md"
fi
"#
    )
}

/// Build a complete toolkit tree with a working installer.
pub fn build_toolkit() -> Toolkit {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();

    for rel in manifest::required_paths() {
        write_file(&root.join(&rel), "");
    }

    // Give the docs a real internal cross-reference so the link check
    // exercises resolution, not just empty files.
    write_file(
        &root.join("README.md"),
        "# Toolkit\n\nStart with [the guide](GETTING_STARTED.md).\n",
    );
    write_file(&root.join("GETTING_STARTED.md"), "# Getting Started\n");

    write_executable(
        &root.join("install.sh"),
        &install_script(STRICT_COMMIT_MSG_HOOK),
    );

    Toolkit { _temp: temp, root }
}

pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn write_executable(path: &Path, content: &str) {
    write_file(path, content);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
