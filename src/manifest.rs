//! Required-file manifest verification.
//!
//! The installer guarantees a fixed set of files to every target project.
//! This module holds that contract as a static configuration table - one
//! [`CategorySpec`] per category, each with a base directory and an ordered
//! required-path list - and checks that every entry exists in the source
//! tree. The table must be kept in lockstep with what `install.sh` copies.
//!
//! Existence only; file content is never inspected.

use std::path::{Path, PathBuf};

/// The closed set of manifest categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    CoreScripts,
    FullModeScripts,
    WorktreeScripts,
    GitHooks,
    CoreClaudeHooks,
    WorktreeClaudeHooks,
    Templates,
    Docs,
    PatternIndex,
}

/// One manifest category: label for error messages, base directory under
/// the source root, and the ordered list of required relative paths.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub label: &'static str,
    pub base: &'static str,
    pub required: &'static [&'static str],
}

/// The authoritative manifest, in check order.
pub const MANIFEST: &[CategorySpec] = &[
    CategorySpec {
        category: Category::CoreScripts,
        label: "core script",
        base: "scripts",
        required: &[
            "check_plan_tests.py",
            "check_plan_blockers.py",
            "complete_plan.py",
            "parse_plan.py",
            "sync_plan_status.py",
            "merge_pr.py",
            "generate_quiz.py",
        ],
    },
    CategorySpec {
        category: Category::FullModeScripts,
        label: "full-mode script",
        base: "scripts",
        required: &[
            "check_doc_coupling.py",
            "sync_governance.py",
            "check_mock_usage.py",
            "check_locked_files.py",
        ],
    },
    CategorySpec {
        category: Category::WorktreeScripts,
        label: "worktree script",
        base: "scripts/worktree-coordination",
        required: &[
            "check_claims.py",
            "safe_worktree_remove.py",
            "finish_pr.py",
            "meta_status.py",
            "check_messages.py",
            "send_message.py",
        ],
    },
    CategorySpec {
        category: Category::GitHooks,
        label: "git hook",
        base: "hooks/git",
        required: &["pre-commit", "commit-msg", "post-commit"],
    },
    CategorySpec {
        category: Category::CoreClaudeHooks,
        label: "core Claude hook",
        base: "hooks/claude",
        required: &[
            "protect-main.sh",
            "check-hook-enabled.sh",
            "check-references-reviewed.sh",
            "track-reads.sh",
            "gate-edit.sh",
            "post-edit-quiz.sh",
        ],
    },
    CategorySpec {
        category: Category::WorktreeClaudeHooks,
        label: "worktree Claude hook",
        base: "hooks/claude/worktree-coordination",
        required: &[
            "protect-main.sh",
            "block-cd-worktree.sh",
            "block-worktree-remove.sh",
            "check-cwd-valid.sh",
            "warn-worktree-cwd.sh",
            "check-file-scope.sh",
            "enforce-make-merge.sh",
            "check-inbox.sh",
            "notify-inbox-startup.sh",
        ],
    },
    CategorySpec {
        category: Category::Templates,
        label: "template",
        base: "templates",
        required: &[
            "meta-process.yaml.example",
            "plan.md.template",
            "plans-index.md.template",
            "issues.md.template",
            "Makefile.meta",
            "CLAUDE.md.root",
            "CLAUDE.md.scripts",
            "CLAUDE.md.tests",
            "CLAUDE.md.docs-adr",
            "doc_coupling.yaml.example",
            "acceptance_gate.yaml.example",
        ],
    },
    CategorySpec {
        category: Category::Docs,
        label: "documentation",
        base: "",
        required: &["README.md", "GETTING_STARTED.md", "CLAUDE.md", "ISSUES.md"],
    },
    CategorySpec {
        category: Category::PatternIndex,
        label: "pattern index",
        base: "patterns",
        required: &["01_README.md"],
    },
];

impl CategorySpec {
    /// Root-relative path for one required entry.
    fn relative_path(&self, name: &str) -> PathBuf {
        if self.base.is_empty() {
            PathBuf::from(name)
        } else {
            Path::new(self.base).join(name)
        }
    }
}

/// Verify that every manifest entry exists under `root`.
///
/// Returns one error string per missing path, in table order; empty when
/// the tree is complete. Read-only.
pub fn check(root: &Path) -> Vec<String> {
    let mut errors = Vec::new();

    for spec in MANIFEST {
        for name in spec.required {
            let rel = spec.relative_path(name);
            if !root.join(&rel).exists() {
                errors.push(format!("Missing {}: {}", spec.label, rel.display()));
            }
        }
        tracing::debug!(category = ?spec.category, "manifest category checked");
    }

    errors
}

/// Iterate every root-relative path the manifest requires.
pub fn required_paths() -> impl Iterator<Item = PathBuf> {
    MANIFEST
        .iter()
        .flat_map(|spec| spec.required.iter().map(|name| spec.relative_path(name)))
}
