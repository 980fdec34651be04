//! Sandboxed end-to-end install verification.
//!
//! The one check that executes external processes and mutates state - all
//! of it inside disposable [`tempfile::TempDir`] sandboxes whose `Drop`
//! guarantees removal on every exit path, including early returns after a
//! fatal installer failure.
//!
//! For each mode a fresh git repository is initialized, seeded with one
//! commit, and handed to `install.sh`. A failed install is fatal only to
//! that mode's remaining assertions; the other mode still runs against its
//! own independent sandbox. Minimal mode additionally probes the installed
//! commit-msg hook from both sides: a recognized bracketed prefix must be
//! accepted, and an unprefixed message must be rejected.

use crate::error::Result;
use crate::proc::{self, CommandResult};
use std::ffi::OsString;
use std::fs;
use std::path::Path;

/// Install modes exercised against the installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    Minimal,
    Full,
}

impl InstallMode {
    /// Flag passed to `install.sh`.
    pub fn flag(self) -> &'static str {
        match self {
            InstallMode::Minimal => "--minimal",
            InstallMode::Full => "--full",
        }
    }

    /// Label used in behavioral-mismatch error messages.
    fn label(self) -> &'static str {
        match self {
            InstallMode::Minimal => "Minimal",
            InstallMode::Full => "Full",
        }
    }
}

/// Expected observable outcome of one install mode.
#[derive(Debug, Clone, Copy)]
pub struct InstallExpectation {
    pub mode: InstallMode,
    /// Files the installer must place, relative to the target project.
    pub expected_files: &'static [&'static str],
    /// Required `core.hooksPath` value after install.
    pub hooks_path: &'static str,
    /// Whether to run the commit-message accept/reject probes.
    pub probe_commit_hook: bool,
}

/// Post-install contract for `--minimal`.
pub const MINIMAL: InstallExpectation = InstallExpectation {
    mode: InstallMode::Minimal,
    expected_files: &[
        "meta-process.yaml",
        "hooks/pre-commit",
        "hooks/commit-msg",
        "hooks/post-commit",
        "docs/plans/TEMPLATE.md",
        "docs/plans/CLAUDE.md",
        "CLAUDE.md",
        "ISSUES.md",
        "scripts/meta/parse_plan.py",
        ".claude/settings.json",
        ".claude/hooks/track-reads.sh",
        ".claude/hooks/gate-edit.sh",
        ".claude/hooks/post-edit-quiz.sh",
    ],
    hooks_path: "hooks",
    probe_commit_hook: true,
};

/// Post-install contract for `--full`: everything minimal places, plus
/// acceptance gates, relationship metadata, extended assistant hooks,
/// coordination scripts, and pattern docs.
pub const FULL: InstallExpectation = InstallExpectation {
    mode: InstallMode::Full,
    expected_files: &[
        "acceptance_gates/EXAMPLE.yaml",
        "scripts/relationships.yaml",
        ".claude/hooks/protect-main.sh",
        ".claude/hooks/check-references-reviewed.sh",
        ".claude/hooks/worktree-coordination/block-cd-worktree.sh",
        "scripts/meta/check_doc_coupling.py",
        "scripts/meta/worktree-coordination/check_claims.py",
        "docs/meta-patterns/01_README.md",
        "docs/meta-patterns/worktree-coordination/18_claim-system.md",
        "docs/adr/CLAUDE.md",
    ],
    hooks_path: "hooks",
    probe_commit_hook: false,
};

/// Commit message the installed hook must accept.
const GOOD_COMMIT_MESSAGE: &str = "[Trivial] Test commit";

/// Commit message the installed hook must reject.
const BAD_COMMIT_MESSAGE: &str = "bad message no prefix";

/// Run the install check: both modes, each against its own sandbox.
///
/// Collected strings describe installer failures and behavioral
/// mismatches; an `Err` means the check infrastructure itself broke
/// (sandbox creation, unspawnable git).
pub fn check(root: &Path) -> Result<Vec<String>> {
    let mut errors = Vec::new();
    verify_mode(root, &MINIMAL, &mut errors)?;
    verify_mode(root, &FULL, &mut errors)?;
    Ok(errors)
}

/// Exercise one install mode inside a fresh sandbox.
fn verify_mode(root: &Path, expect: &InstallExpectation, errors: &mut Vec<String>) -> Result<()> {
    // TempDir removal on drop covers every exit path below.
    let sandbox = tempfile::Builder::new()
        .prefix("meta-process-test-")
        .tempdir()?;
    let project = sandbox.path().join("test-project");
    fs::create_dir(&project)?;

    tracing::debug!(mode = expect.mode.flag(), project = %project.display(), "sandbox ready");

    init_seeded_repo(&project)?;

    let installer = root.join("install.sh");
    let result = proc::run(
        "bash",
        [
            installer.as_os_str().to_os_string(),
            project.as_os_str().to_os_string(),
            OsString::from(expect.mode.flag()),
        ],
        None,
    )?;
    if !result.success {
        // Fatal for this mode's remaining assertions only.
        errors.push(format!(
            "install.sh {} failed:\n{}",
            expect.mode.flag(),
            result.stderr
        ));
        return Ok(());
    }

    for file in expect.expected_files {
        if !project.join(file).exists() {
            errors.push(format!("{} install missing: {}", expect.mode.label(), file));
        }
    }

    let hooks_path = git(&project, &["config", "core.hooksPath"])?;
    if hooks_path.stdout.trim() != expect.hooks_path {
        errors.push(format!(
            "Git hooks path not set correctly: '{}'",
            hooks_path.stdout.trim()
        ));
    }

    if expect.probe_commit_hook {
        probe_commit_messages(&project, errors)?;
    }

    Ok(())
}

/// `git init` plus identity and one seed commit, hooks bypassed.
fn init_seeded_repo(project: &Path) -> Result<()> {
    git_ok(project, &["init"])?;
    git_ok(project, &["config", "user.email", "test@test.com"])?;
    git_ok(project, &["config", "user.name", "Test"])?;

    fs::write(project.join("README.md"), "# Test Project\n")?;
    git_ok(project, &["add", "README.md"])?;
    git_ok(project, &["commit", "--no-verify", "-m", "Initial commit"])?;
    Ok(())
}

/// Probe the installed commit-msg hook from both sides.
fn probe_commit_messages(project: &Path, errors: &mut Vec<String>) -> Result<()> {
    let test_file = project.join("test.txt");

    fs::write(&test_file, "hello\n")?;
    git_ok(project, &["add", "test.txt"])?;
    let good = git(project, &["commit", "-m", GOOD_COMMIT_MESSAGE])?;
    if !good.success {
        errors.push(format!(
            "Good commit blocked by hooks:\nstdout: {}\nstderr: {}",
            good.stdout, good.stderr
        ));
    }

    fs::write(&test_file, "hello again\n")?;
    git_ok(project, &["add", "test.txt"])?;
    let bad = git(project, &["commit", "-m", BAD_COMMIT_MESSAGE])?;
    if bad.success {
        // A hook that fails to reject malformed messages is itself a defect.
        errors.push("Bad commit message was NOT rejected by commit-msg hook".to_string());
    }

    Ok(())
}

fn git(project: &Path, args: &[&str]) -> Result<CommandResult> {
    let mut full: Vec<OsString> = vec![OsString::from("-C"), project.into()];
    full.extend(args.iter().map(OsString::from));
    proc::run("git", full, None)
}

fn git_ok(project: &Path, args: &[&str]) -> Result<CommandResult> {
    let mut full: Vec<OsString> = vec![OsString::from("-C"), project.into()];
    full.extend(args.iter().map(OsString::from));
    proc::run_ok("git", full, None)
}
