//! Check sequencing, rendering, and exit status.
//!
//! The driver owns the fixed check order (manifest, links, install), the
//! section-by-section human rendering, the optional JSON report, and the
//! mapping from accumulated error counts to the process exit status.

use crate::error::Result;
use crate::{install, links, manifest};
use console::style;
use serde::Serialize;
use std::path::Path;

/// Which checks to run. Flags are additive; none selected means all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub files: bool,
    pub links: bool,
    pub install: bool,
}

impl Selection {
    /// Every check.
    pub fn all() -> Self {
        Self {
            files: true,
            links: true,
            install: true,
        }
    }

    /// Interpret the three CLI flags; absence of all means "run all".
    pub fn from_flags(files: bool, links: bool, install: bool) -> Self {
        if !files && !links && !install {
            Self::all()
        } else {
            Self {
                files,
                links,
                install,
            }
        }
    }
}

/// The three checks, in their fixed execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Files,
    Links,
    Install,
}

impl CheckKind {
    fn header(self) -> &'static str {
        match self {
            CheckKind::Files => "File Existence Check",
            CheckKind::Links => "Markdown Link Check",
            CheckKind::Install => "Install Test",
        }
    }
}

/// Outcome of one check section.
#[derive(Debug, Serialize)]
pub struct SectionReport {
    pub check: CheckKind,
    pub errors: Vec<String>,
    pub passed: bool,
}

/// Outcome of a whole run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub root: String,
    pub sections: Vec<SectionReport>,
    pub total_errors: usize,
    pub passed: bool,
}

/// Run the selected checks against `root` and render the report.
///
/// Returns the process exit status: 0 when every selected check was
/// clean, 1 when any check collected errors.
pub fn run(root: &Path, selection: Selection, json: bool) -> Result<u8> {
    if !json {
        println!("Framework root: {}", root.display());
        println!();
    }

    let mut sections = Vec::new();

    if selection.files {
        let errors = manifest::check(root);
        sections.push(section(CheckKind::Files, errors, json));
    }

    if selection.links {
        let errors = links::check(root);
        sections.push(section(CheckKind::Links, errors, json));
    }

    if selection.install {
        let errors = install::check(root)?;
        sections.push(section(CheckKind::Install, errors, json));
    }

    let total_errors: usize = sections.iter().map(|s| s.errors.len()).sum();
    let report = RunReport {
        root: root.display().to_string(),
        sections,
        total_errors,
        passed: total_errors == 0,
    };

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
        println!("{rendered}");
    } else {
        println!();
        if report.passed {
            println!("{}", style("ALL CHECKS PASSED").green().bold());
        } else {
            println!(
                "{}",
                style(format!("FAILED: {} error(s)", report.total_errors))
                    .red()
                    .bold()
            );
        }
    }

    Ok(if report.passed { 0 } else { 1 })
}

fn section(check: CheckKind, errors: Vec<String>, json: bool) -> SectionReport {
    if !json {
        println!("=== {} ===", style(check.header()).bold());
        if errors.is_empty() {
            println!("  {}", style("OK").green());
        } else {
            for error in &errors {
                println!("  {} {}", style("ERROR:").red(), error);
            }
        }
        println!();
    }

    tracing::debug!(check = ?check, errors = errors.len(), "section finished");

    SectionReport {
        passed: errors.is_empty(),
        check,
        errors,
    }
}
