//! Markdown cross-reference resolution.
//!
//! Scans every `.md` file under the source root for inline links of the
//! form `[text](target)` and verifies that relative targets resolve to
//! existing files. External URLs, same-document anchors, links inside
//! fenced code blocks, and targets that resolve outside the source root
//! are unverifiable and skipped without error.
//!
//! The fenced-block test is a textual heuristic, not a markdown parser:
//! triple-backtick markers are paired in document order and anything
//! between a pair counts as "inside". Documents with an odd number of
//! fence markers or nested fences get best-effort behavior. Known
//! limitation.

use regex::Regex;
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());

static FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").unwrap());

/// One discovered link, scoped to a single scan pass.
#[derive(Debug, Clone)]
pub struct LinkReference {
    /// Root-relative path of the containing markdown file.
    pub source: PathBuf,
    /// 1-based line number of the link's opening bracket.
    pub line: usize,
    /// The `[text]` portion.
    pub text: String,
    /// The raw `(target)` portion, fragment included.
    pub target: String,
}

impl LinkReference {
    fn broken_link_error(&self) -> String {
        format!(
            "{}:{}: broken link [{}]({})",
            self.source.display(),
            self.line,
            self.text,
            self.target
        )
    }
}

/// Verify every internal markdown link under `root`.
///
/// Returns accumulated error strings across all files, in scan order;
/// empty when every internal link resolves. Read-only.
pub fn check(root: &Path) -> Vec<String> {
    let mut errors = Vec::new();
    let mut files = Vec::new();
    collect_markdown(root, &mut files);

    for md_file in files {
        // Lossy decode: invalid UTF-8 must never abort a scan.
        let Ok(bytes) = std::fs::read(&md_file) else {
            continue;
        };
        let content = String::from_utf8_lossy(&bytes);
        check_file(root, &md_file, &content, &mut errors);
    }

    errors
}

/// Scan one file's content for broken internal links.
fn check_file(root: &Path, md_file: &Path, content: &str, errors: &mut Vec<String>) {
    let rel_path = md_file.strip_prefix(root).unwrap_or(md_file).to_path_buf();
    let fences = fence_spans(content);
    let md_dir = md_file.parent().unwrap_or(root);

    for m in LINK_RE.captures_iter(content) {
        let whole = m.get(0).unwrap();
        let text = &m[1];
        let target = &m[2];

        if has_external_scheme(target) {
            continue;
        }
        if target.starts_with('#') {
            continue;
        }
        // Links inside code blocks are examples, not real references.
        if in_fenced_block(&fences, whole.start()) {
            continue;
        }

        // Strip any #fragment, then ignore empty remainders.
        let target_path = target.split('#').next().unwrap_or("");
        if target_path.is_empty() {
            continue;
        }

        let resolved = normalize(&md_dir.join(target_path));
        if !resolved.starts_with(root) {
            // Target lives in the eventual host project; can't validate.
            tracing::debug!(link = target, "link resolves outside the source root");
            continue;
        }

        if !resolved.exists() {
            let line = line_number(content, whole.start());
            let reference = LinkReference {
                source: rel_path.clone(),
                line,
                text: text.to_string(),
                target: target.to_string(),
            };
            errors.push(reference.broken_link_error());
        }
    }
}

/// Recursively gather `.md` files, sorted per directory for stable output.
fn collect_markdown(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            collect_markdown(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "md") {
            out.push(path);
        }
    }
}

fn has_external_scheme(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with("mailto:")
}

/// Byte ranges covered by paired triple-backtick fences.
fn fence_spans(content: &str) -> Vec<Range<usize>> {
    FENCE_RE.find_iter(content).map(|m| m.range()).collect()
}

fn in_fenced_block(spans: &[Range<usize>], pos: usize) -> bool {
    spans.iter().any(|span| span.contains(&pos))
}

/// 1-based line number of a byte offset.
fn line_number(content: &str, pos: usize) -> usize {
    content.as_bytes()[..pos].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Lexical path normalization.
///
/// `fs::canonicalize` fails on paths that do not exist, and a missing
/// target is exactly the case being detected, so `..` and `.` components
/// are folded without touching the filesystem. Symlinks are not resolved.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root_with(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        for (rel, content) in files {
            let path = temp.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
        }
        let canonical = temp.path().canonicalize().unwrap();
        (temp, canonical)
    }

    #[test]
    fn link_to_existing_sibling_is_clean() {
        let (_temp, root) = root_with(&[
            ("README.md", "see [guide](GUIDE.md)\n"),
            ("GUIDE.md", "# Guide\n"),
        ]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn broken_link_reports_file_line_text_and_target() {
        let (_temp, root) = root_with(&[("README.md", "intro\n\nsee [gone](missing.md)\n")]);
        let errors = check(&root);
        assert_eq!(
            errors,
            vec!["README.md:3: broken link [gone](missing.md)".to_string()]
        );
    }

    #[test]
    fn external_urls_are_skipped() {
        let (_temp, root) = root_with(&[(
            "README.md",
            "[a](https://example.com/x.md) [b](http://example.com) [c](mailto:x@y.z)\n",
        )]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn anchor_only_links_are_skipped() {
        let (_temp, root) = root_with(&[("README.md", "[top](#top) [s](#a-section)\n")]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn links_inside_fenced_blocks_are_skipped() {
        let (_temp, root) = root_with(&[(
            "README.md",
            "before\n\n```\n[example](does-not-exist.md)\n```\n\nafter\n",
        )]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn link_after_a_closed_fence_is_still_checked() {
        let (_temp, root) = root_with(&[(
            "README.md",
            "```\ncode\n```\n\n[real](missing.md)\n",
        )]);
        let errors = check(&root);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("README.md:5"));
    }

    #[test]
    fn fragment_is_stripped_before_resolution() {
        let (_temp, root) = root_with(&[
            ("README.md", "[s](GUIDE.md#setup)\n"),
            ("GUIDE.md", "# Guide\n## Setup\n"),
        ]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn out_of_tree_targets_are_skipped() {
        let (_temp, root) = root_with(&[("docs/README.md", "[up](../../outside.md)\n")]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn target_resolves_relative_to_containing_file() {
        let (_temp, root) = root_with(&[
            ("docs/README.md", "[plan](plans/TEMPLATE.md)\n"),
            ("docs/plans/TEMPLATE.md", "# Template\n"),
        ]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn parent_traversal_inside_the_tree_is_checked() {
        let (_temp, root) = root_with(&[("docs/README.md", "[x](../missing.md)\n")]);
        let errors = check(&root);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("docs/README.md:1"));
    }

    #[test]
    fn non_markdown_files_are_not_scanned() {
        let (_temp, root) = root_with(&[("notes.txt", "[x](missing.md)\n")]);
        assert_eq!(check(&root), Vec::<String>::new());
    }

    #[test]
    fn normalize_folds_dot_and_dotdot() {
        assert_eq!(
            normalize(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
    }

    #[test]
    fn line_number_is_one_based() {
        assert_eq!(line_number("abc", 0), 1);
        assert_eq!(line_number("a\nb\nc", 4), 3);
    }
}
