//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. The three check-selection
//! flags are additive; passing none of them runs every check.

use clap::Parser;
use std::path::PathBuf;

/// Self-test harness for the meta-process scaffolding toolkit.
#[derive(Debug, Parser)]
#[command(name = "metacheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run the file existence check only
    #[arg(long)]
    pub files: bool,

    /// Run the markdown link check only
    #[arg(long)]
    pub links: bool,

    /// Run the install test only
    #[arg(long)]
    pub install: bool,

    /// Path to the toolkit root (overrides auto-detection)
    #[arg(short, long, env = "METACHECK_ROOT")]
    pub root: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_parses() {
        let cli = Cli::parse_from(["metacheck"]);
        assert!(!cli.files);
        assert!(!cli.links);
        assert!(!cli.install);
        assert!(cli.root.is_none());
    }

    #[test]
    fn selection_flags_are_additive() {
        let cli = Cli::parse_from(["metacheck", "--files", "--links"]);
        assert!(cli.files);
        assert!(cli.links);
        assert!(!cli.install);
    }

    #[test]
    fn root_flag_takes_a_path() {
        let cli = Cli::parse_from(["metacheck", "--root", "/tmp/toolkit"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/toolkit")));
    }

    #[test]
    fn json_and_debug_flags_parse() {
        let cli = Cli::parse_from(["metacheck", "--json", "--debug", "--no-color"]);
        assert!(cli.json);
        assert!(cli.debug);
        assert!(cli.no_color);
    }
}
