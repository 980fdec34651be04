//! Metacheck CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use metacheck::cli::Cli;
use metacheck::error::MetacheckError;
use metacheck::report::{self, Selection};
use metacheck::root;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("metacheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("metacheck=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("metacheck starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let root = match root::find(cli.root.as_deref()) {
        Ok(root) => root,
        Err(e @ (MetacheckError::RootNotFound | MetacheckError::InvalidRoot { .. })) => {
            eprintln!("ERROR: {e}");
            return ExitCode::from(2);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let selection = Selection::from_flags(cli.files, cli.links, cli.install);

    match report::run(&root, selection, cli.json) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
