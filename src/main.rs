//! # wikitool
//!
//! Command-line tool for automating wiki maintenance against a Redmine
//! deployment.
//!
//! ## Quick Start
//!
//! ```bash
//! # Save credentials for your Redmine instance
//! wikitool service add redmine
//!
//! # Attach a file to a wiki page
//! wikitool attach https://redmine.example.com/projects/demo/wiki/Results plot.png
//!
//! # Download attachments matching a pattern
//! wikitool download https://redmine.example.com/projects/demo/wiki/Results 'data_.*\.csv'
//!
//! # Delete matching attachments (asks per attachment)
//! wikitool detach https://redmine.example.com/projects/demo/wiki/Results 'old_.*'
//! ```
//!
//! Credentials live in `~/.config/wikitool/services.yaml` (or the path in
//! `WIKITOOL_SERVICES`); pick an entry with `--service`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wikitool::{commands, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    let opts = commands::Opts {
        service: cli.service,
        yes: cli.yes,
    };
    commands::run(cli.cmd, &opts).await
}
