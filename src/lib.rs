//! # wikitool library
//!
//! Core functionality for the wikitool CLI: a small Redmine REST client,
//! credential handling, and the wiki-maintenance commands built on top.

use clap::Parser;

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod locator;
pub mod session;

/// Automate wiki maintenance against a Redmine deployment
///
/// Attach, detach and download wiki page attachments, and create or delete
/// wiki pages. Pages are addressed by their full URL; credentials come from
/// a named entry in the services file.
#[derive(Parser)]
#[command(
    name = "wikitool",
    version,
    about = "Automate wiki maintenance against a Redmine deployment"
)]
pub struct Cli {
    /// Named entry in the services file to authenticate with
    #[arg(short, long, global = true, default_value = "redmine")]
    pub service: String,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub cmd: commands::Commands,
}
