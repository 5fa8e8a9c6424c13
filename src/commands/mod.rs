use anyhow::Result;
use clap::Subcommand;
use dialoguer::Confirm;
use std::path::PathBuf;

use crate::config::{self, Credentials};

pub mod attach;
pub mod create;
pub mod delete;
pub mod detach;
pub mod download;
pub mod service;

/// Global options shared by every subcommand.
pub struct Opts {
    /// Name of the services file entry to authenticate with
    pub service: String,
    /// Skip confirmation prompts
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Attach local files to a wiki page")]
    Attach {
        /// URL of the wiki page
        url: String,
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Description recorded for each upload
        #[arg(short, long)]
        description: Option<String>,
    },
    #[command(about = "Delete attachments whose filenames match the given patterns (CAUTION)")]
    Detach {
        /// URL of the wiki page
        url: String,
        /// Regex patterns matched from the start of the filename; none matches all
        patterns: Vec<String>,
    },
    #[command(about = "Download attachments whose filenames match the given patterns")]
    Download {
        /// URL of the wiki page
        url: String,
        /// Regex patterns matched from the start of the filename; none matches all
        patterns: Vec<String>,
        /// Directory to save into (defaults to the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    #[command(about = "Create a new wiki page (CAUTION)")]
    Create {
        /// URL of the page to create
        url: String,
        /// Initial page text
        text: Vec<String>,
    },
    #[command(about = "Delete a wiki page (CAUTION)")]
    Delete {
        /// URL of the page to delete
        url: String,
    },
    #[command(about = "Manage saved credential services (list/add/remove)")]
    Service {
        #[command(subcommand)]
        cmd: service::ServiceCommands,
    },
}

pub async fn run(cmd: Commands, opts: &Opts) -> Result<()> {
    match cmd {
        Commands::Attach {
            url,
            files,
            description,
        } => attach::run(opts, &url, &files, description.as_deref()).await,
        Commands::Detach { url, patterns } => detach::run(opts, &url, &patterns).await,
        Commands::Download {
            url,
            patterns,
            output,
        } => download::run(opts, &url, &patterns, output).await,
        Commands::Create { url, text } => create::run(opts, &url, &text).await,
        Commands::Delete { url } => delete::run(opts, &url).await,
        Commands::Service { cmd } => service::run(cmd),
    }
}

/// Load the selected service entry and make sure REST calls can
/// authenticate, prompting if the entry is incomplete.
pub(crate) fn credentials(opts: &Opts) -> Result<Credentials> {
    let mut creds = config::load_service(&opts.service)?.into_credentials();
    creds.ensure_api_auth()?;
    Ok(creds)
}

pub(crate) fn confirm(question: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()?)
}
