use anyhow::{anyhow, Context, Result};
use std::{fs, path::PathBuf};
use tracing::info;

use super::Opts;
use crate::client::{RedmineClient, Upload};
use crate::locator::PageLocator;

const DEFAULT_DESCRIPTION: &str = "automated upload";

pub async fn run(
    opts: &Opts,
    url: &str,
    files: &[PathBuf],
    description: Option<&str>,
) -> Result<()> {
    let creds = super::credentials(opts)?;
    let client = RedmineClient::new(&creds)?;
    let locator = PageLocator::from_url(&creds.url, url)?;
    let page = client.get_wiki_page(&locator.project, &locator.page).await?;

    let mut uploads = Vec::with_capacity(files.len());
    for file in files {
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("cannot derive a filename from {}", file.display()))?;
        let data = fs::read(file).with_context(|| format!("reading {}", file.display()))?;
        info!("uploading {} ({} bytes)", filename, data.len());
        let token = client.upload(filename, data).await?;
        uploads.push(Upload {
            token,
            filename: filename.to_string(),
            description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            content_type: "application/octet-stream".to_string(),
        });
    }

    // One page update registers all uploads; the text is carried over
    // unchanged so the page content is not disturbed.
    client
        .update_wiki_page(&locator.project, &locator.page, &page.text, &uploads)
        .await?;
    println!("✅ attached {} file(s) to {}", uploads.len(), locator.page);
    Ok(())
}
