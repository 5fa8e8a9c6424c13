use anyhow::Result;
use tracing::info;

use super::Opts;
use crate::client::RedmineClient;
use crate::locator::PageLocator;

pub async fn run(opts: &Opts, url: &str) -> Result<()> {
    let creds = super::credentials(opts)?;
    let client = RedmineClient::new(&creds)?;
    let locator = PageLocator::from_url(&creds.url, url)?;

    if !opts.yes && !super::confirm(&format!("Delete '{}'?", url), false)? {
        return Ok(());
    }

    info!("deleting {}", url);
    client.delete_wiki_page(&locator.project, &locator.page).await?;
    println!("✅ deleted {}", locator.page);
    Ok(())
}
