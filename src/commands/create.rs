use anyhow::Result;
use tracing::info;

use super::Opts;
use crate::client::RedmineClient;
use crate::locator::PageLocator;

pub async fn run(opts: &Opts, url: &str, text: &[String]) -> Result<()> {
    let creds = super::credentials(opts)?;
    let client = RedmineClient::new(&creds)?;
    let locator = PageLocator::from_url(&creds.url, url)?;

    if !opts.yes && !super::confirm(&format!("Create '{}'?", url), false)? {
        return Ok(());
    }

    // Redmine rejects empty page text, hence the single-space default.
    let text = if text.is_empty() {
        " ".to_string()
    } else {
        text.join(" ")
    };

    info!("creating {}", url);
    client
        .create_wiki_page(&locator.project, &locator.page, &locator.display_title(), &text)
        .await?;
    println!("✅ created {}", locator.page);
    Ok(())
}
