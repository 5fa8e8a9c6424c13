use anyhow::{Context, Result};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use super::Opts;
use crate::client::{Attachment, RedmineClient};
use crate::filter::match_attachments;
use crate::locator::PageLocator;

pub async fn run(
    opts: &Opts,
    url: &str,
    patterns: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let creds = super::credentials(opts)?;
    let client = RedmineClient::new(&creds)?;
    let locator = PageLocator::from_url(&creds.url, url)?;
    let page = client.get_wiki_page(&locator.project, &locator.page).await?;

    let matched = match_attachments(&page.attachments, patterns)?;
    if matched.is_empty() {
        println!("no matching attachments on {}", locator.page);
        return Ok(());
    }

    let outdir = output.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&outdir)
        .with_context(|| format!("creating output directory {}", outdir.display()))?;

    let plan = plan_downloads(&matched, &outdir);
    let mut downloaded = 0usize;
    for (a, dest) in plan {
        info!("downloading {}", dest.display());
        let data = client.download(&a.content_url).await?;
        fs::write(&dest, &data).with_context(|| format!("writing {}", dest.display()))?;
        downloaded += 1;
    }

    println!("✅ downloaded {} attachment(s) from {}", downloaded, locator.page);
    Ok(())
}

/// Resolve target paths for the matched attachments. A filename occurring
/// more than once in the matched set gets a `.{id}` suffix on every copy,
/// and files already present in the target directory are dropped from the
/// plan so nothing local is ever overwritten.
fn plan_downloads<'a>(
    matched: &[&'a Attachment],
    outdir: &Path,
) -> Vec<(&'a Attachment, PathBuf)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for a in matched {
        *counts.entry(a.filename.as_str()).or_insert(0) += 1;
    }

    let mut plan = Vec::new();
    for &a in matched {
        let outname = if counts[a.filename.as_str()] > 1 {
            format!("{}.{}", a.filename, a.id)
        } else {
            a.filename.clone()
        };
        let dest = outdir.join(&outname);
        if dest.exists() {
            info!("found {}; skipping", outname);
            continue;
        }
        plan.push((a, dest));
    }
    plan
}
