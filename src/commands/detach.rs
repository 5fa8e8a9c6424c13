use anyhow::{bail, Result};
use tracing::info;

use super::Opts;
use crate::client::{Attachment, RedmineClient};
use crate::config;
use crate::filter::match_attachments;
use crate::locator::PageLocator;
use crate::session::WebSession;

pub async fn run(opts: &Opts, url: &str, patterns: &[String]) -> Result<()> {
    let mut creds = config::load_service(&opts.service)?.into_credentials();
    // The delete form post needs a real web login even when an API key is
    // configured.
    creds.ensure_login()?;

    let client = RedmineClient::new(&creds)?;
    let locator = PageLocator::from_url(&creds.url, url)?;
    let page = client.get_wiki_page(&locator.project, &locator.page).await?;

    let matched = deletion_candidates(&page.attachments, patterns, &locator.page)?;

    let (user, password) = creds.login_pair()?;
    let session = WebSession::login(&creds.url, user, password).await?;

    let mut deleted = 0usize;
    for a in matched {
        if !opts.yes {
            let question = format!("Delete '{}' (id {})?", a.filename, a.id);
            if !super::confirm(&question, true)? {
                continue;
            }
        }
        info!("deleting {} (id {})", a.filename, a.id);
        session.delete_attachment(a.id).await?;
        deleted += 1;
    }

    println!("✅ deleted {} attachment(s) from {}", deleted, locator.page);
    Ok(())
}

/// Attachments selected for deletion. Unlike download, where an empty match
/// set is a quiet no-op, matching nothing here is an error: a detach that
/// silently deletes nothing usually means a mistyped pattern.
fn deletion_candidates<'a>(
    attachments: &'a [Attachment],
    patterns: &[String],
    page: &str,
) -> Result<Vec<&'a Attachment>> {
    let matched = match_attachments(attachments, patterns)?;
    if matched.is_empty() {
        bail!("no matching attachments on {}", page);
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(id: u64, filename: &str) -> Attachment {
        Attachment {
            id,
            filename: filename.to_string(),
            filesize: None,
            description: None,
            content_url: format!("https://redmine.example.com/attachments/download/{id}/{filename}"),
        }
    }

    #[test]
    fn test_zero_matches_is_an_error() {
        let atts = vec![attachment(1, "plot.png")];
        let err = deletion_candidates(&atts, &["nonexistent".to_string()], "Results").unwrap_err();
        assert!(err.to_string().contains("no matching attachments on Results"));
    }

    #[test]
    fn test_no_attachments_at_all_is_an_error() {
        assert!(deletion_candidates(&[], &[], "Results").is_err());
    }

    #[test]
    fn test_matches_pass_through() {
        let atts = vec![attachment(1, "old_plot.png"), attachment(2, "results.csv")];
        let matched = deletion_candidates(&atts, &["old_".to_string()], "Results").unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].filename, "old_plot.png");
    }
}
