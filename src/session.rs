//! Web-UI login session for operations the REST API does not expose.
//!
//! Attachment deletion in particular is only reachable through the web
//! interface, so this logs in with the HTML form, keeps the session cookie,
//! and replays the delete button's form post with the CSRF token.

use crate::error::check;
use anyhow::{anyhow, Result};
use regex::Regex;
use reqwest::Client;

/// Value of the submit button on the Redmine login form.
const LOGIN_BUTTON: &str = "Login \u{bb}";

pub struct WebSession {
    base_url: String,
    client: Client,
    token: String,
}

impl WebSession {
    /// Log in through the web UI and capture a CSRF token for form posts.
    pub async fn login(base_url: &str, user: &str, password: &str) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        let login_url = format!("{}/login", base_url);

        let page = client
            .get(&login_url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let token = csrf_token(&page)
            .ok_or_else(|| anyhow!("no csrf-token found on {}", login_url))?;

        let params = [
            ("username", user),
            ("password", password),
            ("login", LOGIN_BUTTON),
            ("authenticity_token", &token),
        ];
        let resp = client.post(&login_url).form(&params).send().await?;
        let body = resp.error_for_status()?.text().await?;
        // A fresh token comes back with the logged-in page.
        let token = csrf_token(&body)
            .ok_or_else(|| anyhow!("login to {} failed (no csrf-token in response)", base_url))?;

        Ok(WebSession {
            base_url: base_url.to_string(),
            client,
            token,
        })
    }

    /// Delete one attachment by replaying the web UI's delete form.
    pub async fn delete_attachment(&self, id: u64) -> Result<()> {
        let url = format!("{}/attachments/{}", self.base_url, id);
        let params = [
            ("_method", "delete"),
            ("authenticity_token", self.token.as_str()),
        ];
        let resp = self.client.post(&url).form(&params).send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Scrape the CSRF token from the `csrf-token` meta tag. Rails emits the
/// attributes in either order depending on the version.
fn csrf_token(html: &str) -> Option<String> {
    let re = Regex::new(
        r#"meta content="([^"]+)" name="csrf-token"|meta name="csrf-token" content="([^"]+)""#,
    )
    .unwrap();
    re.captures(html)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
}
