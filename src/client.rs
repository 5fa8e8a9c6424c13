//! Minimal Redmine REST client covering the wiki and upload endpoints the
//! tool needs. Everything else about the protocol belongs to the server.

use crate::config::Credentials;
use crate::error::{check, RedmineError};
use anyhow::Result;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, RequestBuilder,
};
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

pub struct RedmineClient {
    pub base_url: String,
    client: Client,
    basic: Option<(String, String)>,
}

/// Attachment metadata as returned with a wiki page.
#[derive(Deserialize, Debug, Clone)]
pub struct Attachment {
    pub id: u64,
    pub filename: String,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    pub content_url: String,
}

#[derive(Deserialize, Debug)]
pub struct WikiPage {
    pub title: String,
    #[serde(default)]
    pub text: String,
    pub version: u32,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// An upload token plus the metadata Redmine records for the attachment.
#[derive(Serialize, Debug)]
pub struct Upload {
    pub token: String,
    pub filename: String,
    pub description: String,
    pub content_type: String,
}

impl RedmineClient {
    /// Build a client from resolved credentials. An API key goes into the
    /// default headers; otherwise every request carries basic auth.
    pub fn new(creds: &Credentials) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &creds.key {
            headers.insert(API_KEY_HEADER, HeaderValue::from_str(key)?);
        }
        let client = Client::builder().default_headers(headers).build()?;
        let basic = if creds.key.is_none() {
            creds.user.clone().zip(creds.password.clone())
        } else {
            None
        };
        Ok(RedmineClient {
            base_url: creds.url.clone(),
            client,
            basic,
        })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        if let Some((user, password)) = &self.basic {
            req.basic_auth(user, Some(password))
        } else {
            req
        }
    }

    /// Fetch a wiki page with its attachment list.
    pub async fn get_wiki_page(
        &self,
        project: &str,
        page: &str,
    ) -> Result<WikiPage, RedmineError> {
        let url = format!(
            "{}/projects/{}/wiki/{}.json?include=attachments",
            self.base_url, project, page
        );
        let resp = self.authed(self.client.get(&url)).send().await?;
        let resp = check(resp).await?;
        #[derive(Deserialize)]
        struct ApiResponse {
            wiki_page: WikiPage,
        }
        Ok(resp.json::<ApiResponse>().await?.wiki_page)
    }

    /// Create a wiki page. Redmine creates on PUT when the page is new.
    pub async fn create_wiki_page(
        &self,
        project: &str,
        page: &str,
        title: &str,
        text: &str,
    ) -> Result<(), RedmineError> {
        let body = serde_json::json!({
            "wiki_page": { "title": title, "text": text }
        });
        self.put_wiki_page(project, page, &body).await
    }

    /// Replace the page text and register any uploaded attachments.
    pub async fn update_wiki_page(
        &self,
        project: &str,
        page: &str,
        text: &str,
        uploads: &[Upload],
    ) -> Result<(), RedmineError> {
        let body = serde_json::json!({
            "wiki_page": { "text": text, "uploads": uploads }
        });
        self.put_wiki_page(project, page, &body).await
    }

    async fn put_wiki_page(
        &self,
        project: &str,
        page: &str,
        body: &serde_json::Value,
    ) -> Result<(), RedmineError> {
        let url = format!("{}/projects/{}/wiki/{}.json", self.base_url, project, page);
        let resp = self.authed(self.client.put(&url)).json(body).send().await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete_wiki_page(&self, project: &str, page: &str) -> Result<(), RedmineError> {
        let url = format!("{}/projects/{}/wiki/{}.json", self.base_url, project, page);
        let resp = self.authed(self.client.delete(&url)).send().await?;
        check(resp).await?;
        Ok(())
    }

    /// Upload raw file content, returning the token to reference it from a
    /// subsequent wiki page update.
    pub async fn upload(&self, filename: &str, data: Vec<u8>) -> Result<String, RedmineError> {
        let url = format!("{}/uploads.json", self.base_url);
        let resp = self
            .authed(self.client.post(&url))
            .query(&[("filename", filename)])
            .header(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"))
            .body(data)
            .send()
            .await?;
        let resp = check(resp).await?;
        #[derive(Deserialize)]
        struct ApiResponse {
            upload: ApiUpload,
        }
        #[derive(Deserialize)]
        struct ApiUpload {
            token: String,
        }
        Ok(resp.json::<ApiResponse>().await?.upload.token)
    }

    /// Download attachment content. Redmine reports `content_url` as an
    /// absolute URL; a relative one is resolved against the base URL.
    pub async fn download(&self, content_url: &str) -> Result<bytes::Bytes, RedmineError> {
        let url = if content_url.starts_with('/') {
            format!("{}{}", self.base_url, content_url)
        } else {
            content_url.to_string()
        };
        let resp = self.authed(self.client.get(&url)).send().await?;
        let resp = check(resp).await?;
        Ok(resp.bytes().await?)
    }
}
