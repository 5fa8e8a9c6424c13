//! Credential services file handling.
//!
//! Credentials for each Redmine deployment live as named entries in a YAML
//! services file:
//!
//! ```yaml
//! services:
//!   redmine:
//!     url: https://redmine.example.com
//!     key: f00d...
//!   lab-wiki:
//!     url: https://wiki.lab.example.org/redmine
//!     user: jdoe
//! ```
//!
//! The file path is resolved from the `WIKITOOL_SERVICES` environment
//! variable, falling back to `~/.config/wikitool/services.yaml`. Fields
//! missing from an entry (password, typically) are prompted for at run time.

use anyhow::{anyhow, bail, Context, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{env, fs, path::PathBuf};

pub const SERVICES_ENV: &str = "WIKITOOL_SERVICES";

/// On-disk services file: named credential entries.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ServicesFile {
    #[serde(default)]
    pub services: BTreeMap<String, ServiceConfig>,
}

/// One credential entry. Either an API key or a username/password pair is
/// enough for REST calls; attachment deletion needs the login pair.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the Redmine deployment
    pub url: String,
    /// REST API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Login username
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Login password (prompted for when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Resolved credentials for one deployment, ready to build clients from.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Base URL with any trailing slash removed
    pub url: String,
    pub key: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

pub fn services_path() -> PathBuf {
    env::var(SERVICES_ENV).map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("wikitool/services.yaml");
        p
    })
}

pub fn load_services() -> Result<ServicesFile> {
    let path = services_path();
    if !path.exists() {
        return Ok(ServicesFile::default());
    }
    let data = fs::read_to_string(&path)
        .with_context(|| format!("reading services file {}", path.display()))?;
    let file: ServicesFile = serde_yaml::from_str(&data)
        .with_context(|| format!("parsing services file {}", path.display()))?;
    Ok(file)
}

pub fn save_services(file: &ServicesFile) -> Result<()> {
    let path = services_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_yaml::to_string(file)?;
    fs::write(&path, data)?;
    println!("Saved services to {}", path.display());
    Ok(())
}

/// Look up one named entry, with an error that names the file and entry.
pub fn load_service(name: &str) -> Result<ServiceConfig> {
    let file = load_services()?;
    file.services.get(name).cloned().ok_or_else(|| {
        anyhow!(
            "no service '{}' in {} (run 'wikitool service add {}')",
            name,
            services_path().display(),
            name
        )
    })
}

impl ServiceConfig {
    pub fn into_credentials(self) -> Credentials {
        Credentials {
            url: self.url.trim_end_matches('/').to_string(),
            key: self.key,
            user: self.user,
            password: self.password,
        }
    }
}

impl Credentials {
    /// Make sure REST calls can authenticate. Entries without an API key
    /// fall back to a login pair, prompting for whatever is missing.
    pub fn ensure_api_auth(&mut self) -> Result<()> {
        if self.key.is_some() {
            return Ok(());
        }
        self.ensure_login()
    }

    /// Make sure a full username/password pair is present, prompting for
    /// missing parts.
    pub fn ensure_login(&mut self) -> Result<()> {
        if self.user.is_none() {
            self.user = Some(Input::new().with_prompt("Username").interact_text()?);
        }
        if self.password.is_none() {
            self.password = Some(Password::new().with_prompt("Password").interact()?);
        }
        Ok(())
    }

    pub fn login_pair(&self) -> Result<(&str, &str)> {
        match (&self.user, &self.password) {
            (Some(u), Some(p)) => Ok((u, p)),
            _ => bail!("username and password are required for this operation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_credentials_trims_trailing_slash() {
        let svc = ServiceConfig {
            url: "https://redmine.example.com/".to_string(),
            key: Some("abc".to_string()),
            user: None,
            password: None,
        };
        let creds = svc.into_credentials();
        assert_eq!(creds.url, "https://redmine.example.com");
        assert_eq!(creds.key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_login_pair_requires_both() {
        let creds = Credentials {
            url: "https://redmine.example.com".to_string(),
            key: None,
            user: Some("jdoe".to_string()),
            password: None,
        };
        assert!(creds.login_pair().is_err());
    }

    #[test]
    fn test_services_file_parses_minimal_entry() {
        let file: ServicesFile = serde_yaml::from_str(
            "services:\n  redmine:\n    url: https://redmine.example.com\n",
        )
        .unwrap();
        let svc = &file.services["redmine"];
        assert_eq!(svc.url, "https://redmine.example.com");
        assert!(svc.key.is_none());
    }
}
