use anyhow::{anyhow, Result};

/// Location of a wiki page, derived from its URL.
///
/// A page URL has the shape `{base}/projects/{project}/wiki/{page}`; the
/// component after `projects` is the project identifier and the last
/// component is the page name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocator {
    pub project: String,
    pub page: String,
}

impl PageLocator {
    /// Parse a page URL relative to the service base URL.
    ///
    /// URLs outside the base URL are rejected before any network call.
    pub fn from_url(base_url: &str, url: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        // The prefix must end on a path boundary, or a host that merely
        // extends the base string would slip through.
        let rest = url
            .strip_prefix(base)
            .filter(|r| r.is_empty() || r.starts_with('/'))
            .ok_or_else(|| {
                anyhow!("page URL '{}' is outside the configured service '{}'", url, base)
            })?;

        let parts: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let project = parts
            .iter()
            .position(|p| *p == "projects")
            .and_then(|i| parts.get(i + 1))
            .ok_or_else(|| anyhow!("cannot derive a project from '{}'", url))?;
        if !parts.contains(&"wiki") {
            return Err(anyhow!("'{}' is not a wiki page URL", url));
        }
        let page = match parts.last() {
            Some(&p) if p != "wiki" => p,
            _ => return Err(anyhow!("cannot derive a wiki page from '{}'", url)),
        };

        Ok(PageLocator {
            project: project.to_string(),
            page: page.to_string(),
        })
    }

    /// Human-readable title for a new page: underscores become spaces.
    pub fn display_title(&self) -> String {
        self.page.replace('_', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://redmine.example.com";

    #[test]
    fn test_parse_page_url() {
        let loc = PageLocator::from_url(BASE, &format!("{BASE}/projects/demo/wiki/Results")).unwrap();
        assert_eq!(loc.project, "demo");
        assert_eq!(loc.page, "Results");
    }

    #[test]
    fn test_parse_trailing_slashes() {
        let loc =
            PageLocator::from_url("https://redmine.example.com/", &format!("{BASE}/projects/demo/wiki/My_Page/"))
                .unwrap();
        assert_eq!(loc.project, "demo");
        assert_eq!(loc.page, "My_Page");
    }

    #[test]
    fn test_rejects_foreign_url() {
        let err = PageLocator::from_url(BASE, "https://other.example.com/projects/demo/wiki/Results")
            .unwrap_err();
        assert!(err.to_string().contains("outside the configured service"));
    }

    #[test]
    fn test_rejects_host_extending_the_base() {
        let err = PageLocator::from_url(
            BASE,
            "https://redmine.example.com.evil.org/projects/demo/wiki/Results",
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside the configured service"));
    }

    #[test]
    fn test_rejects_non_project_url() {
        assert!(PageLocator::from_url(BASE, &format!("{BASE}/issues/42")).is_err());
    }

    #[test]
    fn test_rejects_wiki_index() {
        assert!(PageLocator::from_url(BASE, &format!("{BASE}/projects/demo/wiki")).is_err());
    }

    #[test]
    fn test_page_named_like_project() {
        let loc = PageLocator::from_url(BASE, &format!("{BASE}/projects/demo/wiki/demo")).unwrap();
        assert_eq!(loc.project, "demo");
        assert_eq!(loc.page, "demo");
    }

    #[test]
    fn test_display_title() {
        let loc = PageLocator::from_url(BASE, &format!("{BASE}/projects/demo/wiki/Weekly_Status")).unwrap();
        assert_eq!(loc.display_title(), "Weekly Status");
    }
}
