use crate::client::Attachment;
use anyhow::{Context, Result};
use regex::Regex;

/// Select attachments whose filename matches any of the given patterns.
///
/// Patterns are regexes matched from the start of the filename; an empty
/// pattern list selects every attachment.
pub fn match_attachments<'a>(
    attachments: &'a [Attachment],
    patterns: &[String],
) -> Result<Vec<&'a Attachment>> {
    if patterns.is_empty() {
        return Ok(attachments.iter().collect());
    }
    let mut regexes = Vec::with_capacity(patterns.len());
    for p in patterns {
        let re = Regex::new(p).with_context(|| format!("invalid pattern '{p}'"))?;
        regexes.push(re);
    }
    Ok(attachments
        .iter()
        .filter(|a| regexes.iter().any(|re| matches_at_start(re, &a.filename)))
        .collect())
}

fn matches_at_start(re: &Regex, name: &str) -> bool {
    re.find(name).is_some_and(|m| m.start() == 0)
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

    fn names(matched: &[&Attachment]) -> Vec<String> {
        matched.iter().map(|a| a.filename.clone()).collect()
    }

    #[test]
    fn test_no_patterns_selects_all() {
        let atts = vec![attachment(1, "a.csv"), attachment(2, "b.png")];
        let matched = match_attachments(&atts, &[]).unwrap();
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_patterns_anchor_at_start() {
        let atts = vec![
            attachment(1, "data_v2.csv"),
            attachment(2, "mydata.csv"),
            attachment(3, "data.txt"),
        ];
        let matched = match_attachments(&atts, &["data".to_string()]).unwrap();
        assert_eq!(names(&matched), vec!["data_v2.csv", "data.txt"]);
    }

    #[test]
    fn test_multiple_patterns() {
        let atts = vec![
            attachment(1, "plot.png"),
            attachment(2, "results.csv"),
            attachment(3, "notes.txt"),
        ];
        let matched =
            match_attachments(&atts, &[r"plot\.".to_string(), r".*\.csv$".to_string()]).unwrap();
        assert_eq!(names(&matched), vec!["plot.png", "results.csv"]);
    }

    #[test]
    fn test_attachment_matched_once_per_pattern_set() {
        let atts = vec![attachment(1, "plot.png")];
        let matched =
            match_attachments(&atts, &["plot".to_string(), "pl.*".to_string()]).unwrap();
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let atts = vec![attachment(1, "a.csv")];
        let err = match_attachments(&atts, &["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invalid pattern"));
    }
}
