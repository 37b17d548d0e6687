//! JSON reporter
//!
//! Outputs every author with aliases, commit count and activity range.
//! Useful for machine consumption or piping to jq.

use crate::models::AuthorRecord;
use crate::resolver::SortKey;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct AuthorsDocument<'a> {
    /// Sort key applied, `null` when unsorted
    sort: Option<String>,
    count: usize,
    authors: &'a [AuthorRecord],
}

/// Render authors as pretty-printed JSON
pub fn render(authors: &[AuthorRecord], sort: Option<SortKey>) -> Result<String> {
    let doc = AuthorsDocument {
        sort: sort.map(|key| key.to_string()),
        count: authors.len(),
        authors,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_authors;

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&test_authors(), Some(SortKey::Commits)).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        assert_eq!(parsed["sort"], "commits");
        assert_eq!(parsed["count"], 2);
        let jane = &parsed["authors"][0];
        assert_eq!(jane["name"], "Jane Doe");
        assert_eq!(jane["email"], "jane@new.org");
        assert_eq!(jane["commits"], 2);
        assert_eq!(
            jane["known_emails"].as_array().expect("emails array").len(),
            2
        );
        assert_eq!(jane["first_seen"], "1970-01-01T00:01:40Z");
    }

    #[test]
    fn test_json_empty_authors() {
        let json_str = render(&[], None).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["sort"].is_null());
        assert_eq!(parsed["authors"].as_array().expect("authors array").len(), 0);
    }

    #[test]
    fn test_json_omits_empty_alias_sets() {
        let mut authors = test_authors();
        authors[1].known_names.clear();
        authors[1].known_emails.clear();

        let json_str = render(&authors, None).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["authors"][0].get("known_names").is_some());
        assert!(parsed["authors"][1].get("known_names").is_none());
        assert!(parsed["authors"][1].get("known_emails").is_none());
        assert_eq!(parsed["authors"][1]["email"], "bob@x.com");
    }
}
