//! Output reporters for resolved authors
//!
//! Supports multiple output formats:
//! - `text` - the classic AUTHORS file, one `Name <email>` per line
//! - `json` - machine-readable JSON with aliases and activity range

mod json;
mod text;

use crate::models::AuthorRecord;
use crate::resolver::SortKey;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render the author list in the given format.
///
/// `sort` is the order the list is already in; it only feeds the header.
pub fn report(authors: &[AuthorRecord], sort: Option<SortKey>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(authors, sort),
        OutputFormat::Json => json::render(authors, sort),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Observation;
    use chrono::{TimeZone, Utc};

    /// Two authors, the first with two aliases
    pub(crate) fn test_authors() -> Vec<AuthorRecord> {
        let t = |secs| Utc.timestamp_opt(secs, 0).single().expect("valid timestamp");
        let mut jane = AuthorRecord::from_observation(&Observation::new("jdoe", "jane@old.org", t(100), 0));
        let renamed = Observation::new("Jane Doe", "Jane@New.org", t(300), 2);
        jane.known_names.insert(renamed.name_key());
        jane.known_emails.insert(renamed.email_key());
        jane.record(&renamed);
        let bob = AuthorRecord::from_observation(&Observation::new("Bob", "bob@x.com", t(200), 1));
        vec![jane, bob]
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().expect("text"), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().expect("json"), OutputFormat::Json);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_dispatch() {
        let authors = test_authors();
        let text = report(&authors, None, OutputFormat::Text).expect("render text");
        assert!(text.starts_with("# Authors"));
        let json = report(&authors, None, OutputFormat::Json).expect("render json");
        assert!(json.trim_start().starts_with('{'));
    }
}
