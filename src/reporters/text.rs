//! AUTHORS file reporter

use crate::models::AuthorRecord;
use crate::resolver::SortKey;
use anyhow::Result;
use std::fmt::Write;

/// Footer appended to every generated file
pub const FOOTER: &str = "# Generated by git-generate-authors.";

/// Render authors as an AUTHORS file
pub fn render(authors: &[AuthorRecord], sort: Option<SortKey>) -> Result<String> {
    let order = sort.map_or("by first appearance", |key| key.describe());

    let mut out = String::new();
    writeln!(out, "# Authors ordered {}.", order)?;
    writeln!(out)?;
    for author in authors {
        writeln!(out, "{}", author)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", FOOTER)?;
    Ok(out)
}
