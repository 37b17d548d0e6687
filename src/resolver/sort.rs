//! Output ordering

use crate::models::AuthorRecord;
use anyhow::{anyhow, Result};
use std::cmp::Ordering;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Post-pass sort key. All sorts are stable: ties keep finalized order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Oldest first appearance first
    FirstCommit,
    /// Oldest last appearance first
    LastCommit,
    /// Most commits first
    Commits,
    /// Display name, alphabetical
    Name,
    /// Display email, alphabetical
    Email,
}

impl SortKey {
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::FirstCommit,
            SortKey::LastCommit,
            SortKey::Commits,
            SortKey::Name,
            SortKey::Email,
        ]
    }

    /// Human-readable order used in the AUTHORS header
    pub fn describe(&self) -> &'static str {
        match self {
            SortKey::FirstCommit => "by first commit",
            SortKey::LastCommit => "by last commit",
            SortKey::Commits => "by number of commits",
            SortKey::Name => "alphabetically by name",
            SortKey::Email => "alphabetically by email",
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-commit" | "first" => Ok(SortKey::FirstCommit),
            "last-commit" | "last" => Ok(SortKey::LastCommit),
            "commits" => Ok(SortKey::Commits),
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            _ => Err(anyhow!(
                "Unknown sort '{}'. Valid sorts: first-commit, last-commit, commits, name, email",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::FirstCommit => write!(f, "first-commit"),
            SortKey::LastCommit => write!(f, "last-commit"),
            SortKey::Commits => write!(f, "commits"),
            SortKey::Name => write!(f, "name"),
            SortKey::Email => write!(f, "email"),
        }
    }
}

/// Sort authors in place (stable)
pub fn sort_authors(authors: &mut [AuthorRecord], key: SortKey) {
    match key {
        SortKey::FirstCommit => authors.sort_by(|a, b| a.first_seen.cmp(&b.first_seen)),
        SortKey::LastCommit => authors.sort_by(|a, b| a.last_seen.cmp(&b.last_seen)),
        SortKey::Commits => authors.sort_by(|a, b| b.commits.cmp(&a.commits)),
        SortKey::Name => authors.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
        SortKey::Email => authors.sort_by(|a, b| locale_cmp(&a.email, &b.email)),
    }
}

/// Dictionary-style comparison.
///
/// Strings are compared on their base letters first (canonical
/// decomposition, accents dropped, case-folded), so `Émile` sorts between
/// `Ana` and `Zoe`. Ties fall back to accents, then to the raw string, which
/// keeps the order total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
