//! Bot detection on final display names

use crate::models::AuthorRecord;
use regex::Regex;
use std::sync::OnceLock;

/// Names ending in `-bot` or `[bot]`, any casing
const DEFAULT_BOT_PATTERN: &str = r"(?i)(?:-bot|\[bot\])$";

fn default_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(DEFAULT_BOT_PATTERN).expect("valid regex"))
}

/// Decides whether an author is a bot.
///
/// Only the final display name is inspected. A contributor whose earlier
/// aliases looked like a bot is kept; one who later renamed themselves into
/// something bot-like is dropped.
#[derive(Debug, Clone, Default)]
pub struct BotFilter {
    /// Extra patterns on top of the built-in one
    extra: Vec<Regex>,
    /// Lowercase display names that are never treated as bots
    exempt: Vec<String>,
}

impl BotFilter {
    /// Built-in pattern plus user-supplied regexes and exemptions.
    pub fn new<P, E>(patterns: P, exempt: E) -> Result<Self, regex::Error>
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        let extra = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let exempt = exempt
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();
        Ok(Self { extra, exempt })
    }

    pub fn is_bot(&self, name: &str) -> bool {
        if !self.exempt.is_empty() && self.exempt.contains(&name.to_lowercase()) {
            return false;
        }
        default_pattern().is_match(name) || self.extra.iter().any(|re| re.is_match(name))
    }

    /// Drop bot records in place, returning how many were removed
    pub fn retain_humans(&self, authors: &mut Vec<AuthorRecord>) -> usize {
        let before = authors.len();
        authors.retain(|author| !self.is_bot(&author.name));
        before - authors.len()
    }
}
