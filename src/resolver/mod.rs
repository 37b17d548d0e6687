//! Identity resolution
//!
//! Collapses a chronological stream of [`Observation`]s into one
//! [`AuthorRecord`] per real-world contributor.
//!
//! Two strategies are available:
//!
//! - [`Strategy::AliasSet`] - every record accumulates all names and emails
//!   it was ever seen with. An observation that links two existing records
//!   (name known to one, email known to the other) merges them, and the older
//!   record survives.
//! - [`Strategy::ExactKey`] - identity is a fixed key (email, or name and
//!   email). Nothing is ever merged.
//!
//! After the stream is consumed, bots are filtered on their final display
//! name and the list is optionally sorted.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use git_generate_authors::models::Observation;
//! use git_generate_authors::resolver::{resolve, ResolveOptions};
//!
//! let t = |s| Utc.timestamp_opt(s, 0).unwrap();
//! let stream = vec![
//!     Observation::new("A", "e1@x.com", t(1), 0),
//!     Observation::new("B", "e2@x.com", t(2), 1),
//!     Observation::new("A", "e2@x.com", t(3), 2),
//! ];
//! let authors = resolve(stream, &ResolveOptions::default());
//! assert_eq!(authors.len(), 1);
//! assert_eq!(authors[0].commits, 3);
//! ```

mod alias_set;
mod bots;
mod exact_key;
mod sort;

pub use alias_set::AliasSetResolver;
pub use bots::BotFilter;
pub use exact_key::{ExactKeyResolver, KeyKind};
pub use sort::{locale_cmp, sort_authors, SortKey};

use crate::models::{AuthorRecord, Observation};
use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing::debug;

/// Incremental identity resolver.
///
/// Observations must be fed in chronological order. The state is valid
/// after every call to [`observe`](IdentityResolver::observe), so a caller
/// may stop consuming its stream at any point.
pub trait IdentityResolver {
    /// Resolve one observation against everything seen so far
    fn observe(&mut self, obs: Observation);

    /// Number of live records
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the live records in finalized order
    fn authors(&self) -> Vec<AuthorRecord>;

    /// Consume the resolver and return the live records in finalized order
    fn finish(self: Box<Self>) -> Vec<AuthorRecord>;
}

/// Identity strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Match on any known name or email, merging records an observation links
    #[default]
    AliasSet,
    /// Match on a single fixed key, never merge
    ExactKey(KeyKind),
}

impl Strategy {
    /// Build an empty resolver for this strategy
    pub fn resolver(self) -> Box<dyn IdentityResolver> {
        match self {
            Strategy::AliasSet => Box::new(AliasSetResolver::new()),
            Strategy::ExactKey(kind) => Box::new(ExactKeyResolver::new(kind)),
        }
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alias-set" | "alias" | "aliases" => Ok(Strategy::AliasSet),
            "email" => Ok(Strategy::ExactKey(KeyKind::Email)),
            "name-email" => Ok(Strategy::ExactKey(KeyKind::NameAndEmail)),
            _ => Err(anyhow!(
                "Unknown strategy '{}'. Valid strategies: alias-set, email, name-email",
                s
            )),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::AliasSet => write!(f, "alias-set"),
            Strategy::ExactKey(KeyKind::Email) => write!(f, "email"),
            Strategy::ExactKey(KeyKind::NameAndEmail) => write!(f, "name-email"),
        }
    }
}

/// Options for [`resolve`]
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub strategy: Strategy,
    /// Keep records whose final display name looks like a bot
    pub keep_bots: bool,
    pub bots: BotFilter,
    /// Post-pass ordering; `None` keeps finalized order
    pub sort: Option<SortKey>,
}

/// Resolve a chronological observation stream into author records.
///
/// The stream is consumed lazily in a single pass. Bot filtering and
/// sorting run once, after the last observation.
pub fn resolve<I>(observations: I, options: &ResolveOptions) -> Vec<AuthorRecord>
where
    I: IntoIterator<Item = Observation>,
{
    let mut resolver = options.strategy.resolver();
    let mut consumed = 0u64;
    for obs in observations {
        resolver.observe(obs);
        consumed += 1;
    }

    let mut authors = resolver.finish();
    debug!(
        "Resolved {} observation(s) into {} author(s) using {} strategy",
        consumed,
        authors.len(),
        options.strategy
    );

    if !options.keep_bots {
        let removed = options.bots.retain_humans(&mut authors);
        if removed > 0 {
            debug!("Filtered {} bot author(s)", removed);
        }
    }

    if let Some(key) = options.sort {
        sort_authors(&mut authors, key);
    }

    authors
}
