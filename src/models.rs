//! Core data models for git-generate-authors
//!
//! These models flow between the history sources, the identity resolver
//! and the reporters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One attribution extracted from history: the author of a commit, or one
/// of its `Co-authored-by:` trailers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Raw name as recorded
    pub name: String,
    /// Raw email as recorded
    pub email: String,
    /// Author time of the commit the attribution belongs to
    pub timestamp: DateTime<Utc>,
    /// Position in the stream, strictly increasing from 0
    pub sequence: u64,
}

impl Observation {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        timestamp: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            timestamp,
            sequence,
        }
    }

    /// Name used for matching (lowercase)
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Email used for matching and display (lowercase)
    pub fn email_key(&self) -> String {
        self.email.to_lowercase()
    }
}

/// Stable arena index of an author record.
///
/// Ids are handed out in creation order, so a smaller id always means an
/// older record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u32);

/// A resolved contributor with aggregated stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    /// Last observed name, original casing
    pub name: String,
    /// Last observed email, lowercase
    pub email: String,
    /// Every name variant attributed to this identity, lowercase.
    /// Empty for exact-key records.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub known_names: BTreeSet<String>,
    /// Every email variant attributed to this identity, lowercase
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub known_emails: BTreeSet<String>,
    /// Number of attributions (commits and co-authored commits)
    pub commits: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl AuthorRecord {
    /// Seed a record from its first observation.
    pub fn from_observation(obs: &Observation) -> Self {
        Self {
            name: obs.name.clone(),
            email: obs.email_key(),
            known_names: BTreeSet::from([obs.name_key()]),
            known_emails: BTreeSet::from([obs.email_key()]),
            commits: 1,
            first_seen: obs.timestamp,
            last_seen: obs.timestamp,
        }
    }

    /// Apply a matching observation: latest values win for display fields.
    pub fn record(&mut self, obs: &Observation) {
        self.name = obs.name.clone();
        self.email = obs.email_key();
        self.commits += 1;
        if obs.timestamp > self.last_seen {
            self.last_seen = obs.timestamp;
        }
    }

    /// Fold a duplicate record into this one.
    pub fn absorb(&mut self, other: AuthorRecord) {
        self.known_names.extend(other.known_names);
        self.known_emails.extend(other.known_emails);
        self.commits += other.commits;
        self.first_seen = self.first_seen.min(other.first_seen);
        self.last_seen = self.last_seen.max(other.last_seen);
    }
}

/// `Name <email>`, as written to the AUTHORS file
impl std::fmt::Display for AuthorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
