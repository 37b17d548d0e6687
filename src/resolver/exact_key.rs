//! Exact-key identity resolution
//!
//! Identity is fixed when a record is created. A contributor who switches
//! email address shows up as two authors. Records carry no alias sets.

use super::IdentityResolver;
use crate::models::{AuthorRecord, Observation};
use rustc_hash::FxHashMap;

/// Which fields make up the identity key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    /// Lowercase email only
    #[default]
    Email,
    /// Lowercase name and lowercase email
    NameAndEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct IdentityKey {
    name: Option<String>,
    email: String,
}

/// Resolver keyed on an exact identity key. Never merges.
#[derive(Debug)]
pub struct ExactKeyResolver {
    kind: KeyKind,
    records: Vec<AuthorRecord>,
    index: FxHashMap<IdentityKey, usize>,
}

impl ExactKeyResolver {
    pub fn new(kind: KeyKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    fn key(&self, obs: &Observation) -> IdentityKey {
        let name = match self.kind {
            KeyKind::Email => None,
            KeyKind::NameAndEmail => Some(obs.name_key()),
        };
        IdentityKey {
            name,
            email: obs.email_key(),
        }
    }
}

impl IdentityResolver for ExactKeyResolver {
    fn observe(&mut self, obs: Observation) {
        let key = self.key(&obs);
        match self.index.get(&key) {
            Some(&slot) => self.records[slot].record(&obs),
            None => {
                let mut record = AuthorRecord::from_observation(&obs);
                record.known_names.clear();
                record.known_emails.clear();
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn authors(&self) -> Vec<AuthorRecord> {
        self.records.clone()
    }

    fn finish(self: Box<Self>) -> Vec<AuthorRecord> {
        self.records
    }
}
