//! Alias-set identity resolution
//!
//! Records live in an arena indexed by [`RecordId`]. Two maps point every
//! known lowercase name and email at the record that owns it, so matching an
//! observation is two hash lookups and merging two records only touches the
//! loser's aliases.

use super::IdentityResolver;
use crate::models::{AuthorRecord, Observation, RecordId};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Resolver that unifies contributors across name and email changes.
#[derive(Debug, Default)]
pub struct AliasSetResolver {
    /// Slot per created record; `None` once merged away
    records: Vec<Option<AuthorRecord>>,
    by_name: FxHashMap<String, RecordId>,
    by_email: FxHashMap<String, RecordId>,
    live: usize,
}

impl AliasSetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record owning a name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&AuthorRecord> {
        let id = self.by_name.get(&name.to_lowercase())?;
        self.get(*id)
    }

    /// Record owning an email (case-insensitive)
    pub fn find_by_email(&self, email: &str) -> Option<&AuthorRecord> {
        let id = self.by_email.get(&email.to_lowercase())?;
        self.get(*id)
    }

    fn get(&self, id: RecordId) -> Option<&AuthorRecord> {
        self.records.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: RecordId) -> Option<&mut AuthorRecord> {
        self.records.get_mut(id.0 as usize).and_then(Option::as_mut)
    }

    fn insert(&mut self, obs: &Observation) -> RecordId {
        let id = RecordId(self.records.len() as u32);
        let record = AuthorRecord::from_observation(obs);
        for name in &record.known_names {
            self.by_name.insert(name.clone(), id);
        }
        for email in &record.known_emails {
            self.by_email.insert(email.clone(), id);
        }
        self.records.push(Some(record));
        self.live += 1;
        id
    }

    /// Fold the newer of two records into the older one and return the
    /// survivor.
    fn merge(&mut self, a: RecordId, b: RecordId) -> RecordId {
        let (winner, loser) = if a < b { (a, b) } else { (b, a) };
        let Some(duplicate) = self
            .records
            .get_mut(loser.0 as usize)
            .and_then(Option::take)
        else {
            return winner;
        };
        self.live -= 1;

        for name in &duplicate.known_names {
            self.by_name.insert(name.clone(), winner);
        }
        for email in &duplicate.known_emails {
            self.by_email.insert(email.clone(), winner);
        }

        debug!(
            "Merging {} into {} ({} name(s), {} email(s), {} commit(s))",
            duplicate,
            self.get(winner).map(ToString::to_string).unwrap_or_default(),
            duplicate.known_names.len(),
            duplicate.known_emails.len(),
            duplicate.commits
        );

        if let Some(survivor) = self.get_mut(winner) {
            survivor.absorb(duplicate);
        }
        winner
    }
}

impl IdentityResolver for AliasSetResolver {
    fn observe(&mut self, obs: Observation) {
        let name = obs.name_key();
        let email = obs.email_key();
        let by_name = self.by_name.get(&name).copied();
        let by_email = self.by_email.get(&email).copied();

        let id = match (by_name, by_email) {
            (None, None) => {
                self.insert(&obs);
                return;
            }
            (Some(a), Some(b)) if a == b => a,
            (Some(a), Some(b)) => self.merge(a, b),
            (Some(a), None) => {
                self.by_email.insert(email.clone(), a);
                if let Some(record) = self.get_mut(a) {
                    record.known_emails.insert(email);
                }
                a
            }
            (None, Some(b)) => {
                self.by_name.insert(name.clone(), b);
                if let Some(record) = self.get_mut(b) {
                    record.known_names.insert(name);
                }
                b
            }
        };

        if let Some(record) = self.get_mut(id) {
            record.record(&obs);
        }
    }

    fn len(&self) -> usize {
        self.live
    }

    fn authors(&self) -> Vec<AuthorRecord> {
        self.records.iter().flatten().cloned().collect()
    }

    fn finish(self: Box<Self>) -> Vec<AuthorRecord> {
        self.records.into_iter().flatten().collect()
    }
}
