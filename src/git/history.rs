//! Git history walking using libgit2
//!
//! Walks the current branch oldest commit first and emits one observation
//! for the author of every commit, then one per `Co-authored-by:` trailer in
//! its message body.

use super::log_format::{parse_attribution, AttributionKind};
use super::{HistoryError, HistoryResult};
use crate::models::Observation;
use chrono::{DateTime, TimeZone, Utc};
use git2::{Commit, ErrorCode, Mailmap, Oid, Repository, Revwalk, Signature, Sort};
use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, trace};

/// Options for [`GitHistory::observations`]
#[derive(Debug, Clone)]
pub struct HistoryOptions {
    /// Canonicalize names and emails through `.mailmap`
    pub use_mailmap: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self { use_mailmap: true }
    }
}

/// Repository history source.
pub struct GitHistory {
    repo: Repository,
}

impl GitHistory {
    /// Open the repository containing `path`.
    ///
    /// # Arguments
    /// * `path` - Path to the repository (or any subdirectory)
    pub fn open(path: &Path) -> HistoryResult<Self> {
        let repo = Repository::discover(path).map_err(|source| HistoryError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self { repo })
    }

    /// Check if a path is inside a git repository.
    pub fn is_git_repo(path: &Path) -> bool {
        Repository::discover(path).is_ok()
    }

    /// Working directory of the repository (`None` for bare repositories)
    pub fn repo_root(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Lazily stream observations, oldest commit first.
    ///
    /// A repository without commits yields an empty stream.
    pub fn observations(&self, options: &HistoryOptions) -> HistoryResult<Observations<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)?;

        match self.repo.head() {
            Ok(_) => revwalk.push_head()?,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("Repository has no commits yet");
            }
            Err(e) => return Err(e.into()),
        }

        let mailmap = if options.use_mailmap {
            Some(self.repo.mailmap()?)
        } else {
            None
        };

        Ok(Observations {
            repo: &self.repo,
            revwalk,
            mailmap,
            pending: VecDeque::new(),
            sequence: 0,
            commits: 0,
        })
    }
}

/// Iterator over the observations of a repository's history.
pub struct Observations<'repo> {
    repo: &'repo Repository,
    revwalk: Revwalk<'repo>,
    mailmap: Option<Mailmap>,
    /// Attributions of the current commit not yet handed out
    pending: VecDeque<Observation>,
    sequence: u64,
    commits: u64,
}

impl Observations<'_> {
    /// Commits walked so far
    pub fn commits_walked(&self) -> u64 {
        self.commits
    }

    fn queue_commit(&mut self, oid: Oid) -> HistoryResult<()> {
        let repo = self.repo;
        let commit = repo.find_commit(oid)?;
        self.commits += 1;

        let author = match &self.mailmap {
            Some(mailmap) => commit.author_with_mailmap(mailmap)?,
            None => commit.author().to_owned(),
        };
        let Some(timestamp) = to_utc(&author) else {
            let trailers = commit
                .body()
                .map(|body| {
                    body.lines()
                        .filter_map(parse_attribution)
                        .filter(|a| a.kind == AttributionKind::CoAuthor)
                        .count()
                })
                .unwrap_or(0);
            trace!(
                "Skipping commit {} with out-of-range author time (author and {} co-author(s))",
                oid,
                trailers
            );
            return Ok(());
        };

        match (author.name(), author.email()) {
            (Some(name), Some(email)) if !name.trim().is_empty() && !email.trim().is_empty() => {
                self.push(name.trim(), email.trim(), timestamp);
            }
            _ => trace!("Skipping unreadable author signature on {}", oid),
        }

        self.queue_co_authors(&commit, &author, timestamp);
        Ok(())
    }

    fn queue_co_authors(&mut self, commit: &Commit<'_>, author: &Signature<'_>, timestamp: DateTime<Utc>) {
        let Some(body) = commit.body() else {
            return;
        };
        for line in body.lines() {
            let Some(attribution) = parse_attribution(line) else {
                continue;
            };
            if attribution.kind != AttributionKind::CoAuthor {
                continue;
            }

            let canonical = self.mailmap.as_ref().and_then(|mailmap| {
                Signature::new(attribution.name, attribution.email, &author.when())
                    .and_then(|sig| mailmap.resolve_signature(&sig))
                    .ok()
            });
            match canonical.as_ref().and_then(|sig| Some((sig.name()?, sig.email()?))) {
                Some((name, email)) => self.push(name, email, timestamp),
                None => self.push(attribution.name, attribution.email, timestamp),
            }
        }
    }

    fn push(&mut self, name: &str, email: &str, timestamp: DateTime<Utc>) {
        self.pending
            .push_back(Observation::new(name, email, timestamp, self.sequence));
        self.sequence += 1;
    }
}

impl Iterator for Observations<'_> {
    type Item = HistoryResult<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(obs) = self.pending.pop_front() {
                return Some(Ok(obs));
            }
            let oid = match self.revwalk.next()? {
                Ok(oid) => oid,
                Err(e) => return Some(Err(e.into())),
            };
            if let Err(e) = self.queue_commit(oid) {
                return Some(Err(e));
            }
        }
    }
}

/// Author time as UTC
fn to_utc(sig: &Signature<'_>) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(sig.when().seconds(), 0).single()
}
