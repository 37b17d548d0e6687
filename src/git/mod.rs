//! Git history sources
//!
//! Turns a repository's history into a chronological stream of
//! [`Observation`](crate::models::Observation)s for the resolver.
//!
//! # Sources
//!
//! - [`GitHistory`] walks the repository with libgit2, oldest commit first,
//!   yielding each commit's author (mailmap applied) followed by its
//!   `Co-authored-by:` trailers.
//! - [`LogReader`] parses a pre-exported `git log` text stream produced with
//!   [`LOG_FORMAT`].
//!
//! Both are lazy iterators: memory use does not grow with history length.
//! Attributions that cannot be parsed are skipped.
//!
//! # Example
//!
//! ```no_run
//! use git_generate_authors::git::{GitHistory, HistoryOptions};
//! use std::path::Path;
//!
//! let history = GitHistory::open(Path::new("/path/to/repo")).unwrap();
//! for obs in history.observations(&HistoryOptions::default()).unwrap() {
//!     let obs = obs.unwrap();
//!     println!("{} <{}>", obs.name, obs.email);
//! }
//! ```

pub mod history;
pub mod log_format;

pub use history::{GitHistory, HistoryOptions, Observations};
pub use log_format::{parse_attribution, Attribution, AttributionKind, LogReader, LOG_FORMAT};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Not a git repository (or any parent): {path}: {source}")]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
