//! git-generate-authors - AUTHORS files from git history
//!
//! Reads a repository's history oldest commit first and collapses every
//! name and email a contributor ever used into one entry, shown under the
//! identity they used most recently.
//!
//! - [`git`] turns history (libgit2 walk or exported `git log` text) into a
//!   lazy stream of observations
//! - [`resolver`] merges observations into author records
//! - [`reporters`] renders the result as an AUTHORS file or JSON
//! - [`config`] loads user and project defaults

pub mod config;
pub mod git;
pub mod models;
pub mod reporters;
pub mod resolver;
