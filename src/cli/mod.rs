//! CLI definition and dispatch

mod generate;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Generate an AUTHORS file from git history
///
/// Contributors who changed their name or email over time are merged into a
/// single entry showing their most recent identity.
#[derive(Parser, Debug)]
#[command(name = "git-generate-authors")]
#[command(
    version,
    about = "Generate an AUTHORS file from git history, merging contributors who changed names or emails",
    after_help = "\
Examples:
  git-generate-authors                          Write ./AUTHORS ordered by first commit
  git-generate-authors -o - --sort commits      Print authors by number of commits
  git-generate-authors --strategy email         One entry per email, no alias merging
  git-generate-authors --format json -o -       JSON with aliases and activity range
  git log --reverse --format='%x1eDate: %at%nAuthor: %aN <%aE>%n%b' | git-generate-authors --log -

Configuration:
  ~/.config/git-generate-authors/config.toml    User defaults ([defaults] table)
  <repo>/authors.toml or <repo>/.authorsrc.json  Project defaults and [bots] overrides"
)]
pub struct Cli {
    /// Write result to this file ("-" for stdout) [default: AUTHORS]
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<String>,

    /// Repository path
    #[arg(long, short = 'r', value_name = "DIR", default_value = ".")]
    pub repo: PathBuf,

    /// Sort authors [default: first-commit]
    #[arg(long, short = 's', value_parser = ["first-commit", "last-commit", "commits", "name", "email"])]
    pub sort: Option<String>,

    /// Identity strategy [default: alias-set]
    #[arg(long, value_parser = ["alias-set", "email", "name-email"])]
    pub strategy: Option<String>,

    /// Output format [default: text]
    #[arg(long, short = 'f', value_parser = ["text", "json"])]
    pub format: Option<String>,

    /// Keep bots in history
    #[arg(long)]
    pub keep_bots: bool,

    /// Do not use .mailmap
    #[arg(long)]
    pub skip_mailmap: bool,

    /// Read a pre-exported `git log` stream instead of the repository ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub log: Option<String>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes priority
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    generate::run(&cli)
}
