//! Generate command: read history, resolve identities, write the report

use super::Cli;
use anyhow::{Context, Result};
use console::style;
use git_generate_authors::config::{
    layered_defaults, load_project_config, BotConfig, CliDefaults, UserConfig,
};
use git_generate_authors::git::{GitHistory, HistoryOptions, HistoryResult, LogReader};
use git_generate_authors::models::{AuthorRecord, Observation};
use git_generate_authors::reporters::{report, OutputFormat};
use git_generate_authors::resolver::{resolve, ResolveOptions, SortKey, Strategy};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_OUTPUT: &str = "AUTHORS";
const STDOUT: &str = "-";

/// Effective settings after layering config files under CLI flags
#[derive(Debug)]
struct Settings {
    output: String,
    format: OutputFormat,
    use_mailmap: bool,
    resolve: ResolveOptions,
}

impl Settings {
    fn new(cli: &Cli, defaults: CliDefaults, bots: &BotConfig) -> Result<Self> {
        let sort = match cli.sort.as_deref().or(defaults.sort.as_deref()) {
            Some(s) => s.parse::<SortKey>()?,
            None => SortKey::FirstCommit,
        };
        let strategy = match cli.strategy.as_deref().or(defaults.strategy.as_deref()) {
            Some(s) => s.parse::<Strategy>()?,
            None => Strategy::default(),
        };
        let format = match cli.format.as_deref().or(defaults.format.as_deref()) {
            Some(s) => s.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };

        Ok(Self {
            output: cli
                .output
                .clone()
                .or(defaults.output)
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            format,
            use_mailmap: !(cli.skip_mailmap || defaults.skip_mailmap.unwrap_or(false)),
            resolve: ResolveOptions {
                strategy,
                keep_bots: cli.keep_bots || defaults.keep_bots.unwrap_or(false),
                bots: bots.filter()?,
                sort: Some(sort),
            },
        })
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let user = UserConfig::load();

    let (authors, settings) = match cli.log.as_deref() {
        Some(log) => {
            let project = load_project_config(&cli.repo);
            let settings = Settings::new(cli, layered_defaults(&user, &project), &project.bots)?;
            let mut reader = LogReader::new(open_log(log)?);
            let authors = resolve_stream(reader.by_ref(), &settings.resolve)
                .with_context(|| format!("Failed to read git log from {}", log))?;
            debug!("Read {} attribution(s) from {}", reader.emitted(), log);
            (authors, settings)
        }
        None => {
            let history = GitHistory::open(&cli.repo)?;
            let root = history.repo_root().unwrap_or(cli.repo.as_path());
            debug!("Reading history of {}", root.display());

            let project = load_project_config(root);
            let settings = Settings::new(cli, layered_defaults(&user, &project), &project.bots)?;
            let mut observations = history.observations(&HistoryOptions {
                use_mailmap: settings.use_mailmap,
            })?;
            let authors = resolve_stream(observations.by_ref(), &settings.resolve)
                .context("Failed to walk repository history")?;
            debug!("Walked {} commit(s)", observations.commits_walked());
            (authors, settings)
        }
    };

    let rendered = report(&authors, settings.resolve.sort, settings.format)?;
    let summary = format!("Found {} author(s)", style(authors.len()).bold());
    if settings.output == STDOUT {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        eprintln!("{}", summary);
    } else {
        std::fs::write(&settings.output, &rendered)
            .with_context(|| format!("Failed to write {}", settings.output))?;
        println!("{} {}", summary, style(format!("-> {}", settings.output)).dim());
    }

    info!("Wrote {} author(s) as {}", authors.len(), settings.format);
    Ok(())
}

fn open_log(log: &str) -> Result<Box<dyn BufRead>> {
    if log == STDOUT {
        return Ok(Box::new(std::io::stdin().lock()));
    }
    let file = File::open(Path::new(log)).with_context(|| format!("Failed to open {}", log))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Feed a fallible observation stream to the resolver.
///
/// The stream stays lazy; the first read error stops it and is returned
/// once the resolver has finished.
fn resolve_stream<I>(source: I, options: &ResolveOptions) -> Result<Vec<AuthorRecord>>
where
    I: Iterator<Item = HistoryResult<Observation>>,
{
    let mut failure = None;
    let stream = source.map_while(|item| match item {
        Ok(obs) => Some(obs),
        Err(e) => {
            failure = Some(e);
            None
        }
    });
    let authors = resolve(stream, options);

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(authors),
    }
}
