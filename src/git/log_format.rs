//! `git log` text format
//!
//! Parses the output of
//!
//! ```text
//! git log --reverse --format='%x1eDate: %at%nAuthor: %aN <%aE>%n%b'
//! ```
//!
//! A date line sets the timestamp for the attributions that follow it.
//! Every `Author:` and `Co-authored-by:` line becomes an observation.
//!
//! The record separator (`\x1e`) in front of `Date:` marks the commit
//! header, so a `Date:` line inside a commit message is never mistaken for
//! one. Logs exported without the separator are accepted too: there a bare
//! `Date:` line only counts when the very next line is the commit's
//! `Author:` line. Output without any date line is stamped with the Unix
//! epoch.

use super::HistoryResult;
use crate::models::Observation;
use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;
use tracing::trace;

/// `--format` argument producing the text [`LogReader`] understands
pub const LOG_FORMAT: &str = "%x1eDate: %at%nAuthor: %aN <%aE>%n%b";

/// Prefix `%x1e` expands to
const RECORD_SEPARATOR: char = '\u{1e}';

fn attribution_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?P<kind>Author:|Co-authored-by:)\s+(?P<name>.+)\s+<(?P<email>.+)>")
            .expect("valid regex")
    })
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^Date:\s+(?P<secs>-?\d+)\s*$").expect("valid regex"))
}

/// Where an attribution line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributionKind {
    Author,
    CoAuthor,
}

/// A parsed `Author:` / `Co-authored-by:` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribution<'a> {
    pub kind: AttributionKind,
    pub name: &'a str,
    pub email: &'a str,
}

/// Parse one attribution line. Returns `None` for anything else.
pub fn parse_attribution(line: &str) -> Option<Attribution<'_>> {
    let caps = attribution_re().captures(line)?;
    let kind = if caps["kind"].eq_ignore_ascii_case("author:") {
        AttributionKind::Author
    } else {
        AttributionKind::CoAuthor
    };
    let name = caps.name("name")?.as_str().trim();
    let email = caps.name("email")?.as_str().trim();
    if name.is_empty() || email.is_empty() {
        return None;
    }
    Some(Attribution { kind, name, email })
}

/// A commit date line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateLine {
    /// Prefixed with the record separator
    marked: bool,
    /// `None` when the value is unusable
    at: Option<DateTime<Utc>>,
}

/// Parse a `Date: <unix seconds>` line, with or without the separator.
fn parse_date(line: &str) -> Option<DateLine> {
    let (marked, rest) = match line.strip_prefix(RECORD_SEPARATOR) {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    if !rest.get(..5)?.eq_ignore_ascii_case("date:") {
        return None;
    }
    let at = date_re()
        .captures(rest)
        .and_then(|caps| caps["secs"].parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
    Some(DateLine { marked, at })
}

/// Streaming reader over `git log` text.
pub struct LogReader<R> {
    input: R,
    buf: Vec<u8>,
    /// Timestamp of the commit being read; `None` after a bad date line
    current: Option<DateTime<Utc>>,
    /// Bare `Date:` line waiting to see whether an `Author:` line follows
    held: Option<DateLine>,
    /// Separator-marked date lines seen; bare ones are body text from then on
    marked: bool,
    sequence: u64,
    line_no: u64,
}

impl<R: BufRead> LogReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::new(),
            current: Utc.timestamp_opt(0, 0).single(),
            held: None,
            marked: false,
            sequence: 0,
            line_no: 0,
        }
    }

    /// Observations emitted so far
    pub fn emitted(&self) -> u64 {
        self.sequence
    }
}

/// Timestamp a date line sets, tracing unusable values
fn commit_time(date: DateLine, line_no: u64) -> Option<DateTime<Utc>> {
    if date.at.is_none() {
        trace!("Unparseable commit date before log line {}", line_no);
    }
    date.at
}

impl<R: BufRead> Iterator for LogReader<R> {
    type Item = HistoryResult<Observation>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.input.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_no += 1;
            let held = self.held.take();

            let Ok(line) = std::str::from_utf8(&self.buf) else {
                trace!("Skipping non UTF-8 log line {}", self.line_no);
                continue;
            };
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(date) = parse_date(line) {
                if date.marked {
                    self.marked = true;
                    self.current = commit_time(date, self.line_no);
                } else if !self.marked {
                    self.held = Some(date);
                }
                continue;
            }

            let attribution = parse_attribution(line);
            if let Some(date) = held {
                match attribution {
                    Some(a) if a.kind == AttributionKind::Author => {
                        self.current = commit_time(date, self.line_no);
                    }
                    _ => trace!("Ignoring Date: line in commit body before line {}", self.line_no),
                }
            }

            let Some(attribution) = attribution else {
                continue;
            };
            let Some(timestamp) = self.current else {
                trace!("Skipping attribution without a date on line {}", self.line_no);
                continue;
            };

            let obs = Observation::new(attribution.name, attribution.email, timestamp, self.sequence);
            self.sequence += 1;
            return Some(Ok(obs));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(text: &str) -> Vec<Observation> {
        LogReader::new(Cursor::new(text.as_bytes().to_vec()))
            .collect::<HistoryResult<Vec<_>>>()
            .expect("in-memory read")
    }

    #[test]
    fn test_parse_author_line() {
        let a = parse_attribution("Author: Jane Doe <jane@example.com>").expect("author line");
        assert_eq!(a.kind, AttributionKind::Author);
        assert_eq!(a.name, "Jane Doe");
        assert_eq!(a.email, "jane@example.com");
    }

    #[test]
    fn test_parse_co_author_any_case() {
        let a = parse_attribution("co-authored-by: Bob  <Bob@Example.com>").expect("trailer");
        assert_eq!(a.kind, AttributionKind::CoAuthor);
        assert_eq!(a.name, "Bob");
        assert_eq!(a.email, "Bob@Example.com");
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(parse_attribution("Author: no email here").is_none());
        assert!(parse_attribution("Author: <only@email.com>").is_none());
        assert!(parse_attribution("Reviewed-by: Jane <jane@x.com>").is_none());
        assert!(parse_attribution("").is_none());
    }

    #[test]
    fn test_reader_stamps_attributions_with_commit_date() {
        let log = "\
Date: 100
Author: Alice <alice@x.com>
Fix the thing

Co-authored-by: Bob <bob@x.com>
Date: 200
Author: Bob <bob@x.com>
";
        let obs = read_all(log);
        assert_eq!(obs.len(), 3);
        assert_eq!(obs[0].name, "Alice");
        assert_eq!(obs[0].timestamp.timestamp(), 100);
        assert_eq!(obs[1].name, "Bob");
        assert_eq!(obs[1].timestamp.timestamp(), 100);
        assert_eq!(obs[2].timestamp.timestamp(), 200);
        let sequences: Vec<u64> = obs.iter().map(|o| o.sequence).collect();
        assert_eq!(sequences, [0, 1, 2]);
    }

    #[test]
    fn test_reader_without_dates_uses_epoch() {
        let obs = read_all("Author: Alice <alice@x.com>\r\nAuthor: Bob <bob@x.com>\r\n");
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].timestamp.timestamp(), 0);
    }

    #[test]
    fn test_reader_skips_attributions_after_bad_date() {
        let log = "Date: yesterday\nAuthor: Lost <lost@x.com>\nDate: 5\nAuthor: Found <found@x.com>\n";
        let obs = read_all(log);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].name, "Found");
        assert_eq!(obs[0].sequence, 0);
    }

    #[test]
    fn test_reader_skips_invalid_utf8() {
        let mut bytes = b"Author: Alice <alice@x.com>\n".to_vec();
        bytes.extend_from_slice(b"Author: \xff\xfe <bad@x.com>\n");
        bytes.extend_from_slice(b"Author: Carol <carol@x.com>\n");
        let obs = LogReader::new(Cursor::new(bytes))
            .collect::<HistoryResult<Vec<_>>>()
            .expect("in-memory read");
        let names: Vec<&str> = obs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Carol"]);
    }
    #[test]
    fn test_body_date_line_keeps_commit_time() {
        let log = "\
Date: 100
Author: Alice <alice@x.com>
Release notes
Date: next week
Co-authored-by: Bob <bob@x.com>
Date: 150
Co-authored-by: Dan <dan@x.com>
Date: 200
Author: Carol <carol@x.com>
";
        let obs = read_all(log);
        let names: Vec<&str> = obs.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Dan", "Carol"]);
        assert_eq!(obs[1].timestamp.timestamp(), 100);
        assert_eq!(obs[2].timestamp.timestamp(), 100);
        assert_eq!(obs[3].timestamp.timestamp(), 200);
    }

    #[test]
    fn test_separator_marks_commit_dates() {
        let log = "\
\u{1e}Date: 100
Author: Alice <alice@x.com>
Date: 999
Author: Quoted <quoted@x.com>
Co-authored-by: Bob <bob@x.com>
\u{1e}Date: 200
Author: Carol <carol@x.com>
";
        let mut reader = LogReader::new(Cursor::new(log.as_bytes().to_vec()));
        let obs = reader
            .by_ref()
            .collect::<HistoryResult<Vec<_>>>()
            .expect("in-memory read");
        let stamps: Vec<i64> = obs.iter().map(|o| o.timestamp.timestamp()).collect();
        assert_eq!(stamps, [100, 100, 100, 200]);
        assert_eq!(reader.emitted(), 4);
    }

    #[test]
    fn test_log_format_marks_dates() {
        assert!(LOG_FORMAT.starts_with("%x1eDate: %at%n"));
        let line = format!("{}Date: 42", RECORD_SEPARATOR);
        let date = parse_date(&line).expect("date line");
        assert!(date.marked);
        assert_eq!(date.at.map(|t| t.timestamp()), Some(42));
    }
}
