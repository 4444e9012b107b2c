//! Show-help call site scanner for C sources.
//!
//! Calls look like `pmix_show_help("help-file.txt", "topic", ...)`, but the
//! two string literals are frequently wrapped onto the following lines, so
//! each file is scanned with a small state machine.

use std::path::PathBuf;

use crate::domain::{Citation, Citations, ParseStats};
use crate::error::Result;
use crate::utils::read_text;

/// Substrings that mark a call which displays a help topic.
pub const SHOW_HELP_MARKERS: &[&str] =
    &["pmix_show_help(", "pmix_show_help_string(", "send_error_show_help"];

/// Lines starting with these are never inspected.
const COMMENT_PREFIXES: &[&str] = &["//", "/*", "* ", "PRTE_EXPORT"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Idle,
    /// Marker seen, no literal yet.
    AwaitFilename,
    /// File literal captured, topic literal still pending.
    AwaitTopic { file: String },
}

/// Up to two leading double-quoted literals of a line.
///
/// Escaped quotes inside a literal are not understood and end it early.
#[derive(Debug, PartialEq, Eq)]
enum Literals<'a> {
    Missing,
    One(&'a str),
    Two(&'a str, &'a str),
    Unterminated,
}

fn next_literal(text: &str) -> Option<Result<(&str, &str), ()>> {
    let open = text.find('"')?;
    let body = &text[open + 1..];
    Some(match body.find('"') {
        Some(close) => Ok((&body[..close], &body[close + 1..])),
        None => Err(()),
    })
}

fn literals(text: &str) -> Literals<'_> {
    match next_literal(text) {
        None => Literals::Missing,
        Some(Err(())) => Literals::Unterminated,
        Some(Ok((first, rest))) => match next_literal(rest) {
            Some(Ok((second, _))) => Literals::Two(first, second),
            _ => Literals::One(first),
        },
    }
}

/// Per-file citation extractor. Feed it trimmed lines in order.
#[derive(Debug)]
pub struct CallScanner {
    state: ScanState,
    unterminated: usize,
}

impl Default for CallScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl CallScanner {
    pub fn new() -> Self {
        Self { state: ScanState::Idle, unterminated: 0 }
    }

    /// Number of literals that were opened but never closed on their line.
    pub fn unterminated(&self) -> usize {
        self.unterminated
    }

    /// Consume one line, returning the citation it completes, if any.
    pub fn feed(&mut self, raw: &str) -> Option<Citation> {
        let line = raw.trim();
        if COMMENT_PREFIXES.iter().any(|p| line.starts_with(p)) {
            return None;
        }

        let tail = marker_tail(line);
        let pending = std::mem::replace(&mut self.state, ScanState::Idle);

        let Some(after) = tail else {
            match pending {
                ScanState::Idle => {}
                ScanState::AwaitTopic { file } => match next_literal(line) {
                    Some(Ok((topic, _))) => return Some(Citation::new(file, topic)),
                    _ => self.state = ScanState::AwaitTopic { file },
                },
                ScanState::AwaitFilename => match literals(line) {
                    Literals::Missing => self.state = ScanState::AwaitFilename,
                    other => return self.take_literals(other),
                },
            }
            return None;
        };

        if pending != ScanState::Idle {
            tracing::debug!("abandoning incomplete show-help call at: {}", line);
        }
        match literals(after) {
            Literals::Missing => {
                self.state = ScanState::AwaitFilename;
                None
            }
            other => self.take_literals(other),
        }
    }

    fn take_literals(&mut self, found: Literals<'_>) -> Option<Citation> {
        match found {
            Literals::Two(file, topic) => {
                self.state = ScanState::Idle;
                Some(Citation::new(file, topic))
            }
            Literals::One(file) => {
                self.state = ScanState::AwaitTopic { file: file.to_string() };
                None
            }
            Literals::Unterminated => {
                tracing::warn!("unterminated string literal in show-help call");
                self.unterminated += 1;
                self.state = ScanState::Idle;
                None
            }
            Literals::Missing => None,
        }
    }
}

/// Text following the earliest show-help marker on `line`.
fn marker_tail(line: &str) -> Option<&str> {
    SHOW_HELP_MARKERS
        .iter()
        .filter_map(|m| line.find(m).map(|pos| pos + m.len()))
        .min()
        .map(|end| &line[end..])
}

/// Scan source text, appending every completed citation.
pub fn scan_source_text(content: &str, citations: &mut Citations, stats: &mut ParseStats) {
    let mut scanner = CallScanner::new();
    for line in content.lines() {
        if let Some(citation) = scanner.feed(line) {
            tracing::debug!("Found topic: {} {}", citation.file, citation.topic);
            citations.push(citation);
        }
    }
    stats.unterminated_literals += scanner.unterminated();
}

/// Scan every source file in `paths` for show-help citations.
pub fn scan_sources(
    paths: &[PathBuf],
    citations: &mut Citations,
    stats: &mut ParseStats,
) -> Result<()> {
    for path in paths {
        let content = read_text(path)?;
        let before = citations.len();
        scan_source_text(&content, citations, stats);
        let found = citations.len() - before;
        if found > 0 {
            tracing::debug!(file = %path.display(), found, "show-help citations");
        }
    }
    Ok(())
}
