//! Usage-table scanner for tool help files.
//!
//! The `[usage]` section of a tool help file documents its command-line
//! options as a pipe table:
//!
//! ```text
//! | -n | --np <arg>       | Number of processes to run          |
//! | -r | --report-        | Print the DVM URI to the given file |
//! | uri                   |                                     |
//! ```
//!
//! A long option whose text ends in `-` wraps onto the next row. Every option
//! that shares its name with a topic of the same file cites that topic.

use std::path::{Path, PathBuf};

use crate::domain::{Citations, Corpus};
use crate::error::Result;
use crate::utils::{basename, read_text};

/// Options every tool has; they never name a help topic.
const STANDARD_OPTIONS: &[&str] = &["help", "version", "verbose"];

const USAGE_TOPIC: &str = "usage";

#[derive(Debug, Clone, PartialEq, Eq)]
enum UsageState {
    Outside,
    InUsage,
    /// Inside the usage table with a long option wrapped onto the next row.
    Continuation { prefix: String },
}

/// Find `pat` within `line[from..to]`, returning an absolute index.
fn find_in(line: &str, pat: &str, from: usize, to: usize) -> Option<usize> {
    let to = to.min(line.len());
    if from >= to {
        return None;
    }
    line.get(from..to)?.find(pat).map(|i| i + from)
}

fn strip_quote(token: &str) -> &str {
    token.strip_suffix('"').unwrap_or(token)
}

fn is_usage_header(line: &str) -> bool {
    if !(line.starts_with('[') && line.ends_with(']')) {
        return false;
    }
    line[1..].split(']').next() == Some(USAGE_TOPIC)
}

/// Extract the option tokens listed in the `[usage]` table of a help file.
pub fn usage_options(content: &str) -> Vec<String> {
    let mut options = Vec::new();
    let mut state = UsageState::Outside;

    for raw in content.lines() {
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            state = UsageState::Outside;
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            if is_usage_header(line) {
                state = UsageState::InUsage;
            }
            continue;
        }
        if state == UsageState::Outside || !line.starts_with('|') {
            continue;
        }

        state = match state {
            UsageState::Continuation { prefix } => {
                if let Some(option) = continuation_option(line, &prefix) {
                    push_option(&mut options, option);
                }
                UsageState::InUsage
            }
            _ => match scan_row(line, &mut options) {
                Some(prefix) => UsageState::Continuation { prefix },
                None => UsageState::InUsage,
            },
        };
    }

    options
}

/// Scan one table row, pushing its options. Returns the prefix of a long
/// option that wraps onto the next row.
fn scan_row(line: &str, options: &mut Vec<String>) -> Option<String> {
    let len = line.len();
    let cell_end = find_in(line, "|", 2, len).unwrap_or(len);
    let dash = find_in(line, "-", 2, cell_end)?;

    let mut long_end = cell_end;
    match line[dash + 1..].chars().next() {
        Some('-') => {}
        Some(short) => {
            if !short.is_whitespace() {
                options.push(short.to_string());
            }
            // The long form lives in the next cell.
            long_end = find_in(line, "|", dash + 6, len).unwrap_or(len);
        }
        None => return None,
    }

    let start = find_in(line, "--", 2, long_end)? + 2;
    let end = find_in(line, " ", start + 1, long_end).unwrap_or(long_end);
    let token = strip_quote(line.get(start..end)?.trim());

    if token.ends_with('-') {
        return Some(token.to_string());
    }
    push_option(options, token.to_string());
    None
}

/// Complete a wrapped long option from the first word of a continuation row.
fn continuation_option(line: &str, prefix: &str) -> Option<String> {
    let len = line.len();
    let cell_end = find_in(line, "|", 2, len).unwrap_or(len);
    let cell = line.get(2..cell_end)?;
    let word = cell.trim_start().split(' ').next().unwrap_or("");
    Some(format!("{}{}", prefix, strip_quote(word)))
}

fn push_option(options: &mut Vec<String>, option: String) {
    if option.is_empty() || STANDARD_OPTIONS.contains(&option.as_str()) {
        return;
    }
    options.push(option);
}

/// Cite every topic of `file_key` that matches one of `options`.
pub fn cite_options(
    file_key: &str,
    options: &[String],
    topics: &[String],
    citations: &mut Citations,
) {
    for option in options {
        if topics.iter().any(|t| t == option) {
            tracing::info!("CITED {} {}", file_key, option);
            citations.cite(file_key, option.as_str());
        }
    }
}

fn scan_one(path: &Path, corpus: &Corpus, citations: &mut Citations) -> Result<()> {
    let content = read_text(path)?;
    let options = usage_options(&content);
    let topics = corpus.topics_of(path);
    tracing::debug!(
        file = %path.display(),
        options = options.len(),
        topics = topics.len(),
        "scanned usage table"
    );
    cite_options(&basename(path), &options, &topics, citations);
    Ok(())
}

/// Scan the usage table of every tool help file and cite matching topics.
pub fn scan_tool_usage(
    paths: &[PathBuf],
    corpus: &Corpus,
    citations: &mut Citations,
) -> Result<()> {
    for path in paths {
        scan_one(path, corpus, citations)?;
    }
    Ok(())
}
