//! INI-style help file parser.
//!
//! A help file is a sequence of `[topic]` headers, each followed by the raw
//! lines of text shown for that topic. A `#` line is a comment and closes the
//! open section. `#include#<file>#<topic>` pulls in a topic from another
//! file: the directive is kept verbatim as content, and both the target and
//! the including section are recorded as cited.

use std::path::PathBuf;

use crate::domain::{Citations, Corpus, HelpFile, ParseStats};
use crate::error::Result;
use crate::utils::{basename, read_text};

const INCLUDE_KEYWORD: &str = "#include";

/// Parse every file in `paths` and merge it into `corpus`.
///
/// A path already in the corpus is reported and skipped.
pub fn parse_help_files(
    paths: &[PathBuf],
    corpus: &mut Corpus,
    citations: &mut Citations,
    stats: &mut ParseStats,
) -> Result<()> {
    for path in paths {
        if corpus.contains(path) {
            tracing::error!(file = %path.display(), "path already exists in help corpus");
            stats.duplicate_paths += 1;
            continue;
        }

        let content = read_text(path)?;
        let file = parse_help_text(&basename(path), &content, citations, stats);
        tracing::info!("Parsed: {} ({} sections found)", path.display(), file.len());

        stats.files_parsed += 1;
        corpus.insert(path.clone(), file);
    }
    Ok(())
}

/// Parse one help file's text. `file_key` is the basename used for self-citations.
pub fn parse_help_text(
    file_key: &str,
    content: &str,
    citations: &mut Citations,
    stats: &mut ParseStats,
) -> HelpFile {
    let mut file = HelpFile::new();
    let mut current: Option<usize> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim_end();
        let lead = line.trim_start();
        if lead.is_empty() {
            continue;
        }

        if lead.starts_with(INCLUDE_KEYWORD) {
            let Some(section) = current else {
                tracing::error!(
                    file = file_key,
                    line = idx + 1,
                    "include directive outside of a section"
                );
                stats.orphan_includes += 1;
                continue;
            };
            file.push_line(section, line);

            match include_target(lead) {
                Some((target_file, target_topic)) => citations.cite(target_file, target_topic),
                None => {
                    tracing::warn!(file = file_key, line = idx + 1, "malformed include directive");
                    stats.malformed_includes += 1;
                }
            }
            if let Some(topic) = file.topic_name(section) {
                citations.cite(file_key, topic);
            }
            continue;
        }

        if lead.starts_with('#') {
            current = None;
            continue;
        }

        if let Some(header) = lead.strip_prefix('[') {
            if let Some(end) = header.find(']') {
                current = Some(file.open(&header[..end]));
            }
            continue;
        }

        if let Some(section) = current {
            file.push_line(section, line);
        }
    }

    file
}

/// Split an include directive into `(file, topic)`.
///
/// Accepts `#include#file#topic` and the three-field `#include#x#file#topic`,
/// where the last two `#`-delimited fields name the target.
pub fn include_target(directive: &str) -> Option<(&str, &str)> {
    let body = directive.strip_prefix(INCLUDE_KEYWORD)?;
    let fields = &body[body.find('#')? + 1..];

    let first_end = fields.find('#')?;
    let rest = &fields[first_end + 1..];
    let (file, topic) = match rest.find('#') {
        Some(second_end) => (&rest[..second_end], &rest[second_end + 1..]),
        None => (&fields[..first_end], rest),
    };

    let topic = topic.trim();
    if file.is_empty() || topic.is_empty() {
        return None;
    }
    Some((file, topic))
}
