//! Citation reconciler.
//!
//! Walks the corpus file by file and checks every section against the rest
//! of the corpus and against the citation list. Sections nobody cites are
//! dropped from the result. Purging is a build gate: the first file with any
//! problem fails the pass, after all of that file's problems are reported.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::{Citations, Corpus, HelpFile, Section};

/// A defect found while purging one help file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Another file has a section of the same name with identical content.
    Duplicate { topic: String, other: PathBuf },
    /// Another file has a section of the same name with different content.
    ConflictingDuplicate { topic: String, other: PathBuf },
    /// No citation references this section.
    UnusedTopic { topic: String },
    /// Every section of the file was dropped.
    NoUsedTopics,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Duplicate { topic, other } => {
                write!(f, "duplicate section [{}] also in {}", topic, other.display())
            }
            Problem::ConflictingDuplicate { topic, other } => write!(
                f,
                "section [{}] also in {} with different content",
                topic,
                other.display()
            ),
            Problem::UnusedTopic { topic } => write!(f, "unused help topic [{}]", topic),
            Problem::NoUsedTopics => write!(f, "no used topics left"),
        }
    }
}

/// The purge pass stopped at `file`.
///
/// `pruned` holds what had been kept up to and including `file`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("purge failed for {}: {}", .file.display(), summarize(.problems))]
pub struct PurgeFailure {
    pub file: PathBuf,
    pub problems: Vec<Problem>,
    pub pruned: Corpus,
}

fn summarize(problems: &[Problem]) -> String {
    problems.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Compare `section` with same-named sections in every other file.
fn cross_file_problems(corpus: &Corpus, path: &Path, section: &Section) -> Vec<Problem> {
    let content = section.joined();
    let mut problems = Vec::new();

    for (other_path, other_file) in corpus.iter() {
        if other_path == path {
            continue;
        }
        let Some(other_section) = other_file.get(&section.topic) else {
            continue;
        };
        let topic = section.topic.clone();
        let other = other_path.clone();
        if other_section.joined() == content {
            tracing::error!(
                section = %topic,
                file = %path.display(),
                other = %other.display(),
                "duplicate help section"
            );
            problems.push(Problem::Duplicate { topic, other });
        } else {
            tracing::error!(
                section = %topic,
                file = %path.display(),
                other = %other.display(),
                "duplicate help section with different content"
            );
            problems.push(Problem::ConflictingDuplicate { topic, other });
        }
    }

    problems
}

/// Prune uncited sections from `corpus`.
///
/// `special_topics` are kept without needing a citation.
pub fn purge(
    corpus: &Corpus,
    citations: &Citations,
    special_topics: &[String],
) -> Result<Corpus, PurgeFailure> {
    let mut result = Corpus::new();

    for (path, file) in corpus.iter() {
        let file_key = Corpus::file_key(path);
        let mut kept = HelpFile::new();
        let mut problems = Vec::new();

        for section in file.sections() {
            problems.extend(cross_file_problems(corpus, path, section));

            if special_topics.iter().any(|t| *t == section.topic) {
                kept.insert(section.clone());
                continue;
            }

            if citations.contains(&file_key, &section.topic) {
                tracing::debug!("Cited: {} [{}]", file_key, section.topic);
                kept.insert(section.clone());
            } else {
                tracing::warn!(
                    file = %path.display(),
                    section = %section.topic,
                    "unused help topic"
                );
                problems.push(Problem::UnusedTopic { topic: section.topic.clone() });
            }
        }

        if kept.is_empty() {
            tracing::error!(file = %path.display(), "file has no used topics - omitting");
            problems.push(Problem::NoUsedTopics);
        } else {
            result.insert(path.clone(), kept);
        }

        if !problems.is_empty() {
            return Err(PurgeFailure { file: path.clone(), problems, pruned: result });
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_SPECIAL_TOPICS;

    fn specials() -> Vec<String> {
        DEFAULT_SPECIAL_TOPICS.iter().map(|s| s.to_string()).collect()
    }

    fn help_file(sections: &[(&str, &str)]) -> HelpFile {
        let mut file = HelpFile::new();
        for (topic, content) in sections {
            let idx = file.open(topic);
            for line in content.lines() {
                file.push_line(idx, line);
            }
        }
        file
    }

    #[test]
    fn test_uncited_section_fails_and_is_reported() {
        let mut corpus = Corpus::new();
        corpus.insert(PathBuf::from("/t/help-a.txt"), help_file(&[("a", "A"), ("b", "B")]));
        let mut citations = Citations::new();
        citations.cite("help-a.txt", "a");

        let failure = purge(&corpus, &citations, &specials()).unwrap_err();
        assert_eq!(failure.file, PathBuf::from("/t/help-a.txt"));
        assert_eq!(failure.problems, vec![Problem::UnusedTopic { topic: "b".into() }]);

        let kept = failure.pruned.get(&failure.file).expect("file kept");
        assert_eq!(kept.topics().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_fully_cited_corpus_is_retained() {
        let mut corpus = Corpus::new();
        corpus.insert(
            PathBuf::from("/t/help-a.txt"),
            help_file(&[("a", "A"), ("usage", "u")]),
        );
        let mut citations = Citations::new();
        citations.cite("help-a.txt", "a");

        let pruned = purge(&corpus, &citations, &specials()).unwrap();
        assert_eq!(pruned, corpus);
    }

    #[test]
    fn test_citation_must_match_basename_exactly() {
        let mut corpus = Corpus::new();
        corpus.insert(PathBuf::from("/t/help-a.txt"), help_file(&[("a", "A")]));
        let mut citations = Citations::new();
        citations.cite("help-a", "a");

        let failure = purge(&corpus, &citations, &specials()).unwrap_err();
        assert_eq!(
            failure.problems,
            vec![Problem::UnusedTopic { topic: "a".into() }, Problem::NoUsedTopics]
        );
    }

    #[test]
    fn test_identical_duplicate_flags_both_but_removes_neither() {
        let mut corpus = Corpus::new();
        corpus.insert(PathBuf::from("/t/help-a.txt"), help_file(&[("x", "same")]));
        corpus.insert(PathBuf::from("/t/help-b.txt"), help_file(&[("x", "same")]));
        let mut citations = Citations::new();
        citations.cite("help-a.txt", "x");
        citations.cite("help-b.txt", "x");

        let failure = purge(&corpus, &citations, &specials()).unwrap_err();
        assert_eq!(failure.file, PathBuf::from("/t/help-a.txt"));
        assert_eq!(
            failure.problems,
            vec![Problem::Duplicate { topic: "x".into(), other: PathBuf::from("/t/help-b.txt") }]
        );
    }

    #[test]
    fn test_conflicting_duplicate_is_distinguished() {
        let mut corpus = Corpus::new();
        corpus.insert(PathBuf::from("/t/help-a.txt"), help_file(&[("help", "one")]));
        corpus.insert(PathBuf::from("/t/help-b.txt"), help_file(&[("help", "two")]));

        let failure = purge(&corpus, &Citations::new(), &specials()).unwrap_err();
        assert_eq!(
            failure.problems,
            vec![Problem::ConflictingDuplicate {
                topic: "help".into(),
                other: PathBuf::from("/t/help-b.txt"),
            }]
        );
    }

    #[test]
    fn test_stops_at_first_failing_file() {
        let mut corpus = Corpus::new();
        corpus.insert(PathBuf::from("/t/help-a.txt"), help_file(&[("ok", "fine")]));
        corpus.insert(PathBuf::from("/t/help-b.txt"), help_file(&[("unused", "x")]));
        corpus.insert(PathBuf::from("/t/help-c.txt"), help_file(&[("also-unused", "y")]));
        let mut citations = Citations::new();
        citations.cite("help-a.txt", "ok");

        let failure = purge(&corpus, &citations, &specials()).unwrap_err();
        assert_eq!(failure.file, PathBuf::from("/t/help-b.txt"));
        assert_eq!(
            failure.problems,
            vec![Problem::UnusedTopic { topic: "unused".into() }, Problem::NoUsedTopics]
        );
        assert!(failure.to_string().contains("unused help topic [unused]"));
    }
}
