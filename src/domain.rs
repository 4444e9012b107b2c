//! Core data model: options, citations, help sections and the corpus.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::utils::basename;

/// Section names that are always retained by the purge pass.
pub const DEFAULT_SPECIAL_TOPICS: &[&str] = &[
    "help",
    "version",
    "usage",
    "placement",
    "placement-examples",
    "placement-rankfiles",
    "placement-deprecated",
    "placement-diagnostics",
    "placement-fundamentals",
    "placement-limits",
];

/// A command-line option token taken from a `#define NAME "value"` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOption {
    pub name: String,
    pub value: String,
}

/// Evidence that `topic` inside help file `file` is referenced somewhere.
///
/// `file` is a basename (e.g. `help-prte-runtime.txt`), never a full path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Citation {
    pub file: String,
    pub topic: String,
}

impl Citation {
    pub fn new(file: impl Into<String>, topic: impl Into<String>) -> Self {
        Self { file: file.into(), topic: topic.into() }
    }
}

/// Append-only collection of citations. Duplicates are allowed.
#[derive(Debug, Clone, Default)]
pub struct Citations {
    entries: Vec<Citation>,
}

impl Citations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, citation: Citation) {
        self.entries.push(citation);
    }

    pub fn cite(&mut self, file: impl Into<String>, topic: impl Into<String>) {
        self.push(Citation::new(file, topic));
    }

    /// True when at least one citation names exactly `(file, topic)`.
    pub fn contains(&self, file: &str, topic: &str) -> bool {
        self.entries.iter().any(|c| c.file == file && c.topic == topic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Citation> {
        self.entries.iter()
    }
}

/// One `[topic]` block of a help file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub topic: String,
    pub lines: Vec<String>,
}

impl Section {
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into(), lines: Vec::new() }
    }

    /// Content lines joined with `\n`, used for duplicate comparison.
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

/// The sections of one help file, in the order their headers first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpFile {
    sections: Vec<Section>,
}

impl HelpFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh, empty section. Reopening an existing topic clears its
    /// content but keeps its original position.
    pub fn open(&mut self, topic: &str) -> usize {
        if let Some(idx) = self.sections.iter().position(|s| s.topic == topic) {
            self.sections[idx].lines.clear();
            idx
        } else {
            self.sections.push(Section::new(topic));
            self.sections.len() - 1
        }
    }

    pub fn push_line(&mut self, idx: usize, line: impl Into<String>) {
        if let Some(section) = self.sections.get_mut(idx) {
            section.lines.push(line.into());
        }
    }

    pub fn insert(&mut self, section: Section) {
        match self.sections.iter_mut().find(|s| s.topic == section.topic) {
            Some(existing) => *existing = section,
            None => self.sections.push(section),
        }
    }

    pub fn get(&self, topic: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.topic == topic)
    }

    pub fn topic_name(&self, idx: usize) -> Option<&str> {
        self.sections.get(idx).map(|s| s.topic.as_str())
    }

    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.topic.as_str())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// All parsed help files keyed by path. Iteration is sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    files: BTreeMap<PathBuf, HelpFile>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    /// Insert a parsed file. Returns `false` and leaves the corpus untouched
    /// when `path` is already present.
    pub fn insert(&mut self, path: PathBuf, file: HelpFile) -> bool {
        if self.files.contains_key(&path) {
            return false;
        }
        self.files.insert(path, file);
        true
    }

    pub fn get(&self, path: &Path) -> Option<&HelpFile> {
        self.files.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &HelpFile)> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.files.values().map(HelpFile::len).sum()
    }

    /// Topic names of the file at `path`, or nothing if it was never parsed.
    pub fn topics_of(&self, path: &Path) -> Vec<String> {
        self.files
            .get(path)
            .map(|f| f.topics().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Basename used in citations and in the generated table for `path`.
    pub fn file_key(path: &Path) -> String {
        basename(path)
    }
}

/// Output of the tree scanner: four buckets of classified paths.
#[derive(Debug, Clone, Default)]
pub struct ScannedTree {
    pub help_files: Vec<PathBuf>,
    pub source_files: Vec<PathBuf>,
    pub tool_help_files: Vec<PathBuf>,
    pub tool_source_files: Vec<PathBuf>,
}

/// Counters for non-fatal structural problems found while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub files_parsed: usize,
    pub duplicate_paths: usize,
    pub orphan_includes: usize,
    pub malformed_includes: usize,
    pub unterminated_literals: usize,
}

impl ParseStats {
    pub fn has_problems(&self) -> bool {
        self.duplicate_paths
            + self.orphan_includes
            + self.malformed_includes
            + self.unterminated_literals
            > 0
    }
}
