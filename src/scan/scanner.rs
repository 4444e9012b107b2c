//! Source tree walker that sorts help files and C sources into citation domains.

use crate::config::Config;
use crate::domain::ScannedTree;
use crate::error::{HelpgenError, Result};
use crate::utils::normalize_path;
use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Walks a source tree and classifies files into four buckets.
pub struct TreeScanner {
    root_path: PathBuf,
    skip_dirs: Vec<String>,
    skip_files: Vec<String>,
    tool_markers: Vec<String>,
    help_glob: String,
    source_extensions: Vec<String>,
}

impl TreeScanner {
    /// Create a scanner with the stock PRRTE layout rules.
    pub fn new(root_path: PathBuf) -> Self {
        Self::from_config(root_path, &Config::default())
    }

    pub fn from_config(root_path: PathBuf, config: &Config) -> Self {
        Self {
            root_path,
            skip_dirs: config.skip_dirs.clone(),
            skip_files: config.skip_files.clone(),
            tool_markers: config.tool_markers.clone(),
            help_glob: config.help_glob.clone(),
            source_extensions: config.source_extensions.clone(),
        }
    }

    /// Set help file basenames to ignore
    pub fn skip_files(mut self, files: Vec<String>) -> Self {
        self.skip_files = files;
        self
    }

    /// Set path substrings that mark a file as belonging to the tools
    pub fn tool_markers(mut self, markers: Vec<String>) -> Self {
        self.tool_markers = markers;
        self
    }

    fn build_help_matcher(&self) -> Result<GlobMatcher> {
        Glob::new(&self.help_glob).map(|g| g.compile_matcher()).map_err(|source| {
            HelpgenError::InvalidPattern { pattern: self.help_glob.clone(), source }
        })
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        entry.file_name().to_str().is_some_and(|name| self.skip_dirs.iter().any(|d| d == name))
    }

    /// Tool markers are matched against the path below the root so that the
    /// location of the checkout itself never changes classification.
    fn is_tool_path(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root_path).unwrap_or(path);
        let rel = normalize_path(&rel.to_string_lossy());
        self.tool_markers.iter().any(|marker| rel.contains(marker.as_str()))
    }

    fn is_source_file(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }

    /// Walk the tree. Paths within each bucket come out in sorted walk order.
    pub fn scan(&self) -> Result<ScannedTree> {
        if !self.root_path.is_dir() {
            return Err(HelpgenError::RootNotFound(self.root_path.clone()));
        }

        let help_matcher = self.build_help_matcher()?;
        let mut tree = ScannedTree::default();

        let walker = WalkDir::new(&self.root_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_skipped_dir(e));

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    tracing::debug!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let path = entry.path().to_path_buf();
            let is_tool = self.is_tool_path(&path);

            if help_matcher.is_match(name) {
                if self.skip_files.iter().any(|f| f == name) {
                    tracing::debug!("Skipping help: {}", path.display());
                    continue;
                }
                if is_tool {
                    tracing::info!("Found tool help: {}", path.display());
                    tree.tool_help_files.push(path);
                } else {
                    tracing::info!("Found help: {}", path.display());
                    tree.help_files.push(path);
                }
            } else if self.is_source_file(name) {
                tracing::debug!("Found source: {}", path.display());
                if is_tool {
                    tree.tool_source_files.push(path);
                } else {
                    tree.source_files.push(path);
                }
            }
        }

        Ok(tree)
    }
}
