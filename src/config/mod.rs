//! Configuration loading
//!
//! Every setting has a default matching the layout of a PRRTE source tree,
//! so running without a config file reproduces the stock behavior.

pub mod loader;

pub use loader::load_config;

use serde::Deserialize;

use crate::domain::DEFAULT_SPECIAL_TOPICS;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Subdirectory of `--root` that is actually scanned.
    pub source_subdir: String,
    /// Option definition header, relative to the scanned tree.
    pub options_header: String,
    /// Directory names never descended into.
    pub skip_dirs: Vec<String>,
    /// Help file basenames ignored entirely.
    pub skip_files: Vec<String>,
    /// Path substrings that put a file into the tool citation domain.
    pub tool_markers: Vec<String>,
    pub help_glob: String,
    pub source_extensions: Vec<String>,
    pub special_topics: Vec<String>,
    pub codegen: CodegenConfig,
}

/// Names used in the generated C tables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodegenConfig {
    pub entry_type: String,
    pub file_type: String,
    pub table_name: String,
    pub includes: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_subdir: "src".to_string(),
            options_header: "util/prte_cmd_line.h".to_string(),
            skip_dirs: strings(&[".git", ".libs", ".deps"]),
            skip_files: Vec::new(),
            tool_markers: strings(&["schizo/prte", "schizo/ompi", "tools"]),
            help_glob: "help-*.txt".to_string(),
            source_extensions: strings(&["c", "h"]),
            special_topics: strings(DEFAULT_SPECIAL_TOPICS),
            codegen: CodegenConfig::default(),
        }
    }
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            entry_type: "pmix_show_help_entry_t".to_string(),
            file_type: "pmix_show_help_file_t".to_string(),
            table_name: "prte_show_help_data".to_string(),
            includes: strings(&["src/include/prte_config.h", "src/include/pmix_globals.h"]),
        }
    }
}

impl Config {
    pub fn is_special_topic(&self, topic: &str) -> bool {
        self.special_topics.iter().any(|t| t == topic)
    }
}
