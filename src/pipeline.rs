//! End-to-end collection of the help corpus and its citations.

use std::path::Path;

use crate::config::Config;
use crate::domain::{Citations, CliOption, Corpus, ParseStats, ScannedTree};
use crate::error::{HelpgenError, Result};
use crate::parse::{parse_help_files, scan_sources, scan_tool_usage};
use crate::scan::{extract_options, TreeScanner};

/// Everything gathered from one scan of a source tree.
#[derive(Debug, Default)]
pub struct Harvest {
    pub options: Vec<CliOption>,
    pub tree: ScannedTree,
    pub corpus: Corpus,
    pub citations: Citations,
    pub stats: ParseStats,
}

/// Scan `root` and parse every help file, source file and usage table.
///
/// The scanned tree is `root/<source_subdir>`. A missing tree or a missing
/// option header is fatal; structural problems are only counted.
pub fn harvest(root: &Path, config: &Config) -> Result<Harvest> {
    let tree_root = root.join(&config.source_subdir);
    if !tree_root.is_dir() {
        return Err(HelpgenError::RootNotFound(tree_root));
    }

    let options = extract_options(&tree_root.join(&config.options_header))?;
    // Not cross-checked against usage tables; kept for reporting.
    for option in &options {
        tracing::debug!("Option: {} = \"{}\"", option.name, option.value);
    }

    let tree = TreeScanner::from_config(tree_root, config).scan()?;

    let mut corpus = Corpus::new();
    let mut citations = Citations::new();
    let mut stats = ParseStats::default();

    parse_help_files(&tree.help_files, &mut corpus, &mut citations, &mut stats)?;
    parse_help_files(&tree.tool_help_files, &mut corpus, &mut citations, &mut stats)?;
    scan_sources(&tree.source_files, &mut citations, &mut stats)?;
    scan_sources(&tree.tool_source_files, &mut citations, &mut stats)?;
    scan_tool_usage(&tree.tool_help_files, &corpus, &mut citations)?;

    tracing::info!(
        options = options.len(),
        help_files = corpus.len(),
        sections = corpus.section_count(),
        citations = citations.len(),
        "harvest complete"
    );

    Ok(Harvest { options, tree, corpus, citations, stats })
}
