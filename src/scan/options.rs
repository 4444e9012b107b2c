//! Command-line option extraction from `#define NAME "value"` headers.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::domain::CliOption;
use crate::error::{HelpgenError, Result};
use crate::utils::read_text;

static DEFINE_WITH_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^#define\s+(\S+)\s+[^"]*"([^"]*)""#).unwrap());

/// Collect every `(name, literal)` pair defined in the header at `path`.
pub fn extract_options(path: &Path) -> Result<Vec<CliOption>> {
    if !path.exists() {
        return Err(HelpgenError::OptionsFileNotFound(path.to_path_buf()));
    }
    let content = read_text(path)?;
    let options = parse_options(&content);
    tracing::debug!(file = %path.display(), count = options.len(), "extracted options");
    Ok(options)
}

/// Lines without a quoted literal (include guards, numeric macros) are skipped.
pub fn parse_options(content: &str) -> Vec<CliOption> {
    content
        .lines()
        .filter_map(|line| {
            let caps = DEFINE_WITH_LITERAL.captures(line.trim())?;
            Some(CliOption { name: caps[1].to_string(), value: caps[2].to_string() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_options_skips_non_literals() {
        let header = r#"
#ifndef PRTE_CMD_LINE_H
#define PRTE_CMD_LINE_H

// Basic options
#define PRTE_CLI_HELP                   "help"                      // optional
#define PRTE_CLI_VERSION	"version"
#define PRTE_CLI_MAX 16
    #define PRTE_CLI_NO_READY_MSG       "no-ready-msg"
"#;
        let options = parse_options(header);
        let pairs: Vec<(&str, &str)> =
            options.iter().map(|o| (o.name.as_str(), o.value.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("PRTE_CLI_HELP", "help"),
                ("PRTE_CLI_VERSION", "version"),
                ("PRTE_CLI_NO_READY_MSG", "no-ready-msg"),
            ]
        );
    }

    #[test]
    fn test_extract_options_missing_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("util/prte_cmd_line.h");
        let err = extract_options(&path).unwrap_err();
        assert!(matches!(err, HelpgenError::OptionsFileNotFound(p) if p == path));
    }

    #[test]
    fn test_extract_options_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cmd.h");
        std::fs::write(&path, "#define PRTE_CLI_TUNE \"tune\"\n").unwrap();
        let options = extract_options(&path).unwrap();
        assert_eq!(options, vec![CliOption { name: "PRTE_CLI_TUNE".into(), value: "tune".into() }]);
    }
}
