//! Citation-tracking parsers
//!
//! Each parser merges into caller-owned accumulators: the help corpus, the
//! citation list, and structural-problem counters.

pub mod help;
pub mod source;
pub mod usage;

pub use help::parse_help_files;
pub use source::scan_sources;
pub use usage::scan_tool_usage;
