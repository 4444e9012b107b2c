//! helpgen: compile help-text INI files into static C lookup tables
//!
//! Help files (`help-*.txt`) are cross-referenced against the show-help call
//! sites in C sources and the usage tables of tool help files. Uncited topics
//! can be purged before the corpus is rendered as C data.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod purge;
pub mod render;
pub mod scan;
pub mod utils;

pub use error::{HelpgenError, Result};
