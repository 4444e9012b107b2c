//! Shared helpers.

pub mod encoding;
pub mod paths;

pub use encoding::read_text;
pub use paths::{basename, normalize_path};
