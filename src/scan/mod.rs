//! Tree scanning and option header extraction

pub mod options;
pub mod scanner;

pub use options::extract_options;
pub use scanner::TreeScanner;
