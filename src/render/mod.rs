//! Output rendering

pub mod c_table;

pub use c_table::{escape_c_line, render_c_tables};
