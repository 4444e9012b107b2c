//! helpgen: compile help-text INI files into static C lookup tables

use anyhow::Result;

fn main() -> Result<()> {
    helpgen::cli::run()
}
