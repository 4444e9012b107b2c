//! Command-line interface for helpgen

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::load_config;
use crate::error::HelpgenError;
use crate::pipeline::harvest;
use crate::purge::purge;
use crate::render::render_c_tables;

/// Generate C code from help text INI files
#[derive(Parser, Debug)]
#[command(name = "helpgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to search for help-*.txt files
    #[arg(long, value_name = "DIR")]
    pub root: PathBuf,

    /// Output C file
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Drop uncited help topics and fail on duplicate or unused topics
    #[arg(long)]
    pub purge: bool,

    /// Do not write the generated file
    #[arg(long)]
    pub dryrun: bool,

    /// Path to config file (helpgen.toml or helpgen.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Diagnostics go to stderr; progress notes go to stdout.
fn init_logging(verbose: bool) {
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let writer = std::io::stderr.with_max_level(Level::WARN).or_else(std::io::stdout);
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    generate(&cli)
}

/// Run the whole pipeline for parsed arguments.
pub fn generate(cli: &Cli) -> Result<()> {
    let config = load_config(&cli.root, cli.config.as_deref())?;
    let harvest = harvest(&cli.root, &config)?;

    if harvest.stats.has_problems() {
        tracing::warn!(
            duplicate_paths = harvest.stats.duplicate_paths,
            orphan_includes = harvest.stats.orphan_includes,
            malformed_includes = harvest.stats.malformed_includes,
            unterminated_literals = harvest.stats.unterminated_literals,
            "structural problems found while parsing"
        );
    }

    let corpus = if cli.purge {
        purge(&harvest.corpus, &harvest.citations, &config.special_topics)
            .map_err(HelpgenError::Purge)?
    } else {
        harvest.corpus
    };

    if cli.dryrun {
        tracing::info!("Dry run: {} not written", cli.out.display());
        return Ok(());
    }

    let code = render_c_tables(&corpus, &config.codegen, env!("CARGO_PKG_NAME"));
    if let Some(parent) = cli.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&cli.out, code)
        .with_context(|| format!("Failed to write {}", cli.out.display()))?;

    tracing::info!("Generated C code written to {}", cli.out.display());
    Ok(())
}
