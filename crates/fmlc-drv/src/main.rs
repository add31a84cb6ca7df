//! fmlc - FML front-end CLI.
//!
//! Reads an FML file, reports diagnostics with source context, and emits
//! either the canonical beautified form, the token stream, or the parsed
//! tree.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fmlc_drv::{run, Emit};

/// FML front-end: lex, parse, and beautify FML documents.
#[derive(Parser, Debug)]
#[command(name = "fmlc")]
#[command(version)]
#[command(about = "FML front-end: lex, parse, and beautify FML documents", long_about = None)]
struct Cli {
    /// Input file
    input: PathBuf,

    /// Write output to this path instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, value_enum, default_value = "fml")]
    emit: Emit,

    /// Stop at the first diagnostic
    #[arg(long)]
    fail_fast: bool,

    /// Enable debug logging
    #[arg(short, long, env = "FMLC_VERBOSE")]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run(&cli.input, cli.output.as_deref(), cli.emit, cli.fail_fast)
        .with_context(|| format!("processing {}", cli.input.display()))?;
    Ok(())
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
