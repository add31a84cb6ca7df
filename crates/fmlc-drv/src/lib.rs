//! fmlc-drv - Pipeline driver.
//!
//! Orchestrates the three stages over a file: read bytes, lex, parse,
//! and emit. Diagnostics are rendered to stderr through
//! [`ConsoleReporter`]; when any were reported the run fails with a
//! [`PipelineError`] summary so the process can exit non-zero.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use fmlc_fmt::beautify;
use fmlc_lex::tokenize;
use fmlc_par::parse;
use fmlc_util::ConsoleReporter;

/// Errors surfaced by a driver run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading the input file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The input had lexical or syntactic errors (already rendered to
    /// stderr by the reporter).
    #[error("{count} error(s) in {path}")]
    Invalid { path: String, count: usize },

    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// What the driver should print.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Emit {
    /// Canonical beautified FML.
    Fml,
    /// The token stream, one token per line.
    Tokens,
    /// The parsed tree in debug form.
    Tree,
}

/// Runs the pipeline over one input file.
///
/// # Arguments
///
/// * `input` - Path of the FML file to process
/// * `output` - Destination path; stdout when absent
/// * `emit` - Which stage's result to print
/// * `fail_fast` - Stop at the first diagnostic
pub fn run(input: &Path, output: Option<&Path>, emit: Emit, fail_fast: bool) -> Result<()> {
    let path = input.display().to_string();
    let source = fs::read(input).map_err(|e| PipelineError::Read {
        path: path.clone(),
        source: e,
    })?;
    debug!(bytes = source.len(), path = %path, "read input");

    let stderr = io::stderr();
    let mut reporter = ConsoleReporter::new(&source, stderr.lock());
    if fail_fast {
        reporter = reporter.with_fail_fast();
    }

    let tokens = tokenize(&source, &mut reporter);
    debug!(tokens = tokens.len(), "lexing finished");

    match emit {
        Emit::Tokens => {
            let mut rendered = Vec::new();
            for token in &tokens {
                writeln!(
                    rendered,
                    "{:4}..{:<4} {:?}",
                    token.span.start, token.span.end, token.kind
                )?;
            }
            let errors = reporter.error_count();
            drop(reporter);
            write_output(output, &rendered)?;
            finish(path, errors)
        },
        Emit::Tree => {
            let nodes = parse(tokens, &mut reporter);
            debug!(nodes = nodes.len(), "parsing finished");
            let errors = reporter.error_count();
            drop(reporter);
            let rendered = format!("{:#?}\n", nodes);
            write_output(output, rendered.as_bytes())?;
            finish(path, errors)
        },
        Emit::Fml => {
            let nodes = parse(tokens, &mut reporter);
            debug!(nodes = nodes.len(), "parsing finished");
            let errors = reporter.error_count();
            drop(reporter);
            // A partial tree is not worth beautifying; report and stop.
            finish(path, errors)?;
            let mut rendered = Vec::new();
            beautify(&nodes, &mut rendered)?;
            write_output(output, &rendered)?;
            Ok(())
        },
    }
}

fn finish(path: String, errors: usize) -> Result<()> {
    if errors > 0 {
        Err(PipelineError::Invalid {
            path,
            count: errors,
        })
    } else {
        Ok(())
    }
}

fn write_output(output: Option<&Path>, bytes: &[u8]) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, bytes),
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(bytes)?;
            lock.flush()
        },
    }
}
