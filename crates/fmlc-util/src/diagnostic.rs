//! Diagnostic reporting infrastructure.
//!
//! The pipeline stages never print and never abort; every problem they
//! find is routed through an injected [`ErrorSink`], whose boolean return
//! is the sole control signal: `true` asks the current stage to halt,
//! `false` requests best-effort continuation.
//!
//! Two stock sinks are provided:
//!
//! - [`Handler`] collects diagnostics for later inspection (the usual
//!   choice in tests and library embeddings).
//! - [`ConsoleReporter`] renders human-readable output with line/column
//!   information and a caret pointing at the offending span.

use std::fmt;
use std::io::{self, Write};

use crate::Span;

/// A single diagnostic: a message anchored to a source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source location of the problem.
    pub span: Span,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at {}..{}: {}",
            self.span.start, self.span.end, self.message
        )
    }
}

/// Receiver for diagnostics emitted by the lexer and parser.
///
/// The return value decides how the reporting stage proceeds: `true`
/// requests a halt, `false` requests recovery. End-of-input conditions
/// inside an open construct are terminal regardless of the verdict.
pub trait ErrorSink {
    /// Reports one diagnostic.
    ///
    /// # Returns
    ///
    /// `true` if the current stage should stop, `false` to continue.
    fn report(&mut self, span: Span, message: &str) -> bool;
}

/// A sink that collects diagnostics in memory.
///
/// # Example
///
/// ```
/// use fmlc_util::{ErrorSink, Handler, Span};
///
/// let mut handler = Handler::new();
/// handler.report(Span::new(0, 1), "unexpected character");
/// assert!(handler.has_errors());
/// assert_eq!(handler.diagnostics().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
    fail_fast: bool,
}

impl Handler {
    /// Creates a handler that always requests continuation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handler that requests a halt on the first diagnostic.
    pub fn fail_fast() -> Self {
        Self {
            diagnostics: Vec::new(),
            fail_fast: true,
        }
    }

    /// Returns true if any diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns the number of diagnostics reported so far.
    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns the collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the handler and returns the collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl ErrorSink for Handler {
    fn report(&mut self, span: Span, message: &str) -> bool {
        self.diagnostics.push(Diagnostic::new(span, message));
        self.fail_fast
    }
}

/// A sink that renders diagnostics to a writer as they arrive.
///
/// Output format, for a diagnostic on line 2:
///
/// ```text
/// 2:5: unexpected token in node
///     foo bar
///     ^~~^
/// ```
///
/// The caret line reuses the source line's leading whitespace so that tab
/// indentation stays aligned. Spans reaching past the end of the line are
/// clipped to it.
pub struct ConsoleReporter<'src, W> {
    source: &'src [u8],
    out: W,
    fail_fast: bool,
    errors: usize,
}

impl<'src, W: Write> ConsoleReporter<'src, W> {
    /// Creates a reporter rendering against the given source buffer.
    ///
    /// # Arguments
    ///
    /// * `source` - The buffer the spans refer to
    /// * `out` - Destination for rendered diagnostics
    pub fn new(source: &'src [u8], out: W) -> Self {
        Self {
            source,
            out,
            fail_fast: false,
            errors: 0,
        }
    }

    /// Makes the reporter request a halt on the first diagnostic.
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Returns the number of diagnostics rendered so far.
    pub fn error_count(&self) -> usize {
        self.errors
    }

    fn render(&mut self, span: Span, message: &str) -> io::Result<()> {
        let offset = span.start.min(self.source.len());

        let mut line = 1usize;
        let mut line_start = 0usize;
        for (i, &b) in self.source[..offset].iter().enumerate() {
            if b == b'\n' {
                line += 1;
                line_start = i + 1;
            }
        }
        let column = offset - line_start + 1;

        let line_end = self.source[offset..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|i| offset + i)
            .unwrap_or(self.source.len());

        writeln!(self.out, "{}:{}: {}", line, column, message)?;

        let text = &self.source[line_start..line_end];
        self.out.write_all(text)?;
        self.out.write_all(b"\n")?;

        // Leading whitespace is reproduced verbatim so tabs line up.
        let mut marker = Vec::with_capacity(column);
        for &b in &self.source[line_start..offset] {
            marker.push(if b == b'\t' { b'\t' } else { b' ' });
        }
        let width = span.len().max(1).min(line_end.saturating_sub(offset).max(1));
        marker.push(b'^');
        if width > 1 {
            marker.extend(std::iter::repeat(b'~').take(width.saturating_sub(2)));
            marker.push(b'^');
        }
        self.out.write_all(&marker)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> ErrorSink for ConsoleReporter<'_, W> {
    fn report(&mut self, span: Span, message: &str) -> bool {
        self.errors += 1;
        // A broken stderr must not take the pipeline down with it.
        let _ = self.render(span, message);
        self.fail_fast
    }
}
