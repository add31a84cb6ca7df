//! fmlc-util - Foundation types shared by every pipeline stage.
//!
//! This crate provides the two things every other crate needs:
//!
//! - [`Span`] - a half-open byte range into the source buffer. Tokens,
//!   tree entities, and diagnostics all carry one.
//! - The [`ErrorSink`] capability and its stock implementations. The
//!   lexer and parser never print or abort on their own; they hand every
//!   diagnostic to an injected sink and honor its halt verdict.

pub mod diagnostic;
pub mod span;

pub use diagnostic::{ConsoleReporter, Diagnostic, ErrorSink, Handler};
pub use span::Span;
