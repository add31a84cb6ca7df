//! Core lexer implementation.
//!
//! This module contains the main `Lexer` struct, the dispatch loop, and
//! the error-report helpers shared by the sub-lexers.

use fmlc_util::{ErrorSink, Span};

use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};
use crate::utf8;

/// Lexer for FML source text.
///
/// Scans a byte buffer into a token stream, reporting problems through
/// the injected [`ErrorSink`]. Sub-lexer methods live in sibling modules;
/// they return `None` once the lexer has halted.
pub struct Lexer<'src, 'sink> {
    /// Byte cursor over the input.
    pub(crate) scanner: Scanner<'src>,

    /// Receiver for diagnostics.
    pub(crate) sink: &'sink mut dyn ErrorSink,

    /// Starting position of the token being scanned.
    pub(crate) token_start: usize,

    /// Set once a hard error occurred or the sink requested a halt.
    pub(crate) halted: bool,

    /// Set after the Eof token has been produced.
    finished: bool,
}

impl<'src, 'sink> Lexer<'src, 'sink> {
    /// Creates a new lexer over the given input.
    ///
    /// # Arguments
    ///
    /// * `source` - The bytes to scan; not required to be valid UTF-8
    /// * `sink` - Receiver for diagnostics
    pub fn new(source: &'src [u8], sink: &'sink mut dyn ErrorSink) -> Self {
        Self {
            scanner: Scanner::new(source),
            sink,
            token_start: 0,
            halted: false,
            finished: false,
        }
    }

    /// Returns the next token.
    ///
    /// Skips whitespace and comments, then dispatches on the first byte.
    ///
    /// # Returns
    ///
    /// The next token, ending with [`TokenKind::Eof`] at the input end.
    /// `None` once the lexer has halted; the caller receives no Eof in
    /// that case.
    pub fn next_token(&mut self) -> Option<Token<'src>> {
        loop {
            if self.halted {
                return None;
            }

            self.token_start = self.scanner.position();

            if self.scanner.is_at_end() {
                let end = Span::point(self.scanner.len());
                return Some(Token::new(TokenKind::Eof, end));
            }

            match self.scanner.peek() {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.scanner.advance();
                },
                b'/' => {
                    self.skip_comment()?;
                },
                b'=' => return self.single_byte(TokenKind::Equal),
                b'.' => return self.single_byte(TokenKind::Dot),
                b'#' => return self.single_byte(TokenKind::Hash),
                b'{' => return self.single_byte(TokenKind::BracketOpen),
                b'}' => return self.single_byte(TokenKind::BracketClose),
                b';' => return self.single_byte(TokenKind::Semicolon),
                b'$' => return self.single_byte(TokenKind::Dollar),
                b'"' => return self.lex_string(),
                b'[' => return self.lex_document(),
                b'0'..=b'9' | b'-' => return self.lex_number(),
                b if utf8::is_ident_start(b) => return self.lex_identifier(),
                b if utf8::is_continuation(b) => {
                    if self.report_byte(self.token_start, "unexpected UTF-8 continuation byte") {
                        return None;
                    }
                    self.scanner.advance();
                },
                _ => {
                    if self.report_byte(self.token_start, "unexpected character") {
                        return None;
                    }
                    self.scanner.advance();
                },
            }
        }
    }

    /// Consumes one byte and yields the given punctuation kind.
    fn single_byte(&mut self, kind: TokenKind<'src>) -> Option<Token<'src>> {
        self.scanner.advance();
        Some(Token::new(
            kind,
            Span::new(self.token_start, self.scanner.position()),
        ))
    }

    /// Reports a recoverable diagnostic.
    ///
    /// # Returns
    ///
    /// `true` if the sink requested a halt; the lexer is then marked
    /// halted and the caller must stop.
    pub(crate) fn report(&mut self, span: Span, message: &str) -> bool {
        if self.sink.report(span, message) {
            self.halted = true;
        }
        self.halted
    }

    /// Reports a recoverable diagnostic covering a single byte.
    pub(crate) fn report_byte(&mut self, offset: usize, message: &str) -> bool {
        self.report(Span::new(offset, offset + 1), message)
    }

    /// Reports a diagnostic with no recovery; the lexer halts regardless
    /// of the sink's verdict.
    pub(crate) fn report_hard(&mut self, span: Span, message: &str) {
        self.sink.report(span, message);
        self.halted = true;
    }

    /// Validates `count` continuation bytes of an in-progress UTF-8
    /// sequence, consuming them.
    ///
    /// Both a wrong byte and the end of input are hard errors.
    pub(crate) fn eat_continuations(&mut self, count: usize) -> Option<()> {
        for _ in 0..count {
            if self.scanner.is_at_end() {
                let end = Span::point(self.scanner.len());
                self.report_hard(end, "unfinished UTF-8 multi-byte sequence");
                return None;
            }
            if !utf8::is_continuation(self.scanner.peek()) {
                let at = self.scanner.position();
                self.report_hard(
                    Span::new(at, at + 1),
                    "expected UTF-8 continuation byte; sequence is invalid",
                );
                return None;
            }
            self.scanner.advance();
        }
        Some(())
    }

    /// Converts `[start, end)` of the source to `&str`.
    ///
    /// The byte-range validation performed while scanning admits a few
    /// forms `std::str` rejects (overlong encodings, surrogates); those
    /// surface here as hard encoding errors.
    pub(crate) fn source_str(&mut self, start: usize, end: usize) -> Option<&'src str> {
        match std::str::from_utf8(self.scanner.slice(start, end)) {
            Ok(text) => Some(text),
            Err(e) => {
                let at = start + e.valid_up_to();
                self.report_hard(Span::new(at, at + 1), "invalid UTF-8 sequence");
                None
            },
        }
    }
}

impl<'src> Iterator for Lexer<'src, '_> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token()?;
        if token.kind.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}

/// Scans the whole input into a token vector.
///
/// The result ends with [`TokenKind::Eof`] unless a halt stopped the scan,
/// in which case the tokens produced so far are returned as-is.
///
/// # Arguments
///
/// * `source` - The bytes to scan
/// * `sink` - Receiver for diagnostics
pub fn tokenize<'src>(source: &'src [u8], sink: &mut dyn ErrorSink) -> Vec<Token<'src>> {
    Lexer::new(source, sink).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmlc_util::Handler;

    fn kinds(source: &[u8]) -> Vec<TokenKind<'_>> {
        let mut handler = Handler::new();
        tokenize(source, &mut handler)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds(b"= . # { } ; $"),
            vec![
                TokenKind::Equal,
                TokenKind::Dot,
                TokenKind::Hash,
                TokenKind::BracketOpen,
                TokenKind::BracketClose,
                TokenKind::Semicolon,
                TokenKind::Dollar,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(kinds(b" \t\r\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_eof_span_is_input_length() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"a;", &mut handler);
        let eof = tokens.last().unwrap();
        assert_eq!(eof.span, Span::new(2, 2));
    }

    #[test]
    fn test_unexpected_character_is_recoverable() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"@;", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics()[0].span, Span::new(0, 1));
        assert_eq!(
            tokens.iter().map(|t| &t.kind).collect::<Vec<_>>(),
            vec![&TokenKind::Semicolon, &TokenKind::Eof]
        );
    }

    #[test]
    fn test_stray_continuation_byte() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"\x80;", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert_eq!(tokens.len(), 2); // ';' and Eof
    }

    #[test]
    fn test_halt_suppresses_eof() {
        let mut handler = Handler::fail_fast();
        let tokens = tokenize(b"a @ b", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert!(tokens.iter().all(|t| !t.kind.is_eof()));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_nul_byte_is_unexpected_character() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"a\0b", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert_eq!(tokens.len(), 3); // a, b, Eof
    }

    #[test]
    fn test_token_spans_cover_input() {
        let source = b"alpha  beta;";
        let mut handler = Handler::new();
        for token in tokenize(source, &mut handler) {
            assert!(token.span.start <= token.span.end);
            assert!(token.span.end <= source.len());
        }
    }
}
