//! Long-bracket document lexing.
//!
//! A document opens with `[`, zero or more `=`, and another `[`. The
//! number of `=` signs determines the closing sequence: `]`, the same
//! number of `=`, and `]`. One newline right after the opener and one
//! right before the closer are discarded; everything else is verbatim.

use fmlc_util::Span;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'src> Lexer<'src, '_> {
    /// Lexes a document. The caller has seen the opening `[`.
    ///
    /// # Returns
    ///
    /// `Token` with [`TokenKind::Document`] holding the inner payload
    /// (brackets stripped), or `None` after a halt. Reaching the end of
    /// input inside the opening sequence or the body is a hard error.
    pub(crate) fn lex_document(&mut self) -> Option<Token<'src>> {
        let start = self.token_start;
        self.scanner.advance();

        let mut equals = 0usize;
        loop {
            if self.scanner.is_at_end() {
                self.report_hard(
                    Span::point(self.scanner.len()),
                    "unterminated document opening sequence",
                );
                return None;
            }
            match self.scanner.peek() {
                b'=' => {
                    equals += 1;
                    self.scanner.advance();
                },
                b'[' => {
                    self.scanner.advance();
                    break;
                },
                _ => {
                    let at = self.scanner.position();
                    if self.report_byte(at, "unexpected character in document opening sequence") {
                        return None;
                    }
                    self.scanner.advance();
                },
            }
        }

        // A newline right after the opening sequence is discarded.
        if self.scanner.peek() == b'\n' {
            self.scanner.advance();
        } else if self.scanner.peek() == b'\r' && self.scanner.peek_at(1) == b'\n' {
            self.scanner.advance_by(2);
        }

        let body_start = self.scanner.position();

        // Scan for `]` + equals x `=` + `]`, tracking the most recent `]`
        // candidate and the run of `=` after it.
        let mut candidate: Option<usize> = None;
        let mut body_end;
        loop {
            if self.scanner.is_at_end() {
                self.report_hard(Span::point(self.scanner.len()), "unterminated document body");
                return None;
            }
            let at = self.scanner.position();
            let b = self.scanner.peek();
            self.scanner.advance();
            match b {
                b']' => match candidate {
                    Some(open) if at - open - 1 == equals => {
                        body_end = open;
                        break;
                    },
                    _ => candidate = Some(at),
                },
                b'=' => {},
                _ => candidate = None,
            }
        }

        // A newline right before the closing sequence is discarded.
        if body_end > body_start && self.scanner.slice(body_end - 1, body_end) == b"\n" {
            if body_end - 1 > body_start && self.scanner.slice(body_end - 2, body_end - 1) == b"\r"
            {
                body_end -= 2;
            } else {
                body_end -= 1;
            }
        }

        let body = self.source_str(body_start, body_end)?;
        let span = Span::new(start, self.scanner.position());
        Some(Token::new(TokenKind::Document(body), span))
    }
}
