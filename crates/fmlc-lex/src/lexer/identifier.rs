//! Identifier lexing.
//!
//! Identifiers start with a letter, underscore, or UTF-8 lead byte and
//! continue with those plus digits and hyphens. Multi-byte sequences are
//! validated structurally as they are consumed; a malformed sequence is a
//! hard error because there is no sensible byte to resume at.

use fmlc_util::Span;

use crate::token::{Token, TokenKind};
use crate::utf8;
use crate::Lexer;

impl<'src> Lexer<'src, '_> {
    /// Lexes an identifier.
    ///
    /// The caller has checked that the current byte starts one. The
    /// identifier ends at the first byte outside the continuation set;
    /// that byte is left for the dispatch loop.
    ///
    /// # Returns
    ///
    /// `Token` with [`TokenKind::Identifier`], or `None` after a hard
    /// encoding error.
    pub(crate) fn lex_identifier(&mut self) -> Option<Token<'src>> {
        let start = self.token_start;

        while !self.scanner.is_at_end() {
            let b = self.scanner.peek();

            if utf8::is_ascii_ident_continue(b) {
                self.scanner.advance();
            } else if utf8::is_overlong_lead(b) {
                let at = self.scanner.position();
                self.report_hard(
                    Span::new(at, at + 1),
                    "UTF-8 lead byte requiring more than 3 continuation bytes is invalid",
                );
                return None;
            } else if let Some(count) = utf8::continuation_count(b) {
                self.scanner.advance();
                self.eat_continuations(count)?;
            } else {
                break;
            }
        }

        let end = self.scanner.position();
        let text = self.source_str(start, end)?;

        Some(Token::new(
            TokenKind::Identifier(text),
            Span::new(start, end),
        ))
    }
}
