//! String literal lexing.
//!
//! Strings are double-quoted. `\` introduces a one-byte escape; raw
//! control bytes in the body are reported and dropped. The payload is the
//! decoded text: when nothing needed rewriting it borrows straight from
//! the source, otherwise the decoded bytes are accumulated in an owned
//! buffer.

use std::borrow::Cow;

use fmlc_util::Span;

use crate::token::{Token, TokenKind};
use crate::utf8;
use crate::Lexer;

/// Resolves a one-byte escape. Unknown escapes copy the byte verbatim,
/// which is how `\\` and `\"` work.
#[inline]
fn resolve_escape(byte: u8) -> u8 {
    match byte {
        b'a' => 0x07,
        b'b' => 0x08,
        b'f' => 0x0C,
        b'n' => 0x0A,
        b'r' => 0x0D,
        b't' => 0x09,
        b'v' => 0x0B,
        b'0' => 0x00,
        other => other,
    }
}

/// Returns true for the raw control bytes that must appear escaped.
#[inline]
fn is_bare_control(byte: u8) -> bool {
    matches!(byte, 0x00 | 0x07..=0x0D)
}

impl<'src> Lexer<'src, '_> {
    /// Lexes a string literal. The caller has seen the opening quote.
    ///
    /// # Returns
    ///
    /// `Token` with [`TokenKind::String`] holding the decoded payload, or
    /// `None` after a halt. Reaching the end of input before the closing
    /// quote is a hard error.
    pub(crate) fn lex_string(&mut self) -> Option<Token<'src>> {
        let start = self.token_start;
        self.scanner.advance();
        let content_start = self.scanner.position();

        // Filled lazily: as long as the scanned prefix needs no rewriting
        // the payload can borrow from the source.
        let mut decoded: Option<String> = None;

        loop {
            if self.scanner.is_at_end() {
                self.report_hard(Span::point(self.scanner.len()), "unterminated string");
                return None;
            }

            let at = self.scanner.position();
            let b = self.scanner.peek();

            match b {
                b'"' => {
                    self.scanner.advance();
                    let payload = match decoded {
                        Some(owned) => Cow::Owned(owned),
                        None => Cow::Borrowed(self.source_str(content_start, at)?),
                    };
                    let span = Span::new(start, self.scanner.position());
                    return Some(Token::new(TokenKind::String(payload), span));
                },
                b'\\' => {
                    self.make_owned(&mut decoded, content_start, at)?;
                    self.scanner.advance();
                    if self.scanner.is_at_end() {
                        self.report_hard(Span::point(self.scanner.len()), "unterminated string");
                        return None;
                    }
                    let escaped = self.scanner.peek();
                    if escaped >= 0x80 {
                        let at = self.scanner.position();
                        self.report_hard(
                            Span::new(at, at + 1),
                            "unexpected UTF-8 sequence byte after backslash in string",
                        );
                        return None;
                    }
                    if let Some(buf) = decoded.as_mut() {
                        buf.push(resolve_escape(escaped) as char);
                    }
                    self.scanner.advance();
                },
                b if is_bare_control(b) => {
                    if self.report_byte(at, "unescaped control character in string") {
                        return None;
                    }
                    // The offending byte is dropped from the payload.
                    self.make_owned(&mut decoded, content_start, at)?;
                    self.scanner.advance();
                },
                b if utf8::is_continuation(b) => {
                    if self.report_byte(at, "unexpected UTF-8 continuation byte in string") {
                        return None;
                    }
                    self.make_owned(&mut decoded, content_start, at)?;
                    self.scanner.advance();
                },
                b if utf8::is_overlong_lead(b) => {
                    self.report_hard(
                        Span::new(at, at + 1),
                        "UTF-8 lead byte requiring more than 3 continuation bytes is invalid",
                    );
                    return None;
                },
                b => {
                    if let Some(count) = utf8::continuation_count(b) {
                        self.scanner.advance();
                        self.eat_continuations(count)?;
                        if decoded.is_some() {
                            let seq = self.source_str(at, self.scanner.position())?;
                            if let Some(buf) = decoded.as_mut() {
                                buf.push_str(seq);
                            }
                        }
                    } else {
                        if let Some(buf) = decoded.as_mut() {
                            buf.push(b as char);
                        }
                        self.scanner.advance();
                    }
                },
            }
        }
    }

    /// Switches to the owned payload buffer, seeding it with the clean
    /// prefix scanned so far. No-op when already owned.
    fn make_owned(
        &mut self,
        decoded: &mut Option<String>,
        content_start: usize,
        upto: usize,
    ) -> Option<()> {
        if decoded.is_none() {
            let prefix = self.source_str(content_start, upto)?;
            *decoded = Some(prefix.to_owned());
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use fmlc_util::Handler;

    fn lex_str(source: &[u8]) -> Cow<'_, str> {
        let mut handler = Handler::new();
        let tokens = tokenize(source, &mut handler);
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        match tokens.into_iter().next().unwrap().kind {
            TokenKind::String(payload) => payload,
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_string_borrows() {
        let payload = lex_str(b"\"hello\"");
        assert_eq!(payload, "hello");
        assert!(matches!(payload, Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(lex_str(b"\"\""), "");
    }

    #[test]
    fn test_escapes_allocate() {
        let payload = lex_str(br#""line1\nline2\t\"quoted\"""#);
        assert_eq!(payload, "line1\nline2\t\"quoted\"");
        assert!(matches!(payload, Cow::Owned(_)));
    }

    #[test]
    fn test_all_control_escapes() {
        let payload = lex_str(br#""\a\b\f\n\r\t\v\0""#);
        assert_eq!(
            payload.as_bytes(),
            &[0x07, 0x08, 0x0C, 0x0A, 0x0D, 0x09, 0x0B, 0x00]
        );
    }

    #[test]
    fn test_unknown_escape_copies_verbatim() {
        assert_eq!(lex_str(br#""\q\\""#), "q\\");
    }

    #[test]
    fn test_multibyte_content() {
        let payload = lex_str("\"héllo wörld\"".as_bytes());
        assert_eq!(payload, "héllo wörld");
        assert!(matches!(payload, Cow::Borrowed(_)));
    }

    #[test]
    fn test_multibyte_after_escape_is_kept() {
        let payload = lex_str("\"a\\té\"".as_bytes());
        assert_eq!(payload, "a\té");
    }

    #[test]
    fn test_unterminated_is_hard_error() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"\"abc", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics()[0].message, "unterminated string");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_backslash_at_eof_is_hard_error() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"\"abc\\", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_raw_newline_is_recoverable_and_dropped() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"\"a\nb\"", &mut handler);
        assert_eq!(handler.error_count(), 1);
        match &tokens[0].kind {
            TokenKind::String(payload) => assert_eq!(payload, "ab"),
            other => panic!("expected string, got {:?}", other),
        }
    }

    #[test]
    fn test_escape_before_continuation_byte_is_hard() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"\"a\\\xC3\xA9\"", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_truncated_sequence_in_string_is_hard() {
        let mut handler = Handler::new();
        let tokens = tokenize(b"\"a\xC3x\"", &mut handler);
        assert_eq!(handler.error_count(), 1);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_string_span_includes_quotes() {
        let mut handler = Handler::new();
        let tokens = tokenize(b" \"ab\" ", &mut handler);
        assert_eq!(tokens[0].span, Span::new(1, 5));
    }
}
