//! Number literal lexing.
//!
//! Numbers come in four bases. Binary, octal, and hexadecimal literals
//! are assembled by shift-or with per-base digit limits; decimal literals
//! are cleansed of separators and handed to the host's standard parsing
//! routines. A decimal integer that overflows the signed 64-bit range is
//! silently promoted to a float; a float with a syntactic defect is a
//! hard error.
//!
//! A number ends without error at whitespace, end of input, `;`, `{`, or
//! `}`. Any other byte inside a literal is a recoverable "unexpected
//! character" and is skipped.

use fmlc_util::Span;

use crate::token::{Token, TokenKind};
use crate::utf8::digit_value;
use crate::Lexer;

/// Bytes that cleanly terminate a number literal.
#[inline]
fn is_terminator(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b';' | b'{' | b'}')
}

impl<'src> Lexer<'src, '_> {
    /// Lexes a number literal.
    ///
    /// Dispatches on the two characters after an optional sign: `0b`,
    /// `0o`, and `0x` select a radix sub-mode, `0d` selects decimal with
    /// the prefix discarded, anything else is plain decimal (which covers
    /// `00`, `0_`, `0.`, `0e`, ...).
    ///
    /// # Returns
    ///
    /// `Token` with [`TokenKind::Integer`] or [`TokenKind::Float`], or
    /// `None` after a halt.
    pub(crate) fn lex_number(&mut self) -> Option<Token<'src>> {
        let negative = match self.scanner.peek() {
            b'-' => {
                self.scanner.advance();
                true
            },
            b'+' => {
                self.scanner.advance();
                false
            },
            _ => false,
        };

        // The prefix byte only counts when something follows it, so that
        // a trailing "0b" falls through to the decimal scanner.
        let remaining = self.scanner.len() - self.scanner.position();
        if self.scanner.peek() == b'0' && remaining > 2 {
            match self.scanner.peek_at(1) {
                b'b' => {
                    self.scanner.advance_by(2);
                    return self.lex_radix(2, negative);
                },
                b'o' => {
                    self.scanner.advance_by(2);
                    return self.lex_radix(8, negative);
                },
                b'x' => {
                    self.scanner.advance_by(2);
                    return self.lex_radix(16, negative);
                },
                b'd' => {
                    self.scanner.advance_by(2);
                },
                _ => {},
            }
        }

        self.lex_decimal(negative)
    }

    /// Lexes the digits of a binary, octal, or hexadecimal literal.
    ///
    /// Digit limits bound the value to 64 bits: 64 binary digits, 16 hex
    /// digits, and 22 octal digits where a 22nd digit additionally
    /// requires the accumulated top octet to be 0 or 1. Digits beyond a
    /// limit are reported and skipped. `_` and `'` are spacing and are
    /// ignored. An empty digit run yields 0.
    fn lex_radix(&mut self, base: u32, negative: bool) -> Option<Token<'src>> {
        let (max_digits, shift, range_message) = match base {
            2 => (64, 1, "binary integer out of range"),
            8 => (22, 3, "octal integer out of range"),
            _ => (16, 4, "hexadecimal integer out of range"),
        };
        let stray_message = match base {
            2 => "unexpected character in binary integer",
            8 => "unexpected character in octal integer",
            _ => "unexpected character in hexadecimal integer",
        };

        let mut value: u64 = 0;
        let mut digit_count = 0usize;

        while !self.scanner.is_at_end() {
            let at = self.scanner.position();
            let b = self.scanner.peek();

            if let Some(d) = digit_value(b, base) {
                digit_count += 1;
                let overflows = digit_count > max_digits
                    || (base == 8 && digit_count == 22 && (value >> 60) > 1);
                if overflows {
                    if self.report_byte(at, range_message) {
                        return None;
                    }
                } else {
                    value = (value << shift) | d as u64;
                }
                self.scanner.advance();
            } else if b == b'_' || b == b'\'' {
                self.scanner.advance();
            } else if is_terminator(b) {
                break;
            } else {
                if self.report_byte(at, stray_message) {
                    return None;
                }
                self.scanner.advance();
            }
        }

        let mut result = value as i64;
        if negative {
            result = result.wrapping_neg();
        }

        let span = Span::new(self.token_start, self.scanner.position());
        Some(Token::new(TokenKind::Integer(result), span))
    }

    /// Lexes a decimal integer or float.
    ///
    /// Collects the significant characters into a cleansed buffer (sign
    /// kept, separators dropped) and parses it with the host routines at
    /// the end of the literal.
    fn lex_decimal(&mut self, negative: bool) -> Option<Token<'src>> {
        let mut cleansed = String::new();
        if negative {
            cleansed.push('-');
        }

        let mut is_float = false;
        let mut has_separator = false;
        let mut has_exponent = false;
        let mut expect_exponent_sign = false;
        let mut expect_exponent_digit = false;
        let mut expect_separator_digit = false;

        while !self.scanner.is_at_end() {
            let at = self.scanner.position();
            let b = self.scanner.peek();

            match b {
                b'0'..=b'9' => {
                    expect_exponent_sign = false;
                    expect_exponent_digit = false;
                    expect_separator_digit = false;
                    cleansed.push(b as char);
                    self.scanner.advance();
                },
                // Underscores and single quotes inside numbers are spacing.
                b'_' | b'\'' => {
                    self.scanner.advance();
                },
                b'.' => {
                    if has_separator || has_exponent {
                        if self.report_byte(at, "unexpected decimal separator") {
                            return None;
                        }
                    } else {
                        is_float = true;
                        has_separator = true;
                        expect_separator_digit = true;
                        cleansed.push('.');
                    }
                    self.scanner.advance();
                },
                b'e' | b'E' => {
                    if has_exponent {
                        if self.report_byte(at, "unexpected exponent part") {
                            return None;
                        }
                        self.scanner.advance();
                    } else if expect_separator_digit {
                        self.report_hard(
                            Span::new(at, at + 1),
                            "expected digit after decimal separator in float",
                        );
                        return None;
                    } else {
                        is_float = true;
                        has_exponent = true;
                        expect_exponent_sign = true;
                        expect_exponent_digit = true;
                        cleansed.push('e');
                        self.scanner.advance();
                    }
                },
                b'+' | b'-' => {
                    if expect_exponent_sign {
                        expect_exponent_sign = false;
                        cleansed.push(b as char);
                    } else if self.report_byte(at, "unexpected sign symbol") {
                        return None;
                    }
                    self.scanner.advance();
                },
                b if is_terminator(b) => break,
                _ => {
                    if self.report_byte(at, "unexpected character in decimal number") {
                        return None;
                    }
                    self.scanner.advance();
                },
            }
        }

        let end = self.scanner.position();
        let span = Span::new(self.token_start, end);

        if expect_exponent_digit {
            self.report_hard(Span::point(end), "expected digit after exponent in float");
            return None;
        }
        if expect_separator_digit {
            self.report_hard(
                Span::point(end),
                "expected digit after decimal separator in float",
            );
            return None;
        }

        if !cleansed.bytes().any(|b| b.is_ascii_digit()) {
            if cleansed.is_empty() {
                // A discarded prefix followed by nothing but spacing.
                return Some(Token::new(TokenKind::Integer(0), span));
            }
            self.report_hard(span, "failed to parse decimal number");
            return None;
        }

        if is_float {
            match cleansed.parse::<f64>() {
                Ok(v) => Some(Token::new(TokenKind::Float(v), span)),
                Err(_) => {
                    self.report_hard(span, "failed to parse decimal number");
                    None
                },
            }
        } else {
            match cleansed.parse::<i64>() {
                Ok(v) => Some(Token::new(TokenKind::Integer(v), span)),
                // Out-of-range decimal integers quietly become floats.
                Err(_) => match cleansed.parse::<f64>() {
                    Ok(v) => Some(Token::new(TokenKind::Float(v), span)),
                    Err(_) => {
                        self.report_hard(span, "failed to parse decimal number");
                        None
                    },
                },
            }
        }
    }
}
