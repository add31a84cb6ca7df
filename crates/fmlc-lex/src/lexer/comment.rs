//! Comment skipping.
//!
//! `//` runs to the end of the line (or input), `/*` to the next `*/`.
//! Comments never produce tokens. Block comments do not nest.

use fmlc_util::Span;

use crate::Lexer;

impl Lexer<'_, '_> {
    /// Skips a comment. The caller has seen the introducing `/`.
    ///
    /// A `/` not followed by `/` or `*` is reported as an unexpected
    /// character; only the slash itself is consumed, so the next byte is
    /// lexed normally.
    ///
    /// # Returns
    ///
    /// `Some(())` to continue scanning, `None` after a halt.
    pub(crate) fn skip_comment(&mut self) -> Option<()> {
        let slash = self.scanner.position();
        self.scanner.advance();

        match self.scanner.peek() {
            b'/' => {
                self.scanner.advance();
                self.skip_line_comment();
                Some(())
            },
            b'*' => {
                self.scanner.advance();
                self.skip_block_comment()
            },
            _ => {
                if self.report_byte(slash, "unexpected character") {
                    None
                } else {
                    Some(())
                }
            },
        }
    }

    /// Skips to the end of the line. End of input is a valid ending.
    fn skip_line_comment(&mut self) {
        while !self.scanner.is_at_end() {
            let b = self.scanner.peek();
            self.scanner.advance();
            if b == b'\n' {
                return;
            }
        }
    }

    /// Skips to the closing `*/`. End of input first is a hard error.
    fn skip_block_comment(&mut self) -> Option<()> {
        let mut found_asterisk = false;

        while !self.scanner.is_at_end() {
            match self.scanner.peek() {
                b'*' => found_asterisk = true,
                b'/' if found_asterisk => {
                    self.scanner.advance();
                    return Some(());
                },
                _ => found_asterisk = false,
            }
            self.scanner.advance();
        }

        self.report_hard(Span::point(self.scanner.len()), "unterminated block comment");
        None
    }
}
