//! fmlc-lex - Lexical analyzer for FML.
//!
//! The lexer scans raw UTF-8 bytes and yields a typed token stream with
//! decoded literal values. Tokens borrow from the source buffer wherever
//! possible; only strings that contain escape sequences allocate.
//!
//! # Token inventory
//!
//! | Input | Token |
//! |---|---|
//! | `name`, `btn-2`, `日本語` | `Identifier` |
//! | `42`, `0xFF`, `0b1010`, `0o17`, `-3` | `Integer` |
//! | `0.5`, `1e3`, `2.5E-3` | `Float` |
//! | `"text\n"` | `String` (escapes resolved) |
//! | `[=*[ ... ]=*]` | `Document` (verbatim payload) |
//! | `= { } ; . # $` | the corresponding punctuation token |
//!
//! Whitespace and comments (`//`, `/* */`) never produce tokens.
//!
//! # Error handling
//!
//! The lexer never panics; every problem is routed through the injected
//! [`ErrorSink`](fmlc_util::ErrorSink). Recoverable errors (stray bytes,
//! out-of-range digits) honor the sink's halt verdict; errors without a
//! sensible recovery (invalid UTF-8 sequences, unterminated strings,
//! documents, and block comments, malformed floats) halt the scan
//! regardless. On a halt the tokens produced so far are returned without
//! the terminating [`TokenKind::Eof`].
//!
//! # Example
//!
//! ```
//! use fmlc_lex::{tokenize, TokenKind};
//! use fmlc_util::Handler;
//!
//! let mut handler = Handler::new();
//! let tokens = tokenize(b"a label=1;", &mut handler);
//! assert!(!handler.has_errors());
//! assert_eq!(tokens.len(), 6); // a, label, =, 1, ;, Eof
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

pub mod scanner;
pub mod token;
pub mod utf8;

mod edge_cases;
mod lexer;

pub use lexer::{tokenize, Lexer};
pub use scanner::Scanner;
pub use token::{Token, TokenKind};
