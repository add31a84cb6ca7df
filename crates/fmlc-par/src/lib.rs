//! fmlc-par - Parser for FML.
//!
//! Consumes the token stream produced by [`fmlc_lex`] and builds a forest
//! of [`Node`] values. The grammar:
//!
//! ```text
//! File       := Node*
//! Node       := IDENT ('.' IDENT)* ('#' IDENT)? Attribute* Body
//! Attribute  := IDENT ('=' Value)?
//! Value      := STRING | IDENT | '$' IDENT | INT | FLOAT
//! Body       := ';'  |  DOCUMENT  |  '{' Node* '}'
//! ```
//!
//! The parser is recursive-descent with one token of lookahead. Errors go
//! through the injected [`ErrorSink`](fmlc_util::ErrorSink); on a
//! "continue" verdict the offending token is consumed and parsing resumes
//! at the same grammatical position, on "halt" (or end of input inside an
//! open construct) the whole parse unwinds and the partial forest built
//! so far is returned. The returned tree is always structurally
//! well-formed, even when incomplete.

mod edge_cases;
mod parser;
pub mod tree;

pub use parser::{parse, parse_bytes, Parser};
pub use tree::{AttrValue, Attribute, Class, Node, NodeBody};
