//! fmlc-fmt - Beautifier for FML trees.
//!
//! Walks a parsed forest and emits the canonical textual form: LF line
//! endings, one tab per nesting level, normalized string escaping, and
//! automatically chosen long-bracket levels for document bodies. Output
//! goes to any [`std::io::Write`]; a writer error aborts emission
//! mid-stream and propagates to the caller.
//!
//! The canonical form is stable: beautifying a tree, parsing the result,
//! and beautifying again reproduces the same bytes.
//!
//! # Example
//!
//! ```
//! use fmlc_fmt::beautify;
//! use fmlc_par::parse_bytes;
//! use fmlc_util::Handler;
//!
//! let mut handler = Handler::new();
//! let nodes = parse_bytes(b"a   {  b ;  }", &mut handler);
//! let mut out = Vec::new();
//! beautify(&nodes, &mut out).unwrap();
//! assert_eq!(out, b"a\n{\n\tb;\n}\n");
//! ```

use std::io::{self, Write};

use fmlc_par::{AttrValue, Node, NodeBody};

mod document;

use document::write_document;

/// Emits the canonical form of a forest of nodes.
///
/// # Arguments
///
/// * `nodes` - Top-level nodes, printed in order
/// * `out` - Destination writer; its errors propagate immediately
pub fn beautify<W: Write>(nodes: &[Node<'_>], out: &mut W) -> io::Result<()> {
    let mut beautifier = Beautifier { out, indent: 0 };
    for node in nodes {
        beautifier.node(node)?;
    }
    Ok(())
}

/// Emits the canonical form of a forest as a byte vector.
pub fn beautify_to_vec(nodes: &[Node<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = beautify(nodes, &mut out);
    out
}

struct Beautifier<'w, W> {
    out: &'w mut W,
    indent: usize,
}

impl<W: Write> Beautifier<'_, W> {
    fn node(&mut self, node: &Node<'_>) -> io::Result<()> {
        self.write_indent()?;
        self.out.write_all(node.name.as_bytes())?;

        for class in &node.classes {
            write!(self.out, ".{}", class.name)?;
        }
        if let Some(id) = node.id {
            write!(self.out, "#{}", id)?;
        }

        for attr in &node.attributes {
            write!(self.out, " {}", attr.key)?;
            match &attr.value {
                AttrValue::None => {},
                AttrValue::String(text) => {
                    self.out.write_all(b"=")?;
                    write_string(self.out, text)?;
                },
                AttrValue::Identifier(name) => write!(self.out, "={}", name)?,
                AttrValue::Reference(name) => write!(self.out, "=${}", name)?,
                AttrValue::Integer(value) => write!(self.out, "={}", value)?,
                // {:?} is the shortest representation that parses back to
                // the same bits, and it always keeps a '.' or exponent so
                // the literal re-lexes as a float.
                AttrValue::Float(value) => write!(self.out, "={:?}", value)?,
            }
        }

        match &node.body {
            NodeBody::Empty => self.out.write_all(b";")?,
            NodeBody::Document(body) => {
                self.out.write_all(b" ")?;
                write_document(self.out, body)?;
            },
            NodeBody::Children(children) if children.is_empty() => {
                self.out.write_all(b" { }")?;
            },
            NodeBody::Children(children) => {
                self.out.write_all(b"\n")?;
                self.write_indent()?;
                self.out.write_all(b"{\n")?;
                self.indent += 1;
                for child in children {
                    self.node(child)?;
                }
                self.indent -= 1;
                self.write_indent()?;
                self.out.write_all(b"}")?;
            },
        }

        self.out.write_all(b"\n")
    }

    fn write_indent(&mut self) -> io::Result<()> {
        for _ in 0..self.indent {
            self.out.write_all(b"\t")?;
        }
        Ok(())
    }
}

/// Writes a string value double-quoted, escape-encoding the control
/// bytes the lexer decodes, plus backslash and the quote itself.
fn write_string<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(b"\"")?;
    for &b in text.as_bytes() {
        let escaped: &[u8] = match b {
            0x07 => b"\\a",
            0x08 => b"\\b",
            0x0C => b"\\f",
            0x0A => b"\\n",
            0x0D => b"\\r",
            0x09 => b"\\t",
            0x0B => b"\\v",
            0x00 => b"\\0",
            b'\\' => b"\\\\",
            b'"' => b"\\\"",
            _ => {
                out.write_all(std::slice::from_ref(&b))?;
                continue;
            },
        };
        out.write_all(escaped)?;
    }
    out.write_all(b"\"")
}
