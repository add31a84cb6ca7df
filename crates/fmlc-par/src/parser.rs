//! Recursive-descent parser.
//!
//! The parser owns the token vector and walks it with one token of
//! lookahead. Recovery policy: a "continue" verdict from the sink makes
//! the parser consume the offending token and retry at the same
//! grammatical position; a "halt" verdict unwinds the whole parse. End of
//! input inside an open construct is always terminal for that construct.

use fmlc_lex::{tokenize, Token, TokenKind};
use fmlc_util::{ErrorSink, Span};

use crate::tree::{AttrValue, Attribute, Class, Node, NodeBody};

/// Parser state over a lexed token vector.
pub struct Parser<'src, 'sink> {
    tokens: Vec<Token<'src>>,
    position: usize,
    /// Stand-in terminator, also used when the lexer halted before
    /// emitting its own Eof token.
    eof: Token<'src>,
    sink: &'sink mut dyn ErrorSink,
    halted: bool,
}

impl<'src, 'sink> Parser<'src, 'sink> {
    /// Creates a parser over the given tokens.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token vector from [`fmlc_lex::tokenize`]
    /// * `sink` - Receiver for diagnostics
    pub fn new(tokens: Vec<Token<'src>>, sink: &'sink mut dyn ErrorSink) -> Self {
        let eof_span = tokens
            .last()
            .map(|t| Span::point(t.span.end))
            .unwrap_or_else(|| Span::point(0));
        Self {
            tokens,
            position: 0,
            eof: Token::new(TokenKind::Eof, eof_span),
            sink,
            halted: false,
        }
    }

    /// Parses the whole token stream into a forest of top-level nodes.
    ///
    /// Always returns the nodes completed (or partially completed) so
    /// far; inspect the sink for diagnostics.
    pub fn parse_file(&mut self) -> Vec<Node<'src>> {
        let mut nodes = Vec::new();

        while !self.halted {
            if self.peek().kind.is_eof() {
                break;
            }
            if self.peek().kind.is_identifier() {
                let node = self.parse_node();
                nodes.push(node);
            } else {
                let span = self.peek().span;
                if self.report(span, "expected identifier to start top-level node") {
                    break;
                }
                self.bump();
            }
        }

        nodes
    }

    /// Parses one node. The caller has checked that the next token is an
    /// identifier.
    fn parse_node(&mut self) -> Node<'src> {
        let head = self.bump();
        let name = match head.kind {
            TokenKind::Identifier(name) => name,
            _ => "",
        };
        let mut node = Node::new(name, head.span);

        // Classes may appear only between the name and the id/attributes.
        let mut tk = self.bump();
        while matches!(tk.kind, TokenKind::Dot) {
            let dot_start = tk.span.start;
            let after = self.bump();
            match after.kind {
                TokenKind::Identifier(class_name) => {
                    node.classes.push(Class {
                        name: class_name,
                        span: Span::new(dot_start, after.span.end),
                    });
                },
                kind => {
                    node.span.end = after.span.end;
                    if self.report(after.span, "expected identifier after dot") || kind.is_eof() {
                        return node;
                    }
                },
            }
            tk = self.bump();
        }

        if matches!(tk.kind, TokenKind::Hash) {
            let after = self.bump();
            match after.kind {
                TokenKind::Identifier(id) => node.id = Some(id),
                kind => {
                    node.span.end = after.span.end;
                    if self.report(after.span, "expected identifier after hash") || kind.is_eof() {
                        return node;
                    }
                    // Otherwise the attribute loop picks up from here.
                },
            }
            tk = self.bump();
        }

        loop {
            let key = match tk.kind {
                TokenKind::Identifier(key) => key,
                _ => break,
            };
            let mut attribute = Attribute {
                key,
                span: tk.span,
                value: AttrValue::None,
            };

            tk = self.bump();
            match tk.kind {
                // No explicit value; the token just read belongs to the
                // next attribute or to the body.
                TokenKind::Identifier(_)
                | TokenKind::Semicolon
                | TokenKind::BracketOpen
                | TokenKind::Document(_) => {},

                TokenKind::Equal => {
                    let value_tok = self.bump();
                    let value_span = value_tok.span;
                    match value_tok.kind {
                        TokenKind::Integer(v) => {
                            attribute.value = AttrValue::Integer(v);
                            attribute.span.end = value_span.end;
                        },
                        TokenKind::Float(v) => {
                            attribute.value = AttrValue::Float(v);
                            attribute.span.end = value_span.end;
                        },
                        TokenKind::String(v) => {
                            attribute.value = AttrValue::String(v);
                            attribute.span.end = value_span.end;
                        },
                        TokenKind::Identifier(v) => {
                            attribute.value = AttrValue::Identifier(v);
                            attribute.span.end = value_span.end;
                        },
                        TokenKind::Dollar => {
                            let ref_tok = self.bump();
                            match ref_tok.kind {
                                TokenKind::Identifier(v) => {
                                    attribute.value = AttrValue::Reference(v);
                                    attribute.span.end = ref_tok.span.end;
                                },
                                TokenKind::Eof => {
                                    node.span.end = ref_tok.span.end;
                                    self.report(ref_tok.span, "expected identifier after dollar sign");
                                    node.attributes.push(attribute);
                                    return node;
                                },
                                _ => {
                                    node.span.end = ref_tok.span.end;
                                    if self.report(ref_tok.span, "expected identifier after dollar sign")
                                    {
                                        node.attributes.push(attribute);
                                        return node;
                                    }
                                },
                            }
                        },
                        TokenKind::Eof => {
                            node.span.end = value_span.end;
                            self.report(value_span, "unfinished attribute");
                            node.attributes.push(attribute);
                            return node;
                        },
                        _ => {
                            node.span.end = value_span.end;
                            if self.report(value_span, "unexpected token after equal sign") {
                                node.attributes.push(attribute);
                                return node;
                            }
                        },
                    }
                    tk = self.bump();
                },

                TokenKind::Eof => {
                    node.span.end = tk.span.end;
                    self.report(tk.span, "unclosed node");
                    node.attributes.push(attribute);
                    return node;
                },

                _ => {
                    node.span.end = tk.span.end;
                    if self.report(tk.span, "expected token after attribute key") {
                        node.attributes.push(attribute);
                        return node;
                    }
                    node.attributes.push(attribute);
                    tk = self.bump();
                    continue;
                },
            }

            node.attributes.push(attribute);
        }

        match tk.kind {
            TokenKind::Document(text) => {
                node.body = NodeBody::Document(text);
                node.span.end = tk.span.end;
            },
            TokenKind::Semicolon => {
                node.span.end = tk.span.end;
            },
            TokenKind::BracketOpen => {
                let mut children = Vec::new();
                loop {
                    let span = self.peek().span;
                    if matches!(self.peek().kind, TokenKind::BracketClose) {
                        node.span.end = span.end;
                        self.bump();
                        break;
                    }
                    if self.peek().kind.is_identifier() {
                        children.push(self.parse_node());
                        if self.halted {
                            node.span.end = self.eof.span.end;
                            node.body = NodeBody::Children(children);
                            return node;
                        }
                        continue;
                    }
                    let at_eof = self.peek().kind.is_eof();
                    if self.report(span, "expected identifier to start child node") || at_eof {
                        node.span.end = self.eof.span.end;
                        node.body = NodeBody::Children(children);
                        return node;
                    }
                    self.bump();
                }
                node.body = NodeBody::Children(children);
            },
            TokenKind::Eof => {
                node.span.end = tk.span.end;
                self.report(tk.span, "unclosed node");
            },
            _ => {
                node.span.end = tk.span.end;
                // The node is returned either way; the offending token
                // has been consumed.
                self.report(tk.span, "unexpected token in node");
            },
        }

        node
    }

    fn peek(&self) -> &Token<'src> {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    fn bump(&mut self) -> Token<'src> {
        match self.tokens.get(self.position) {
            Some(token) => {
                let token = token.clone();
                self.position += 1;
                token
            },
            None => self.eof.clone(),
        }
    }

    /// Reports a diagnostic with the full token span.
    ///
    /// # Returns
    ///
    /// `true` if the sink requested a halt; the parser then unwinds.
    fn report(&mut self, span: Span, message: &str) -> bool {
        if self.sink.report(span, message) {
            self.halted = true;
        }
        self.halted
    }
}

/// Parses a token vector into a forest of top-level nodes.
pub fn parse<'src>(tokens: Vec<Token<'src>>, sink: &mut dyn ErrorSink) -> Vec<Node<'src>> {
    Parser::new(tokens, sink).parse_file()
}

/// Lexes and parses a source buffer in one step.
pub fn parse_bytes<'src>(source: &'src [u8], sink: &mut dyn ErrorSink) -> Vec<Node<'src>> {
    let tokens = tokenize(source, sink);
    parse(tokens, sink)
}
