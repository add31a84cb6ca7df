//! Tree node definitions.
//!
//! The parser produces a forest of [`Node`] values. Every borrowed slice
//! points into the source buffer the tokens were lexed from; the tree
//! must not outlive it. Children, classes, and attributes are ordered
//! vectors in source order.

use std::borrow::Cow;

use fmlc_util::Span;

/// A class attached to a node: `name.class`.
#[derive(Clone, Debug, PartialEq)]
pub struct Class<'src> {
    /// Class name.
    pub name: &'src str,
    /// Span from the introducing `.` through the name.
    pub span: Span,
}

/// The value of an attribute.
///
/// Attributes without `=` have value [`AttrValue::None`].
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttrValue<'src> {
    /// No value was given.
    #[default]
    None,
    /// A string literal, decoded.
    String(Cow<'src, str>),
    /// A bare identifier.
    Identifier(&'src str),
    /// A `$name` reference. Resolution belongs to consumers.
    Reference(&'src str),
    /// An integer literal.
    Integer(i64),
    /// A float literal.
    Float(f64),
}

/// A key, optionally with a value: `key` or `key=value`.
///
/// Keys are not required to be unique within a node; uniqueness policy
/// belongs to consumers.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute<'src> {
    /// Attribute key.
    pub key: &'src str,
    /// Span from the key through the value, if any.
    pub span: Span,
    /// Attached value.
    pub value: AttrValue<'src>,
}

/// What follows a node's head.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum NodeBody<'src> {
    /// `;` - no body.
    #[default]
    Empty,
    /// `{ ... }` - child nodes. An empty list is legal and distinct from
    /// [`NodeBody::Empty`].
    Children(Vec<Node<'src>>),
    /// A long-bracket document; the payload is the verbatim inner text.
    Document(&'src str),
}

/// One FML element.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<'src> {
    /// Element name.
    pub name: &'src str,
    /// Span covering the whole node, head through body.
    pub span: Span,
    /// Classes in declaration order.
    pub classes: Vec<Class<'src>>,
    /// Optional id (`#id`).
    pub id: Option<&'src str>,
    /// Attributes in source order.
    pub attributes: Vec<Attribute<'src>>,
    /// Body.
    pub body: NodeBody<'src>,
}

impl<'src> Node<'src> {
    /// Creates a bare node with an empty body.
    pub fn new(name: &'src str, span: Span) -> Self {
        Self {
            name,
            span,
            classes: Vec::new(),
            id: None,
            attributes: Vec::new(),
            body: NodeBody::Empty,
        }
    }

    /// Returns the children, or an empty slice for other body kinds.
    pub fn children(&self) -> &[Node<'src>] {
        match &self.body {
            NodeBody::Children(children) => children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_empty() {
        let node = Node::new("a", Span::new(0, 1));
        assert_eq!(node.body, NodeBody::Empty);
        assert!(node.classes.is_empty());
        assert!(node.id.is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_children_accessor() {
        let mut node = Node::new("a", Span::new(0, 10));
        node.body = NodeBody::Children(vec![Node::new("b", Span::new(3, 5))]);
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].name, "b");
    }

    #[test]
    fn test_default_attr_value() {
        assert_eq!(AttrValue::default(), AttrValue::None);
    }
}
