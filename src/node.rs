//! Renderable document tree.
//!
//! A [`Node`] is either a [`Leaf`] holding atomic content or a [`Parent`]
//! holding an ordered list of children. Trees are built bottom-up, never
//! mutated, and serialized once with [`Node::render`].

use crate::error::ValidationError;

/// Ordered `name="value"` pairs emitted on an opening tag.
///
/// Values are written verbatim; nothing is escaped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, keeping insertion order.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Render as ` name="value"` for each pair, or an empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        for (name, value) in &self.0 {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Node with no children. Without a tag the value is emitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    tag: Option<String>,
    value: String,
    attributes: Attributes,
}

impl Leaf {
    /// Raw text with no wrapping tag.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn render_into(&self, out: &mut String) {
        match &self.tag {
            Some(tag) => {
                open_tag(tag, &self.attributes, out);
                out.push_str(&self.value);
                close_tag(tag, out);
            }
            None => out.push_str(&self.value),
        }
    }
}

/// Node wrapping an ordered sequence of children.
///
/// Both the tag and the children sequence must be present to render. An empty
/// sequence is fine; an absent one is a [`ValidationError::MissingChildren`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    tag: Option<String>,
    children: Option<Vec<Node>>,
    attributes: Attributes,
}

impl Parent {
    pub fn new(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self::from_parts(Some(tag.into()), Some(children))
    }

    /// Build a parent whose tag or children may be missing.
    ///
    /// Such a node can exist but fails to render.
    pub fn from_parts(tag: Option<String>, children: Option<Vec<Node>>) -> Self {
        Self {
            tag,
            children,
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn render_into(&self, out: &mut String) -> Result<(), ValidationError> {
        let tag = self.tag.as_deref().ok_or(ValidationError::MissingTag)?;
        let children = self
            .children
            .as_ref()
            .ok_or_else(|| ValidationError::MissingChildren(tag.to_string()))?;

        open_tag(tag, &self.attributes, out);
        for child in children {
            child.render_into(out)?;
        }
        close_tag(tag, out);
        Ok(())
    }
}

/// A renderable unit of the document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Parent(Parent),
}

impl Node {
    /// Serialize this node and its subtree to HTML.
    pub fn render(&self) -> Result<String, ValidationError> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<(), ValidationError> {
        match self {
            Node::Leaf(leaf) => {
                leaf.render_into(out);
                Ok(())
            }
            Node::Parent(parent) => parent.render_into(out),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf(leaf) => leaf.tag(),
            Node::Parent(parent) => parent.tag(),
        }
    }

    /// Children of a parent; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Parent(parent) => parent.children(),
        }
    }
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<Parent> for Node {
    fn from(parent: Parent) -> Self {
        Node::Parent(parent)
    }
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    attributes.render_into(out);
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
