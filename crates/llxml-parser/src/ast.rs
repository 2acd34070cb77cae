//! Abstract Syntax Tree for llxml documents.
//!
//! Every node is built exactly once by the production that owns its grammar
//! rule and handed to its caller. Only a [`TagBlock`]'s children grow while its
//! production scans siblings.

use llxml_lexer::Span;

/// A parsed element: self-closing, or a block with children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `<name attr*/>`
    Single(SingleTag),

    /// `<name attr*> children </name>`
    Block(TagBlock),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Single(tag) => &tag.name,
            Node::Block(block) => &block.name,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Node::Single(tag) => &tag.attributes,
            Node::Block(block) => &block.attributes,
        }
    }

    /// Children in document order. Always empty for a single tag.
    pub fn children(&self) -> &[Child] {
        match self {
            Node::Single(_) => &[],
            Node::Block(block) => &block.children,
        }
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        find_attribute(self.attributes(), name)
    }
}

/// A `name="value"` pair. Bare attributes carry an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// An attribute written without `=value`.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

/// Result of the tag-start production.
#[derive(Debug, Clone, PartialEq)]
pub enum TagStart {
    /// `<name attr*>`: must be closed by a matching `</name>`.
    Open(OpenTag),

    /// `<name attr*/>`: terminal.
    Single(SingleTag),
}

/// An opening tag awaiting its close.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// A self-closing tag.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleTag {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl SingleTag {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}

/// `</name>`, with the location of its `</` for mismatch reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEndMarker {
    pub name: String,
    pub span: Span,
}

/// A text run between tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A paired element with its children.
#[derive(Debug, Clone, PartialEq)]
pub struct TagBlock {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Child>,
}

impl TagBlock {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        find_attribute(&self.attributes, name)
    }

    /// Nested elements, skipping text runs.
    pub fn elements(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter_map(|child| match child {
            Child::Element(node) => Some(node),
            Child::Text(_) => None,
        })
    }

    /// Concatenation of the direct text children, separated by single spaces.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Child::Text(text) => Some(text.value.as_str()),
                Child::Element(_) => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<OpenTag> for TagBlock {
    fn from(tag: OpenTag) -> Self {
        TagBlock::new(tag.name, tag.attributes)
    }
}

/// One entry of a block's children.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Text(Text),
    Element(Node),
}

// Duplicate names are all kept; lookups see the first one.
fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name == name)
        .map(|a| a.value.as_str())
}
