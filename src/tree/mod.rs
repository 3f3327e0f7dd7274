//! Token trees: the leaf-level view of parsed source the fixer walks.

pub mod language;
pub mod sitter;

pub use language::SourceLang;
pub use sitter::SourceTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    String,
    Comment,
    Other,
    /// Carries the text after the last token as its prefix.
    EndMarker,
}

/// The two text attributes of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    /// Source text between the previous leaf and this one.
    Prefix,
    /// The token's own text.
    Value,
}

impl Attr {
    pub fn as_str(self) -> &'static str {
        match self {
            Attr::Prefix => "prefix",
            Attr::Value => "value",
        }
    }
}

/// What a fixer needs from a leaf node.
pub trait TokenNode {
    fn kind(&self) -> TokenKind;
    fn text(&self, attr: Attr) -> &str;
    fn set_text(&mut self, attr: Attr, text: String);
    /// One-based line on which `attr` begins.
    fn line(&self, attr: Attr) -> usize;
    /// Flag the node so a writer knows to persist it.
    fn changed(&mut self);
}

pub trait TokenTree {
    type Node: TokenNode;

    /// Leaves in source order.
    fn leaves_mut(&mut self) -> impl Iterator<Item = &mut Self::Node>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub kind: TokenKind,
    pub prefix: String,
    pub value: String,
    pub prefix_line: usize,
    pub line: usize,
    pub changed: bool,
}

impl Leaf {
    pub fn new(kind: TokenKind, prefix: &str, value: &str, prefix_line: usize, line: usize) -> Self {
        Self {
            kind,
            prefix: prefix.to_string(),
            value: value.to_string(),
            prefix_line,
            line,
            changed: false,
        }
    }
}

impl TokenNode for Leaf {
    fn kind(&self) -> TokenKind {
        self.kind
    }

    fn text(&self, attr: Attr) -> &str {
        match attr {
            Attr::Prefix => &self.prefix,
            Attr::Value => &self.value,
        }
    }

    fn set_text(&mut self, attr: Attr, text: String) {
        match attr {
            Attr::Prefix => self.prefix = text,
            Attr::Value => self.value = text,
        }
    }

    fn line(&self, attr: Attr) -> usize {
        match attr {
            Attr::Prefix => self.prefix_line,
            Attr::Value => self.line,
        }
    }

    fn changed(&mut self) {
        self.changed = true;
    }
}

impl TokenTree for Vec<Leaf> {
    type Node = Leaf;

    fn leaves_mut(&mut self) -> impl Iterator<Item = &mut Leaf> {
        self.iter_mut()
    }
}
