//! Tree-sitter adapter.
//!
//! A parsed file is flattened into an ordered list of [`Leaf`]s. Each leaf
//! owns the source text between the previous leaf and itself as its prefix,
//! so concatenating every `prefix + value` reproduces the file exactly and a
//! rewritten leaf can be written back without touching anything else.

use crate::error::{Error, Result};
use crate::tree::{Leaf, SourceLang, TokenKind, TokenTree};
use std::fmt;

#[derive(Debug)]
pub struct SourceTree {
    leaves: Vec<Leaf>,
}

impl SourceTree {
    pub fn parse(language: SourceLang, source: &str) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| Error::Parser {
                language: language.to_string(),
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or_else(|| Error::Parser {
            language: language.to_string(),
            message: "parsing failed".to_string(),
        })?;

        let mut atoms = Vec::new();
        collect_atoms(tree.root_node(), language, &mut atoms);

        let mut leaves = Vec::with_capacity(atoms.len() + 1);
        let mut cursor = 0;
        let mut cursor_line = 1;

        for node in atoms {
            let start = node.start_byte();
            let end = node.end_byte();
            if start < cursor {
                continue;
            }

            let (Some(prefix), Some(value)) = (source.get(cursor..start), source.get(start..end))
            else {
                return Err(Error::Parser {
                    language: language.to_string(),
                    message: format!("token at byte {} is not on a character boundary", start),
                });
            };

            let kind = if node.is_named() {
                language.classify(node.kind())
            } else {
                TokenKind::Other
            };

            leaves.push(Leaf::new(
                kind,
                prefix,
                value,
                cursor_line,
                node.start_position().row + 1,
            ));
            cursor = end;
            cursor_line = node.end_position().row + 1;
        }

        let trailing = &source[cursor..];
        let end_line = cursor_line + trailing.matches('\n').count();
        leaves.push(Leaf::new(
            TokenKind::EndMarker,
            trailing,
            "",
            cursor_line,
            end_line,
        ));

        Ok(Self { leaves })
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    /// Whether any leaf has been rewritten.
    pub fn is_changed(&self) -> bool {
        self.leaves.iter().any(|l| l.changed)
    }
}

impl TokenTree for SourceTree {
    type Node = Leaf;

    fn leaves_mut(&mut self) -> impl Iterator<Item = &mut Leaf> {
        self.leaves.iter_mut()
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leaf in &self.leaves {
            f.write_str(&leaf.prefix)?;
            f.write_str(&leaf.value)?;
        }
        Ok(())
    }
}

/// Depth-first collection of the nodes that become leaves: terminal nodes,
/// plus string and comment nodes taken whole.
fn collect_atoms<'t>(
    node: tree_sitter::Node<'t>,
    language: SourceLang,
    atoms: &mut Vec<tree_sitter::Node<'t>>,
) {
    let atomic = node.child_count() == 0
        || (node.is_named() && language.classify(node.kind()) != TokenKind::Other);

    if atomic {
        // MISSING nodes inserted by error recovery have no extent.
        if node.end_byte() > node.start_byte() {
            atoms.push(node);
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_atoms(child, language, atoms);
    }
}
