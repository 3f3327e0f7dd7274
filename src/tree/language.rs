use crate::tree::TokenKind;
use std::fmt;
use std::path::Path;

/// Languages with a tree-sitter grammar wired in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLang {
    Python,
    Rust,
    /// TypeScript and JavaScript, parsed with the TSX grammar.
    TypeScript,
}

impl SourceLang {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" | "pyi" => Some(SourceLang::Python),
            "rs" => Some(SourceLang::Rust),
            "ts" | "tsx" | "mts" | "cts" | "js" | "jsx" | "mjs" | "cjs" => {
                Some(SourceLang::TypeScript)
            }
            _ => None,
        }
    }

    /// Detect language from extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn tree_sitter_language(self) -> tree_sitter::Language {
        match self {
            SourceLang::Python => tree_sitter_python::LANGUAGE.into(),
            SourceLang::Rust => tree_sitter_rust::LANGUAGE.into(),
            SourceLang::TypeScript => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Classify a named grammar node. String and comment nodes are treated
    /// as single tokens even when the grammar gives them children.
    pub fn classify(self, kind: &str) -> TokenKind {
        let (strings, comments): (&[&str], &[&str]) = match self {
            SourceLang::Python => (&["string"], &["comment"]),
            SourceLang::Rust => (
                &["string_literal", "raw_string_literal", "char_literal"],
                &["line_comment", "block_comment"],
            ),
            SourceLang::TypeScript => (&["string", "template_string"], &["comment"]),
        };

        if strings.contains(&kind) {
            TokenKind::String
        } else if comments.contains(&kind) {
            TokenKind::Comment
        } else {
            TokenKind::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceLang::Python => "python",
            SourceLang::Rust => "rust",
            SourceLang::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for SourceLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
