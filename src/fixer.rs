//! Visitor that feeds a token tree's natural-language text to a checker and
//! writes corrections back into the tree.

use crate::checker::{Check, Fragment};
use crate::error::Result;
use crate::tree::{Attr, TokenKind, TokenNode, TokenTree};
use std::path::Path;

pub struct Fixer<'c> {
    checker: &'c mut dyn Check,
    file: Option<&'c Path>,
}

impl<'c> Fixer<'c> {
    pub fn new(checker: &'c mut dyn Check, file: Option<&'c Path>) -> Self {
        Self { checker, file }
    }

    /// Visit every leaf of `tree`, returning how many were changed.
    pub fn run<T: TokenTree>(&mut self, tree: &mut T) -> Result<usize> {
        let mut changed = 0;
        for node in tree.leaves_mut() {
            if self.visit(node)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Check a leaf's prefix, when it holds more than whitespace, and its
    /// value, when it is a string or comment token.
    pub fn visit<N: TokenNode>(&mut self, node: &mut N) -> Result<bool> {
        let mut changed = false;

        if !node.text(Attr::Prefix).trim().is_empty() {
            changed |= self.check_attr(node, Attr::Prefix)?;
        }
        if matches!(node.kind(), TokenKind::String | TokenKind::Comment) {
            changed |= self.check_attr(node, Attr::Value)?;
        }

        Ok(changed)
    }

    fn check_attr<N: TokenNode>(&mut self, node: &mut N, attr: Attr) -> Result<bool> {
        let corrected = {
            let mut fragment = Fragment::new(node.text(attr), attr).at_line(node.line(attr));
            if let Some(file) = self.file {
                fragment = fragment.in_file(file);
            }
            self.checker.check(&fragment)?
        };

        if corrected == node.text(attr) {
            return Ok(false);
        }

        node.set_text(attr, corrected);
        node.changed();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::ReportingChecker;
    use crate::cli::output::OutputFormat;
    use crate::engine::dictionary::tests::test_dictionary;
    use crate::engine::{FilterKind, Speller, Tokenizer};
    use crate::tree::{Leaf, SourceLang, SourceTree};
    use std::path::PathBuf;

    /// Records every fragment and upper-cases the ones containing "fix".
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Attr, Option<usize>, Option<String>)>,
    }

    impl Check for Recorder {
        fn check(&mut self, fragment: &Fragment<'_>) -> Result<String> {
            self.seen.push((
                fragment.text.to_string(),
                fragment.origin,
                fragment.context.line,
                fragment.context.file.map(|f| f.display().to_string()),
            ));
            if fragment.text.contains("fix") {
                Ok(fragment.text.to_uppercase())
            } else {
                Ok(fragment.text.to_string())
            }
        }
    }

    #[test]
    fn test_prefix_and_value_checked_independently() {
        let mut leaves = vec![
            Leaf::new(TokenKind::String, "# this is a tpyo\n", "'a string'", 1, 2),
            Leaf::new(TokenKind::Other, "  \n\t", "x", 2, 3),
            Leaf::new(TokenKind::Comment, " ", "// note", 3, 3),
            Leaf::new(TokenKind::EndMarker, "\n# tail\n", "", 3, 5),
        ];

        let mut recorder = Recorder::default();
        let changed = Fixer::new(&mut recorder, Some(Path::new("demo.py")))
            .run(&mut leaves)
            .unwrap();
        assert_eq!(changed, 0);

        let seen: Vec<_> = recorder
            .seen
            .iter()
            .map(|(text, attr, line, _)| (text.as_str(), *attr, *line))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("# this is a tpyo\n", Attr::Prefix, Some(1)),
                ("'a string'", Attr::Value, Some(2)),
                ("// note", Attr::Value, Some(3)),
                ("\n# tail\n", Attr::Prefix, Some(3)),
            ]
        );
        assert!(recorder
            .seen
            .iter()
            .all(|(_, _, _, file)| file.as_deref() == Some("demo.py")));
        assert!(leaves.iter().all(|l| !l.changed));
    }

    #[test]
    fn test_corrections_written_back_and_marked() {
        let mut leaves = vec![
            Leaf::new(TokenKind::Comment, "", "# fix me", 1, 1),
            Leaf::new(TokenKind::String, "\n", "'keep'", 1, 2),
            Leaf::new(TokenKind::Other, "# fix prefix\n", "y", 2, 3),
        ];

        let mut recorder = Recorder::default();
        let changed = Fixer::new(&mut recorder, None).run(&mut leaves).unwrap();

        assert_eq!(changed, 2);
        assert_eq!(leaves[0].value, "# FIX ME");
        assert!(leaves[0].changed);
        assert_eq!(leaves[1].value, "'keep'");
        assert!(!leaves[1].changed);
        assert_eq!(leaves[2].prefix, "# FIX PREFIX\n");
        assert_eq!(leaves[2].value, "y");
        assert!(leaves[2].changed);
    }

    #[test]
    fn test_python_comment_reported_with_file_and_line() {
        let speller = Speller::new(
            test_dictionary(),
            Tokenizer::from_config(&FilterKind::ALL, &[]),
            5,
        );
        let mut checker = ReportingChecker::with_writer(
            speller,
            vec![PathBuf::from("demo.py")],
            OutputFormat::Text,
            false,
            Vec::new(),
        );

        let source = "import os\n# this is a tpyo\n";
        let mut tree = SourceTree::parse(SourceLang::Python, source).unwrap();
        let changed = Fixer::new(&mut checker, None).run(&mut tree).unwrap();
        assert_eq!(changed, 0);
        assert_eq!(tree.to_string(), source);

        let out = String::from_utf8(checker.into_writer()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("demo.py:2 - tpyo ==> ["));
    }
}
