pub mod interactive;
pub mod report;

pub use interactive::{Decision, DialoguerPrompt, InteractiveChecker, Prompt};
pub use report::ReportingChecker;

use crate::error::Result;
use crate::tree::Attr;
use std::path::Path;

/// Where a fragment came from, for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct CheckContext<'a> {
    pub file: Option<&'a Path>,
    /// One-based line on which the fragment begins.
    pub line: Option<usize>,
    /// Extra `key:value` pairs printed ahead of the word.
    pub extra: Vec<(String, String)>,
}

/// A piece of extracted source text submitted for checking.
#[derive(Debug, Clone)]
pub struct Fragment<'a> {
    pub text: &'a str,
    pub origin: Attr,
    pub context: CheckContext<'a>,
}

impl<'a> Fragment<'a> {
    pub fn new(text: &'a str, origin: Attr) -> Self {
        Self {
            text,
            origin,
            context: CheckContext::default(),
        }
    }

    pub fn in_file(mut self, file: &'a Path) -> Self {
        self.context.file = Some(file);
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.context.line = Some(line);
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.extra.push((key.into(), value.to_string()));
        self
    }

    /// Line of the byte at `offset`, when the fragment's line is known.
    pub fn line_of(&self, offset: usize) -> Option<usize> {
        let before = self.text.get(..offset).unwrap_or(self.text);
        self.context
            .line
            .map(|line| line + before.matches('\n').count())
    }
}

/// Checks a fragment and returns its (possibly corrected) text.
pub trait Check {
    fn check(&mut self, fragment: &Fragment<'_>) -> Result<String>;
}

/// Blank out quoting and comment punctuation so the tokenizer never sees it.
///
/// Each replaced character is one byte and becomes one space, so offsets
/// into the result are offsets into `text`. A `#!/` at the start of a line is
/// left for the shebang filter.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_start = true;

    for (i, ch) in text.char_indices() {
        match ch {
            '"' | '\'' | '`' => out.push(' '),
            '#' if !(line_start && text[i..].starts_with("#!/")) => out.push(' '),
            _ => out.push(ch),
        }
        line_start = ch == '\n';
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_blanks_quotes_and_hashes() {
        assert_eq!(normalize("# it's `code` \"here\""), "  it s  code   here ");
        assert_eq!(normalize("# it's").len(), "# it's".len());
    }

    #[test]
    fn test_normalize_keeps_shebang() {
        assert_eq!(
            normalize("#!/usr/bin/env python\n# done"),
            "#!/usr/bin/env python\n  done"
        );
        assert_eq!(normalize("x #!/bin/sh"), "x  !/bin/sh");
    }

    #[test]
    fn test_fragment_line_of() {
        let fragment = Fragment::new("one\ntwo\nthree", Attr::Prefix).at_line(10);
        assert_eq!(fragment.line_of(0), Some(10));
        assert_eq!(fragment.line_of(4), Some(11));
        assert_eq!(fragment.line_of(8), Some(12));
        assert_eq!(Fragment::new("x", Attr::Value).line_of(0), None);
    }
}
