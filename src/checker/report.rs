use crate::checker::{normalize, Check, Fragment};
use crate::cli::output::{write_diagnostic, Diagnostic, OutputFormat};
use crate::engine::Speller;
use crate::error::Result;
use log::trace;
use std::io::{self, Write};
use std::path::PathBuf;

/// Prints a diagnostic for every misspelling and leaves the text alone.
pub struct ReportingChecker<W = io::Stdout> {
    speller: Speller,
    files: Vec<PathBuf>,
    format: OutputFormat,
    colored: bool,
    out: W,
    reported: usize,
}

impl ReportingChecker<io::Stdout> {
    pub fn new(speller: Speller, files: Vec<PathBuf>, format: OutputFormat, colored: bool) -> Self {
        Self::with_writer(speller, files, format, colored, io::stdout())
    }
}

impl<W: Write> ReportingChecker<W> {
    pub fn with_writer(
        speller: Speller,
        files: Vec<PathBuf>,
        format: OutputFormat,
        colored: bool,
        out: W,
    ) -> Self {
        Self {
            speller,
            files,
            format,
            colored,
            out,
            reported: 0,
        }
    }

    /// Number of misspellings printed so far.
    pub fn reported(&self) -> usize {
        self.reported
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

impl<W: Write> Check for ReportingChecker<W> {
    fn check(&mut self, fragment: &Fragment<'_>) -> Result<String> {
        trace!("checking {} {:?}", fragment.origin.as_str(), fragment.text);

        let normalized = normalize(fragment.text);
        let file = fragment
            .context
            .file
            .or_else(|| self.files.first().map(PathBuf::as_path));

        for misspelling in self.speller.misspellings(&normalized) {
            let diagnostic = Diagnostic {
                file,
                line: fragment.line_of(misspelling.offset),
                extra: &fragment.context.extra,
                word: &misspelling.word,
                suggestions: &misspelling.suggestions,
            };
            write_diagnostic(&mut self.out, &diagnostic, self.format, self.colored)?;
            self.reported += 1;
        }

        Ok(fragment.text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dictionary::tests::test_dictionary;
    use crate::engine::{FilterKind, Tokenizer};
    use crate::tree::Attr;
    use std::path::Path;

    fn checker(files: Vec<PathBuf>) -> ReportingChecker<Vec<u8>> {
        let speller = Speller::new(
            test_dictionary(),
            Tokenizer::from_config(&FilterKind::ALL, &[]),
            5,
        );
        ReportingChecker::with_writer(speller, files, OutputFormat::Text, false, Vec::new())
    }

    fn output(checker: ReportingChecker<Vec<u8>>) -> String {
        String::from_utf8(checker.into_writer()).unwrap()
    }

    #[test]
    fn test_clean_text_prints_nothing() {
        let mut checker = checker(Vec::new());
        let text = "# this is a \"typo\"";
        let returned = checker.check(&Fragment::new(text, Attr::Value)).unwrap();

        assert_eq!(returned, text);
        assert_eq!(checker.reported(), 0);
        assert_eq!(output(checker), "");
    }

    #[test]
    fn test_misspelling_reported_once_and_text_unchanged() {
        let mut checker = checker(vec![PathBuf::from("fix_spellcheck.py")]);
        let text = "# this is a tpyo";
        let fragment = Fragment::new(text, Attr::Value).at_line(2);
        let returned = checker.check(&fragment).unwrap();

        assert_eq!(returned, text);
        assert_eq!(checker.reported(), 1);
        let out = output(checker);
        assert_eq!(out.lines().count(), 1);
        assert!(out.starts_with("fix_spellcheck.py:2 - tpyo ==> ['"));
        assert!(out.contains("'typo'"));
    }

    #[test]
    fn test_context_file_and_line_offsets() {
        let mut checker = checker(vec![PathBuf::from("first.py")]);
        let fragment = Fragment::new("\"\"\"hello\nwrold\n\ntpyo\"\"\"", Attr::Value)
            .in_file(Path::new("other.py"))
            .at_line(7)
            .with("kind", "docstring");
        checker.check(&fragment).unwrap();

        let out = output(checker);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("other.py:8 - kind:docstring - wrold ==> "));
        assert!(lines[1].starts_with("other.py:10 - kind:docstring - tpyo ==> "));
    }

    #[test]
    fn test_without_line_no_location_prefix() {
        let mut checker = checker(vec![PathBuf::from("first.py")]);
        checker.check(&Fragment::new("tpyo", Attr::Value)).unwrap();
        assert!(output(checker).starts_with("tpyo ==> ["));
    }

    #[test]
    fn test_quotes_and_hashes_never_flagged() {
        let mut checker = checker(Vec::new());
        checker
            .check(&Fragment::new("# ' \" ` ## '' `` \"\"\"", Attr::Prefix).at_line(1))
            .unwrap();
        assert_eq!(checker.reported(), 0);
    }

    #[test]
    fn test_emails_and_urls_never_flagged() {
        let mut checker = checker(Vec::new());
        checker
            .check(
                &Fragment::new(
                    "mail usre@exmaple.com or see http://exmaple.com/pth and <http://exmaple.com>",
                    Attr::Value,
                )
                .at_line(1),
            )
            .unwrap();
        assert_eq!(checker.reported(), 0);
    }

    #[test]
    fn test_shebang_line_not_flagged_whole() {
        let mut checker = checker(Vec::new());
        checker
            .check(&Fragment::new("#!/usr/bin/env python", Attr::Value).at_line(1))
            .unwrap();
        let out = output(checker);
        assert!(!out.contains("#!/usr/bin/env python ==>"));
        assert!(!out.contains("usr "));
        assert!(!out.contains("env "));
    }
}
