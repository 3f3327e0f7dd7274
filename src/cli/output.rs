use colored::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One reported misspelling.
#[derive(Debug, Clone)]
pub struct Diagnostic<'a> {
    pub file: Option<&'a Path>,
    pub line: Option<usize>,
    pub extra: &'a [(String, String)],
    pub word: &'a str,
    pub suggestions: &'a [String],
}

impl Diagnostic<'_> {
    /// `file:line - key:value - word ==> ['a', 'b']`
    ///
    /// The `file:line` segment is only present when the line is known.
    pub fn to_line(&self, colored_output: bool) -> String {
        let mut line = self.location().map(|l| l + " - ").unwrap_or_default();

        for (key, value) in self.extra {
            line.push_str(&format!("{}:{} - ", key, value));
        }

        let suggestions = format_suggestions(self.suggestions);
        if colored_output {
            line.push_str(&format!(
                "{} ==> {}",
                self.word.red(),
                suggestions.green()
            ));
        } else {
            line.push_str(&format!("{} ==> {}", self.word, suggestions));
        }

        line
    }

    pub fn location(&self) -> Option<String> {
        let line = self.line?;
        let file = self
            .file
            .map(|f| f.display().to_string())
            .unwrap_or_default();
        Some(format!("{}:{}", file, line))
    }
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    file: Option<String>,
    line: Option<usize>,
    word: &'a str,
    suggestions: &'a [String],
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    context: BTreeMap<&'a str, &'a str>,
}

pub fn write_diagnostic<W: Write>(
    out: &mut W,
    diagnostic: &Diagnostic<'_>,
    format: OutputFormat,
    colored_output: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", diagnostic.to_line(colored_output)),
        OutputFormat::Json => {
            let json = JsonDiagnostic {
                file: diagnostic.file.map(|f| f.display().to_string()),
                line: diagnostic.line,
                word: diagnostic.word,
                suggestions: diagnostic.suggestions,
                context: diagnostic
                    .extra
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect(),
            };
            serde_json::to_writer(&mut *out, &json)?;
            writeln!(out)
        }
    }
}

/// Render suggestions as a bracketed, quoted list: `['typo', 'tyro']`.
pub fn format_suggestions(suggestions: &[String]) -> String {
    let quoted = suggestions
        .iter()
        .map(|s| format!("'{}'", s))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", quoted)
}

/// Highlight every occurrence of `word` within `context`.
pub fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

pub fn print_check_summary(total_errors: usize, files: &[impl AsRef<Path>], colored: bool) {
    println!();
    if total_errors == 0 {
        if colored {
            println!("{}", "✓ No spelling errors found!".green().bold());
        } else {
            println!("✓ No spelling errors found!");
        }
    } else {
        let error_word = if total_errors == 1 {
            "misspelling"
        } else {
            "misspellings"
        };
        let file_word = if files.len() == 1 { "file" } else { "files" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_errors.to_string().red().bold(),
                error_word,
                files.len(),
                file_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_errors,
                error_word,
                files.len(),
                file_word
            );
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, written: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections made.".green().bold());
        } else {
            println!("No corrections made.");
        }
        return;
    }

    let fix_word = if total_fixed == 1 {
        "correction"
    } else {
        "corrections"
    };
    let file_word = if written == 1 { "file" } else { "files" };
    if colored {
        println!(
            "{} {} {}, {} {} written",
            "✓".green().bold(),
            total_fixed.to_string().green().bold(),
            fix_word,
            written,
            file_word
        );
    } else {
        println!("✓ {} {}, {} {} written", total_fixed, fix_word, written, file_word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_plain_diagnostic_line() {
        let file = PathBuf::from("fix_spellcheck.py");
        let suggestions = vec!["typo".to_string(), "tyro".to_string()];
        let diagnostic = Diagnostic {
            file: Some(&file),
            line: Some(2),
            extra: &[],
            word: "tpyo",
            suggestions: &suggestions,
        };
        assert_eq!(
            diagnostic.to_line(false),
            "fix_spellcheck.py:2 - tpyo ==> ['typo', 'tyro']"
        );
    }

    #[test]
    fn test_diagnostic_with_extra_context_and_no_line() {
        let extra = vec![("kind".to_string(), "comment".to_string())];
        let diagnostic = Diagnostic {
            file: None,
            line: None,
            extra: &extra,
            word: "tpyo",
            suggestions: &[],
        };
        assert_eq!(diagnostic.to_line(false), "kind:comment - tpyo ==> []");
    }

    #[test]
    fn test_colored_diagnostic_resets_after_each_span() {
        colored::control::set_override(true);
        let suggestions = vec!["typo".to_string()];
        let diagnostic = Diagnostic {
            file: None,
            line: None,
            extra: &[],
            word: "tpyo",
            suggestions: &suggestions,
        };
        assert_eq!(
            diagnostic.to_line(true),
            "\u{1b}[31mtpyo\u{1b}[0m ==> \u{1b}[32m['typo']\u{1b}[0m"
        );
    }

    #[test]
    fn test_json_diagnostic() {
        let file = PathBuf::from("a.py");
        let suggestions = vec!["typo".to_string()];
        let diagnostic = Diagnostic {
            file: Some(&file),
            line: Some(3),
            extra: &[],
            word: "tpyo",
            suggestions: &suggestions,
        };
        let mut out = Vec::new();
        write_diagnostic(&mut out, &diagnostic, OutputFormat::Json, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["file"], "a.py");
        assert_eq!(value["line"], 3);
        assert_eq!(value["word"], "tpyo");
        assert_eq!(value["suggestions"][0], "typo");
        assert!(value.get("context").is_none());
    }

    #[test]
    fn test_format_suggestions() {
        assert_eq!(format_suggestions(&[]), "[]");
        assert_eq!(
            format_suggestions(&["a".to_string(), "b".to_string()]),
            "['a', 'b']"
        );
    }
}
