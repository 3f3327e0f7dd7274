use crate::checker::{normalize, Check, Fragment};
use crate::cli::output::{format_context, Diagnostic};
use crate::engine::{Misspelling, Session, Speller};
use crate::error::Result;
use colored::*;
use console::Term;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Input, Select};
use log::debug;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// What to do about one misspelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Replace(String),
    /// Replace this and every later occurrence of the word.
    ReplaceAlways(String),
    Ignore,
    IgnoreAlways,
    /// Accept the word and append it to the personal word list.
    Add,
    /// Stop prompting for the rest of the run.
    Quit,
}

/// Asks the user about a misspelling.
pub trait Prompt {
    /// `location` is the `file:line` of the word when known; `context` is
    /// the source line it sits on.
    fn decide(
        &mut self,
        misspelling: &Misspelling,
        location: Option<&str>,
        context: &str,
    ) -> Result<Decision>;
}

/// Console prompt on stderr.
pub struct DialoguerPrompt {
    colored: bool,
    term: Term,
}

impl DialoguerPrompt {
    pub fn new(colored: bool) -> Self {
        Self {
            colored,
            term: Term::stderr(),
        }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colored {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn ask_replacement(&self, theme: &dyn Theme, prompt: &str, initial: &str) -> Result<String> {
        let replacement = Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .interact_text_on(&self.term)?;
        Ok(replacement)
    }
}

const ACTIONS: [&str; 6] = [
    "Replace with...",
    "Replace always with...",
    "Ignore",
    "Ignore always",
    "Add to personal word list",
    "Quit",
];

impl Prompt for DialoguerPrompt {
    fn decide(
        &mut self,
        misspelling: &Misspelling,
        location: Option<&str>,
        context: &str,
    ) -> Result<Decision> {
        let location = location.unwrap_or("");
        if self.colored {
            self.term.write_line(&format!(
                "\n{} {}",
                "Misspelling found:".yellow().bold(),
                location.blue()
            ))?;
        } else {
            self.term
                .write_line(&format!("\nMisspelling found: {}", location))?;
        }
        self.term.write_line(&format!(
            "  {}",
            format_context(context.trim_end(), &misspelling.word, self.colored)
        ))?;

        let theme = self.theme();
        let mut items: Vec<String> = misspelling
            .suggestions
            .iter()
            .map(|s| format!("Replace with \"{}\"", s))
            .collect();
        items.extend(ACTIONS.iter().map(|a| a.to_string()));

        let suggestions = misspelling.suggestions.len();
        let default = if suggestions == 0 { suggestions + 2 } else { 0 };
        let choice = Select::with_theme(theme.as_ref())
            .with_prompt(misspelling.word.as_str())
            .items(&items)
            .default(default)
            .interact_on(&self.term)?;

        if choice < suggestions {
            return Ok(Decision::Replace(misspelling.suggestions[choice].clone()));
        }

        let initial = misspelling
            .suggestions
            .first()
            .map(String::as_str)
            .unwrap_or(&misspelling.word);
        let decision = match choice - suggestions {
            0 => Decision::Replace(self.ask_replacement(theme.as_ref(), "Replace with", initial)?),
            1 => Decision::ReplaceAlways(self.ask_replacement(
                theme.as_ref(),
                "Always replace with",
                initial,
            )?),
            2 => Decision::Ignore,
            3 => Decision::IgnoreAlways,
            4 => Decision::Add,
            _ => Decision::Quit,
        };
        Ok(decision)
    }
}

/// Walks the user through every misspelling and returns the corrected text.
pub struct InteractiveChecker<P = DialoguerPrompt> {
    speller: Speller,
    prompt: P,
    files: Vec<PathBuf>,
    replace_always: HashMap<String, String>,
    ignore_always: HashSet<String>,
    quit: bool,
    corrected: usize,
}

impl<P: Prompt> InteractiveChecker<P> {
    pub fn new(speller: Speller, prompt: P, files: Vec<PathBuf>) -> Self {
        Self {
            speller,
            prompt,
            files,
            replace_always: HashMap::new(),
            ignore_always: HashSet::new(),
            quit: false,
            corrected: 0,
        }
    }

    /// Number of replacements made so far.
    pub fn corrected(&self) -> usize {
        self.corrected
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn speller(&self) -> &Speller {
        &self.speller
    }
}

impl<P: Prompt> Check for InteractiveChecker<P> {
    fn check(&mut self, fragment: &Fragment<'_>) -> Result<String> {
        if self.quit {
            return Ok(fragment.text.to_string());
        }

        let normalized = normalize(fragment.text);
        let mut session = Session::new(fragment.text, self.speller.misspellings(&normalized));
        let file = fragment
            .context
            .file
            .or_else(|| self.files.first().map(PathBuf::as_path));

        for index in 0..session.misspellings().len() {
            let misspelling = session.misspellings()[index].clone();
            let word = misspelling.word.as_str();

            // Earlier answers in this run may already cover the word.
            if self.ignore_always.contains(word) || self.speller.dictionary().check(word) {
                continue;
            }
            if let Some(replacement) = self.replace_always.get(word) {
                session.replace(index, replacement);
                self.corrected += 1;
                continue;
            }

            let location = Diagnostic {
                file,
                line: fragment.line_of(misspelling.offset),
                extra: &fragment.context.extra,
                word,
                suggestions: &misspelling.suggestions,
            }
            .location();
            let context = line_around(fragment.text, misspelling.offset);

            match self
                .prompt
                .decide(&misspelling, location.as_deref(), context)?
            {
                Decision::Replace(replacement) => {
                    if replacement != word {
                        session.replace(index, &replacement);
                        self.corrected += 1;
                    }
                }
                Decision::ReplaceAlways(replacement) => {
                    if replacement != word {
                        session.replace(index, &replacement);
                        self.corrected += 1;
                    }
                    self.replace_always.insert(word.to_string(), replacement);
                }
                Decision::Ignore => {}
                Decision::IgnoreAlways => {
                    self.ignore_always.insert(word.to_string());
                }
                Decision::Add => {
                    debug!("adding '{}' to the personal word list", word);
                    self.speller.dictionary_mut().add_to_personal(word)?;
                }
                Decision::Quit => {
                    self.quit = true;
                    break;
                }
            }
        }

        Ok(session.into_text())
    }
}

/// The line of `text` containing byte `offset`.
fn line_around(text: &str, offset: usize) -> &str {
    let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len());
    &text[start..end]
}
