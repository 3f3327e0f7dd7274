//! The spelling engine: a Hunspell dictionary, a filtering tokenizer and
//! checking sessions over blobs of text.

pub mod dictionary;
pub mod filters;
pub mod tokenizer;

pub use dictionary::Dictionary;
pub use filters::{Filter, FilterKind};
pub use tokenizer::{Tokenizer, Word};

/// A flagged word with its ranked suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misspelling {
    pub word: String,
    /// Byte offset of `word` within the checked text.
    pub offset: usize,
    pub suggestions: Vec<String>,
}

pub struct Speller {
    dictionary: Dictionary,
    tokenizer: Tokenizer,
    max_suggestions: usize,
}

impl Speller {
    pub fn new(dictionary: Dictionary, tokenizer: Tokenizer, max_suggestions: usize) -> Self {
        Self {
            dictionary,
            tokenizer,
            max_suggestions,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    /// Every word of `text` the dictionary rejects, in text order.
    pub fn misspellings(&self, text: &str) -> Vec<Misspelling> {
        self.tokenizer
            .words(text)
            .into_iter()
            .filter(|w| !self.dictionary.check(w.text))
            .map(|w| Misspelling {
                word: w.text.to_string(),
                offset: w.offset,
                suggestions: self.dictionary.suggest(w.text, self.max_suggestions),
            })
            .collect()
    }

    pub fn session(&self, text: &str) -> Session {
        Session::new(text, self.misspellings(text))
    }
}

/// A text blob loaded for checking. Misspellings are found once, up front;
/// replacements are spliced into the text in order.
#[derive(Debug)]
pub struct Session {
    text: String,
    misspellings: Vec<Misspelling>,
    // Net byte growth from replacements applied so far.
    shift: isize,
}

impl Session {
    /// Load `text` with misspellings detected against it, or against a
    /// same-length normalised copy of it.
    pub fn new(text: &str, misspellings: Vec<Misspelling>) -> Self {
        Self {
            text: text.to_string(),
            misspellings,
            shift: 0,
        }
    }

    pub fn misspellings(&self) -> &[Misspelling] {
        &self.misspellings
    }

    /// Replace the word of `misspellings()[index]` with `replacement`.
    /// Replacements must be made in ascending index order.
    pub fn replace(&mut self, index: usize, replacement: &str) {
        let Some(m) = self.misspellings.get(index) else {
            return;
        };
        let start = (m.offset as isize + self.shift) as usize;
        let end = start + m.word.len();
        self.text.replace_range(start..end, replacement);
        self.shift += replacement.len() as isize - m.word.len() as isize;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dictionary::tests::test_dictionary;

    fn speller() -> Speller {
        Speller::new(
            test_dictionary(),
            Tokenizer::from_config(&FilterKind::ALL, &[]),
            5,
        )
    }

    #[test]
    fn test_clean_text_has_no_misspellings() {
        assert!(speller().misspellings("this is a typo").is_empty());
    }

    #[test]
    fn test_misspelling_records() {
        let found = speller().misspellings("this is a tpyo");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].word, "tpyo");
        assert_eq!(found[0].offset, 10);
        assert!(found[0].suggestions.contains(&"typo".to_string()));
    }

    #[test]
    fn test_session_replacements_shift_offsets() {
        let speller = speller();
        let mut session = speller.session("tpyo hello wrold tpyo");
        assert_eq!(session.misspellings().len(), 3);

        session.replace(0, "typo");
        session.replace(1, "world!!");
        session.replace(2, "x");
        assert_eq!(session.text(), "typo hello world!! x");
    }

    #[test]
    fn test_session_without_replacements_keeps_text() {
        let speller = speller();
        let session = speller.session("tpyo hello");
        assert_eq!(session.into_text(), "tpyo hello");
    }
}
