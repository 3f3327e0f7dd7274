use crate::engine::filters::{Filter, FilterKind, PatternFilter};
use unicode_segmentation::UnicodeSegmentation;

const STRIP_START: &[char] = &['"', '\'', '`', '(', '['];
const STRIP_END: &[char] = &['"', '\'', '`', ']', ')', '.', ':', ';', '!', '?', ','];

// Punctuation UAX #29 keeps inside a word ("snake_case", "e.g", "a:b").
const WORD_JOINERS: &[char] = &['_', '.', ':', ',', ';', '\u{b7}'];

/// A word candidate and its byte offset in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Scans text for words worth spellchecking.
///
/// Text is first cut into whitespace-delimited chunks with surrounding
/// punctuation stripped. Every filter is offered each chunk, and a chunk any
/// filter skips contributes no words at all. Surviving chunks are split on
/// Unicode word boundaries.
pub struct Tokenizer {
    filters: Vec<Box<dyn Filter>>,
}

impl Tokenizer {
    pub fn new(filters: Vec<Box<dyn Filter>>) -> Self {
        Self { filters }
    }

    /// Build the filter chain from the configured built-ins plus any
    /// user ignore patterns.
    pub fn from_config(kinds: &[FilterKind], ignore_patterns: &[String]) -> Self {
        let mut filters: Vec<Box<dyn Filter>> = kinds.iter().map(|k| k.build()).collect();
        let patterns = PatternFilter::new(ignore_patterns);
        if !patterns.is_empty() {
            filters.push(Box::new(patterns));
        }
        Self::new(filters)
    }

    pub fn words<'a>(&self, text: &'a str) -> Vec<Word<'a>> {
        let mut words = Vec::new();

        for (chunk_offset, chunk) in chunks(text) {
            let trimmed = chunk.trim_start_matches(STRIP_START);
            let lead = chunk.len() - trimmed.len();
            let stripped = trimmed.trim_end_matches(STRIP_END);
            if stripped.is_empty() || self.should_skip(stripped) {
                continue;
            }

            for (word_offset, word) in stripped.unicode_word_indices() {
                for (part_offset, part) in split_joined(word) {
                    if is_checkable(part) {
                        words.push(Word {
                            text: part,
                            offset: chunk_offset + lead + word_offset + part_offset,
                        });
                    }
                }
            }
        }

        words
    }

    fn should_skip(&self, chunk: &str) -> bool {
        self.filters.iter().any(|f| f.skip(chunk))
    }
}

fn chunks(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }

    if let Some(s) = start {
        out.push((s, &text[s..]));
    }

    out
}

fn split_joined(word: &str) -> Vec<(usize, &str)> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (i, ch) in word.char_indices() {
        if WORD_JOINERS.contains(&ch) {
            if i > start {
                parts.push((start, &word[start..i]));
            }
            start = i + ch.len_utf8();
        }
    }

    if start < word.len() {
        parts.push((start, &word[start..]));
    }

    parts
}

fn is_checkable(word: &str) -> bool {
    // Skip single characters
    if word.chars().count() <= 1 {
        return false;
    }
    if word.chars().any(|c| c.is_numeric()) {
        return false;
    }
    word.chars().any(|c| c.is_alphabetic())
}
