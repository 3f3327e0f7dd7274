use crate::error::{Error, Result};
use log::debug;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// System locations searched for Hunspell `<tag>.aff`/`<tag>.dic` pairs
/// after the configured directories.
const SYSTEM_DICT_DIRS: &[&str] = &[
    "/usr/share/hunspell",
    "/usr/share/myspell",
    "/usr/share/myspell/dicts",
    "/usr/local/share/hunspell",
    "/Library/Spelling",
];

/// A Hunspell dictionary selected by language tag, optionally composed with
/// a personal word list.
pub struct Dictionary {
    tag: String,
    inner: spellbook::Dictionary,
    personal_word_list: Option<PathBuf>,
}

impl Dictionary {
    /// Load the dictionary for `tag`, searching `dirs` first, then
    /// `$DICPATH`, the user data directory and the system locations.
    pub fn load(tag: &str, dirs: &[PathBuf]) -> Result<Self> {
        let searched = Self::search_dirs(dirs);
        let (aff, dic) = Self::find_in(tag, &searched).ok_or_else(|| Error::DictionaryNotFound {
            tag: tag.to_string(),
            searched: searched.clone(),
        })?;

        debug!("loading dictionary {} from {}", tag, dic.display());
        Self::load_from_paths(tag, &aff, &dic)
    }

    /// Load a dictionary from explicit affix and word files.
    pub fn load_from_paths(tag: &str, aff: &Path, dic: &Path) -> Result<Self> {
        let aff = fs::read_to_string(aff)?;
        let dic = fs::read_to_string(dic)?;
        Self::from_strings(tag, &aff, &dic)
    }

    pub fn from_strings(tag: &str, aff: &str, dic: &str) -> Result<Self> {
        let inner = spellbook::Dictionary::new(aff, dic).map_err(|e| Error::Dictionary {
            tag: tag.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            tag: tag.to_string(),
            inner,
            personal_word_list: None,
        })
    }

    /// Add every word of the personal word list at `path`. A missing file is
    /// treated as empty and created on the first `add_to_personal`.
    pub fn with_personal_word_list(mut self, path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|source| Error::PersonalWordList {
                path: path.to_path_buf(),
                source,
            })?;
            for line in content.lines() {
                let word = line.trim();
                if !word.is_empty() && !word.starts_with('#') {
                    self.add(word)?;
                }
            }
        }
        self.personal_word_list = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn personal_word_list(&self) -> Option<&Path> {
        self.personal_word_list.as_deref()
    }

    pub fn check(&self, word: &str) -> bool {
        self.inner.check(word)
    }

    /// Ranked suggestions for `word`, at most `max` of them.
    pub fn suggest(&self, word: &str, max: usize) -> Vec<String> {
        let mut suggestions = Vec::with_capacity(max);
        self.inner.suggest(word, &mut suggestions);
        suggestions.truncate(max);
        suggestions
    }

    /// Accept `word` for the rest of this session.
    pub fn add(&mut self, word: &str) -> Result<()> {
        self.inner.add(word).map_err(|e| Error::Dictionary {
            tag: self.tag.clone(),
            message: e.to_string(),
        })
    }

    /// Accept `word` and append it to the personal word list, when one is
    /// configured.
    pub fn add_to_personal(&mut self, word: &str) -> Result<()> {
        self.add(word)?;

        if let Some(path) = &self.personal_word_list {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| writeln!(file, "{}", word))
                .map_err(|source| Error::PersonalWordList {
                    path: path.clone(),
                    source,
                })?;
        }

        Ok(())
    }

    /// The ordered list of directories a dictionary lookup will search.
    pub fn search_dirs(extra: &[PathBuf]) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = extra.to_vec();

        if let Some(dicpath) = std::env::var_os("DICPATH") {
            dirs.extend(std::env::split_paths(&dicpath));
        }
        if let Some(data_dir) = crate::config::Config::data_dir() {
            dirs.push(data_dir);
        }
        if let Some(home) = directories::BaseDirs::new() {
            dirs.push(home.data_dir().join("hunspell"));
        }
        dirs.extend(SYSTEM_DICT_DIRS.iter().map(PathBuf::from));

        dirs.dedup();
        dirs
    }

    /// Locate the affix and word files for `tag` in `dirs`.
    pub fn find_in(tag: &str, dirs: &[PathBuf]) -> Option<(PathBuf, PathBuf)> {
        dirs.iter().find_map(|dir| {
            let aff = dir.join(format!("{}.aff", tag));
            let dic = dir.join(format!("{}.dic", tag));
            (aff.is_file() && dic.is_file()).then_some((aff, dic))
        })
    }
}
