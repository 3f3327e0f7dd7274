use crate::engine::FilterKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG_FILE: &str = ".srcspell.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub language: String,
    pub personal_word_list: Option<PathBuf>,

    /// Searched for `<language>.aff`/`<language>.dic` before the system
    /// Hunspell locations.
    pub dictionary_dirs: Vec<PathBuf>,
    pub filters: Vec<FilterKind>,
    pub ignore_patterns: Vec<String>,
    pub max_suggestions: usize,
}

fn default_language() -> String {
    "en_US".to_string()
}

fn default_filters() -> Vec<FilterKind> {
    FilterKind::ALL.to_vec()
}

fn default_max_suggestions() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            personal_word_list: None,
            dictionary_dirs: Vec::new(),
            filters: default_filters(),
            ignore_patterns: Vec::new(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

/// One config file as written on disk. Only the keys present in the file
/// are `Some`, so any of them overrides a lower-priority layer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ConfigFile {
    language: Option<String>,
    personal_word_list: Option<PathBuf>,
    dictionary_dirs: Option<Vec<PathBuf>>,
    filters: Option<Vec<FilterKind>>,
    ignore_patterns: Option<Vec<String>>,
    max_suggestions: Option<usize>,
}

/// Values given on the command line; `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub language: Option<String>,
    pub personal_word_list: Option<PathBuf>,
    pub dictionary_dirs: Vec<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub filters: Option<Vec<FilterKind>>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let global = Self::global_config_path();
        Self::load_from(global.as_deref(), Path::new(LOCAL_CONFIG_FILE), overrides)
    }

    pub fn load_from(global: Option<&Path>, local: &Path, overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                config = config.merge(Self::from_file(global_path)?);
            }
        }

        if local.exists() {
            debug!("loading local config {}", local.display());
            config = config.merge(Self::from_file(local)?);
        }

        if let Some(language) = overrides.language {
            config.language = language;
        }
        if let Some(pwl) = overrides.personal_word_list {
            config.personal_word_list = Some(pwl);
        }
        if !overrides.dictionary_dirs.is_empty() {
            let mut dirs = overrides.dictionary_dirs;
            dirs.append(&mut config.dictionary_dirs);
            config.dictionary_dirs = dirs;
        }
        if !overrides.ignore_patterns.is_empty() {
            config.ignore_patterns.extend(overrides.ignore_patterns);
        }
        if let Some(filters) = overrides.filters {
            config.filters = filters;
        }

        // Ensure personal word list file exists
        if let Some(path) = &config.personal_word_list {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .context("Failed to create personal word list directory")?;
            }
            if !path.exists() {
                fs::write(path, "").context("Failed to create personal word list file")?;
            }
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<ConfigFile> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn merge(mut self, other: ConfigFile) -> Self {
        if let Some(language) = other.language {
            self.language = language;
        }
        if other.personal_word_list.is_some() {
            self.personal_word_list = other.personal_word_list;
        }
        if let Some(dirs) = other.dictionary_dirs {
            self.dictionary_dirs = dirs;
        }
        if let Some(filters) = other.filters {
            self.filters = filters;
        }
        if let Some(patterns) = other.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(max) = other.max_suggestions {
            self.max_suggestions = max;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "srcspell").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "srcspell").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
