use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no dictionary found for '{tag}' (searched: {})", display_dirs(.searched))]
    DictionaryNotFound { tag: String, searched: Vec<PathBuf> },

    #[error("failed to load dictionary '{tag}': {message}")]
    Dictionary { tag: String, message: String },

    #[error("personal word list {}: {source}", .path.display())]
    PersonalWordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {language} source: {message}")]
    Parser { language: String, message: String },

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    if dirs.is_empty() {
        return "<none>".to_string();
    }
    dirs.iter()
        .map(|d| d.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
