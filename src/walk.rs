use crate::checker::Check;
use crate::fixer::Fixer;
use crate::tree::{SourceLang, SourceTree};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Leaves whose text the checker changed.
    pub changed: usize,
    pub written: bool,
}

/// Expand `paths` into the files to check. Directories are walked honouring
/// ignore files and only yield files in a supported language; files named
/// explicitly are kept as given.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkBuilder::new(path)
                .sort_by_file_name(|a, b| a.cmp(b))
                .build();
            for entry in walker {
                match entry {
                    Ok(entry) => {
                        let is_file = entry.file_type().is_some_and(|t| t.is_file());
                        if is_file && SourceLang::from_path(entry.path()).is_some() {
                            files.push(entry.into_path());
                        }
                    }
                    Err(e) => warn!("{}", e),
                }
            }
        } else if path.exists() {
            files.push(path.clone());
        } else {
            warn!("File not found: {}", path.display());
        }
    }

    files
}

/// Parse `path`, run every leaf through `checker` and, with `write`, save
/// the file when a correction was made.
pub fn process_file(path: &Path, checker: &mut dyn Check, write: bool) -> Result<FileOutcome> {
    let Some(language) = SourceLang::from_path(path) else {
        warn!("skipping {}: unsupported file type", path.display());
        return Ok(FileOutcome::default());
    };

    info!("checking {} as {}", path.display(), language);
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let mut tree = SourceTree::parse(language, &source)
        .with_context(|| format!("Failed to parse file: {}", path.display()))?;

    let changed = Fixer::new(checker, Some(path)).run(&mut tree)?;

    let mut written = false;
    if changed > 0 && write {
        fs::write(path, tree.to_string())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        written = true;
    }

    Ok(FileOutcome { changed, written })
}
