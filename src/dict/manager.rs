use crate::engine::Dictionary;
use crate::error::Error;
use anyhow::Result;
use colored::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct DictionaryInfo {
    pub language: String,
    pub aff: PathBuf,
    pub dic: PathBuf,
    pub word_count: usize,
    pub size_bytes: u64,
}

impl DictionaryInfo {
    pub fn read(language: &str, aff: PathBuf, dic: PathBuf) -> Result<Self> {
        let size_bytes = fs::metadata(&dic)?.len();
        Ok(Self {
            language: language.to_string(),
            word_count: count_words(&dic)?,
            aff,
            dic,
            size_bytes,
        })
    }
}

/// Every language with both an `.aff` and a `.dic` file in `dirs`. The first
/// directory providing a language wins, matching lookup order.
pub fn available(dirs: &[PathBuf]) -> Result<BTreeMap<String, (PathBuf, PathBuf)>> {
    let mut found = BTreeMap::new();

    for dir in dirs {
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("dic") {
                continue;
            }
            let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let aff = path.with_extension("aff");
            if aff.is_file() && !found.contains_key(language) {
                found.insert(language.to_string(), (aff, path.clone()));
            }
        }
    }

    Ok(found)
}

pub fn list_dictionaries(extra_dirs: &[PathBuf]) -> Result<()> {
    let dirs = Dictionary::search_dirs(extra_dirs);
    let found = available(&dirs)?;

    if found.is_empty() {
        println!("{}", "No dictionaries found.".yellow());
        println!(
            "Install a Hunspell dictionary (e.g. {}) or pass {}.",
            "hunspell-en-us".cyan(),
            "--dict-dir".cyan()
        );
    } else {
        println!("{}", "Available dictionaries:".bold());
        println!();
        for (language, (_, dic)) in &found {
            let size_kb = fs::metadata(dic).map(|m| m.len() / 1024).unwrap_or(0);
            println!(
                "  {} {} ({})",
                "✓".green(),
                language.cyan().bold(),
                format!("{}KB, {}", size_kb, dic.display()).dimmed()
            );
        }
    }

    println!();
    println!("{}", "Search path:".bold());
    for dir in &dirs {
        println!("  {}", dir.display().to_string().dimmed());
    }

    Ok(())
}

pub fn show_info(language: &str, extra_dirs: &[PathBuf]) -> Result<()> {
    let dirs = Dictionary::search_dirs(extra_dirs);
    let Some((aff, dic)) = Dictionary::find_in(language, &dirs) else {
        return Err(Error::DictionaryNotFound {
            tag: language.to_string(),
            searched: dirs,
        }
        .into());
    };

    let info = DictionaryInfo::read(language, aff, dic)?;
    println!("{}", format!("Dictionary: {}", info.language).bold());
    println!();
    println!("  Affix file: {}", info.aff.display().to_string().dimmed());
    println!("  Word file:  {}", info.dic.display().to_string().dimmed());
    println!("  Size:       {} KB", info.size_bytes / 1024);
    println!("  Words:      {}", info.word_count);

    Ok(())
}

/// Hunspell `.dic` files open with an approximate entry count; count the
/// entries themselves instead.
fn count_words(dic: &Path) -> Result<usize> {
    let content = fs::read_to_string(dic)?;
    Ok(content
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_available_requires_both_files() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        fs::write(first.path().join("en_US.aff"), "SET UTF-8\n").unwrap();
        fs::write(first.path().join("en_US.dic"), "2\nfoo\nbar\n").unwrap();
        fs::write(first.path().join("de_DE.dic"), "1\nhallo\n").unwrap();
        fs::write(second.path().join("en_US.aff"), "SET UTF-8\n").unwrap();
        fs::write(second.path().join("en_US.dic"), "1\nbaz\n").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = available(&dirs).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found["en_US"].1, first.path().join("en_US.dic"));
    }

    #[test]
    fn test_dictionary_info() {
        let dir = tempdir().unwrap();
        let aff = dir.path().join("en_TEST.aff");
        let dic = dir.path().join("en_TEST.dic");
        fs::write(&aff, "SET UTF-8\n").unwrap();
        fs::write(&dic, "3\nfoo\nbar/S\n\nbaz\n").unwrap();

        let info = DictionaryInfo::read("en_TEST", aff, dic).unwrap();
        assert_eq!(info.word_count, 3);
        assert_eq!(info.language, "en_TEST");
        assert!(info.size_bytes > 0);
    }

    #[test]
    fn test_show_info_missing_dictionary_fails() {
        let dir = tempdir().unwrap();
        let err = show_info("zz_NOPE", &[dir.path().to_path_buf()]).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("no dictionary found for 'zz_NOPE'"));
    }
}
