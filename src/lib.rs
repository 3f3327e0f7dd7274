pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod engine;
pub mod error;
pub mod fixer;
pub mod tree;
pub mod walk;

pub use checker::{Check, CheckContext, Fragment, InteractiveChecker, ReportingChecker};
pub use config::Config;
pub use engine::{Dictionary, Speller, Tokenizer};
pub use error::{Error, Result};
pub use fixer::Fixer;
pub use tree::{SourceLang, SourceTree};

/// Build the spelling engine described by `config`: dictionary, personal
/// word list and filter chain.
pub fn speller_from_config(config: &Config) -> Result<Speller> {
    let mut dictionary = Dictionary::load(&config.language, &config.dictionary_dirs)?;
    if let Some(pwl) = &config.personal_word_list {
        dictionary = dictionary.with_personal_word_list(pwl)?;
    }
    log::debug!(
        "filters: {}",
        config
            .filters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    let tokenizer = Tokenizer::from_config(&config.filters, &config.ignore_patterns);
    Ok(Speller::new(dictionary, tokenizer, config.max_suggestions))
}
