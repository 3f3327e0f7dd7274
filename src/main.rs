use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use console::Term;
use log::warn;
use srcspell::checker::{DialoguerPrompt, InteractiveChecker, ReportingChecker};
use srcspell::cli::output::{self, OutputFormat};
use srcspell::config::{Config, Overrides};
use srcspell::engine::FilterKind;
use srcspell::{dict, walk};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "srcspell")]
#[command(version, about = "Spellcheck comments and string literals in source code", long_about = None)]
struct Cli {
    /// Files or directories to check
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Prompt for a correction of every misspelling
    #[arg(short, long)]
    interactive: bool,

    /// Write corrected files back to disk
    #[arg(short, long, requires = "interactive")]
    write: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if misspellings are found
    #[arg(long)]
    no_fail: bool,

    /// Language/dictionary to use (e.g., en_US, en_GB) [default: en_US]
    #[arg(short, long, env = "SRCSPELL_LANGUAGE")]
    language: Option<String>,

    /// Personal word list file
    #[arg(long, value_name = "FILE")]
    pwl: Option<PathBuf>,

    /// Extra directory to search for Hunspell dictionaries
    #[arg(long, value_name = "DIR")]
    dict_dir: Vec<PathBuf>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Built-in filter to enable (email, url, shebang); replaces the configured set
    #[arg(long = "filter", value_name = "FILTER")]
    filters: Vec<FilterKind>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List available dictionaries
    List,
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "srcspell", &mut io::stdout());
        return Ok(());
    }

    let overrides = Overrides {
        language: cli.language.clone(),
        personal_word_list: cli.pwl.clone(),
        dictionary_dirs: cli.dict_dir.clone(),
        ignore_patterns: cli.ignore_pattern.clone(),
        filters: (!cli.filters.is_empty()).then(|| cli.filters.clone()),
    };

    if let Some(command) = cli.command {
        let config = Config::load(overrides)?;
        return handle_command(command, &config);
    }

    if cli.paths.is_empty() {
        anyhow::bail!("No paths specified. Use --help for usage information.");
    }

    let config = Config::load(overrides)?;
    let files = walk::collect_files(&cli.paths);
    if files.is_empty() {
        anyhow::bail!("No source files to check.");
    }

    let speller = srcspell::speller_from_config(&config)?;
    let colored = !cli.no_color && Term::stdout().features().is_attended();
    if !colored {
        colored::control::set_override(false);
    }

    if cli.interactive {
        let mut checker =
            InteractiveChecker::new(speller, DialoguerPrompt::new(colored), files.clone());
        let mut written = 0;
        let mut unsaved = 0;

        for file in &files {
            let outcome = walk::process_file(file, &mut checker, cli.write)?;
            if outcome.written {
                written += 1;
            } else if outcome.changed > 0 {
                unsaved += 1;
            }
            if checker.has_quit() {
                break;
            }
        }

        output::print_fix_summary(checker.corrected(), written, colored);
        if unsaved > 0 {
            warn!(
                "corrections in {} file(s) were not saved; pass --write to keep them",
                unsaved
            );
        }
        return Ok(());
    }

    let mut checker = ReportingChecker::new(speller, files.clone(), cli.format, colored);
    for file in &files {
        walk::process_file(file, &mut checker, false)?;
    }

    if cli.format == OutputFormat::Text {
        output::print_check_summary(checker.reported(), &files, colored);
    }

    // Exit with appropriate code
    if checker.reported() > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("warn,srcspell={}", level)),
    )
    .init();
}

fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries(&config.dictionary_dirs)?;
            }
            DictCommands::Info { language } => {
                dict::manager::show_info(&language, &config.dictionary_dirs)?;
            }
        },
    }
    Ok(())
}
