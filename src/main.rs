//! Newsprint - Main entrypoint.
//!
//! Loads configuration, initialises logging, optionally loads a keyword
//! file and runs one command against the trie.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newsprint_lib::config::{ConfigLoader, LogConfig, NewsprintConfig, ENV_PREFIX};
use newsprint_lib::error::{report_error, ErrorContext, NewsprintError, NewsprintResult};
use newsprint_lib::restoration::{ConsoleSink, FileSink, LineSink, RestorationMode};
use newsprint_lib::session::Session;
use tracing::info;

/// Command line arguments for newsprint.
#[derive(Parser, Debug)]
#[clap(name = "newsprint", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Keyword file (`word` or `word,frequency` per line) to build the trie from
    #[clap(short, long, value_parser)]
    keywords: Option<PathBuf>,

    /// Rewrite the keyword file after a mutation even if lines of it would be
    /// dropped or normalised
    #[clap(long)]
    force: bool,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Add a keyword (saved back to the keyword file)
    Add { word: String },

    /// Delete a keyword (saved back to the keyword file)
    Delete { word: String },

    /// Find a keyword
    Search { word: String },

    /// Display the trie, or write it to a file
    Display {
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Write all keywords with their frequencies to a file
    Export {
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },

    /// List every keyword matching a wildcard pattern
    Matches { pattern: String },

    /// Show the best keyword match for a wildcard pattern
    Best { pattern: String },

    /// List matches for a wildcard pattern with confidence scores
    Confidence {
        pattern: String,

        /// Only report the confidence of this candidate
        #[clap(long)]
        word: Option<String>,
    },

    /// Restore a defect text file
    Restore {
        /// Defect text file
        input: PathBuf,

        /// Use only the best match for each wildcard token
        #[clap(long, conflicts_with = "all")]
        best: bool,

        /// List every match for each wildcard token
        #[clap(long)]
        all: bool,

        /// Write the restored text here instead of the console
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },

    /// Set the stored frequency of a keyword (saved back to the keyword file)
    SetFrequency { word: String, frequency: u64 },

    /// List all keywords with their frequencies
    List {
        /// Print JSON instead of `word,frequency` lines
        #[clap(long)]
        json: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Delete { .. } | Command::SetFrequency { .. }
        )
    }
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log.level))
        .context("invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.context("failed to set global tracing subscriber")
}

fn print_lines<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        println!("{}", line.as_ref());
    }
}

fn restore(
    session: &Session,
    input: &Path,
    mode: Option<RestorationMode>,
    output: Option<&Path>,
) -> NewsprintResult<()> {
    let summary = match output {
        Some(path) => {
            let mut sink = FileSink::new(path);
            let summary = session.restore_into(input, mode, &mut sink)?;
            println!("Restored text successfully saved to '{}'.", path.display());
            summary
        }
        None => {
            let mut sink = ConsoleSink::stdout();
            println!("--- Restored Text ---");
            let summary = session.restore_into(input, mode, &mut sink as &mut dyn LineSink)?;
            println!("--- End of Text ---");
            summary
        }
    };

    if summary.unresolved > 0 {
        info!(unresolved = summary.unresolved, "Some tokens had no match");
    }
    Ok(())
}

fn run(session: &mut Session, command: Command) -> NewsprintResult<()> {
    match command {
        Command::Add { word } => println!("{}", session.add(&word)?),
        Command::Delete { word } => println!("{}", session.delete(&word)),
        Command::Search { word } => println!("{}", session.search(&word)),
        Command::Display { output: Some(path) } => println!("{}", session.write_tree(&path)?),
        Command::Display { output: None } => print_lines(session.display()),
        Command::Export { output } => println!("{}", session.write_keywords(&output)?),
        Command::Matches { pattern } => println!("{}", session.matches(&pattern)),
        Command::Best { pattern } => println!("{}", session.best(&pattern)),
        Command::Confidence {
            pattern,
            word: Some(word),
        } => println!("{}", session.word_confidence(&pattern, &word)?),
        Command::Confidence {
            pattern,
            word: None,
        } => print_lines(session.confidence(&pattern)),
        Command::Restore {
            input,
            best,
            all,
            output,
        } => {
            let mode = match (best, all) {
                (true, _) => Some(RestorationMode::Best),
                (_, true) => Some(RestorationMode::All),
                _ => None,
            };
            restore(session, &input, mode, output.as_deref())?;
        }
        Command::SetFrequency { word, frequency } => {
            println!("{}", session.set_frequency(&word, frequency))
        }
        Command::List { json: true } => {
            println!("{}", serde_json::to_string_pretty(&session.list())?)
        }
        Command::List { json: false } => print_lines(
            session
                .list()
                .into_iter()
                .map(|(word, frequency)| format!("{word},{frequency}")),
        ),
        Command::Validate | Command::GenConfig { .. } => {
            return Err(NewsprintError::Custom(
                "configuration commands are handled before the session starts".to_string(),
            ))
        }
    }
    Ok(())
}

fn gen_config(output: &Path) -> anyhow::Result<()> {
    let default_config = NewsprintConfig::default();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let toml = toml::to_string_pretty(&default_config).context("failed to serialize config")?;
    std::fs::write(output, toml)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Default configuration written to {}", output.display());
    Ok(())
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);
    let config = match (&args.command, config_loader.load()) {
        (Command::GenConfig { output }, _) => return gen_config(output),
        (Command::Validate, Ok(_)) => {
            println!("Configuration is valid");
            return Ok(());
        }
        (_, Ok(config)) => config,
        (_, Err(e)) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    // Initialize logging early to capture any startup errors
    init_logging(&config.log)?;
    newsprint_lib::init();

    let mut session = Session::new(config);
    if let Some(path) = &args.keywords {
        match session.load_keywords(path) {
            Ok(report) => {
                println!(
                    "Keywords loaded from file '{}' ({} loaded, {} skipped).",
                    path.display(),
                    report.loaded,
                    report.skipped.len()
                );
                for skipped in &report.skipped {
                    eprintln!(
                        "warning: line {} '{}' skipped: {}",
                        skipped.line_number, skipped.content, skipped.reason
                    );
                }
                for line_number in &report.rewritten {
                    eprintln!(
                        "warning: line {line_number} case-folded or merged into an earlier entry"
                    );
                }
            }
            Err(e) => {
                let details = path.display().to_string();
                report_error(ErrorContext::new(e, "keywords").with_details(details));
                process::exit(1);
            }
        }
    }

    let mutates = args.command.mutates();
    if mutates {
        // A lossy keyword file is refused before any mutation runs
        if let Err(e) = session.check_save(args.force) {
            report_error(ErrorContext::new(e, "keywords"));
            process::exit(1);
        }
    }

    if let Err(e) = run(&mut session, args.command) {
        report_error(ErrorContext::new(e, "command"));
        process::exit(1);
    }

    if mutates {
        match session.save_keywords(args.force) {
            Ok(true) => info!("Keyword file updated"),
            Ok(false) => {}
            Err(e) => {
                report_error(ErrorContext::new(e, "keywords"));
                process::exit(1);
            }
        }
    }

    Ok(())
}
