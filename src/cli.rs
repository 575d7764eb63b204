use std::fmt::Display;
use std::path::PathBuf;

use chomsky::codec::{EncodeErrors, FormatErrors};
use chomsky::{ModelError, Rule};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Only accept rule heads that are a single letter
    #[arg(
        long,
        global = true,
        env = "CHOMSKY_SINGLE_SYMBOL_HEADS",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub single_symbol_heads: bool,

    /// Log more (-v for info, -vv for debug; RUST_LOG overrides)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a grammar file with no rules
    New {
        /// File to write the grammar to
        file: PathBuf,
        /// Name of the grammar
        name: String,
        /// Overwrite the file if it exists
        #[arg(short, long)]
        force: bool
    },

    /// Append a rule to a grammar
    Add {
        file: PathBuf,
        head: String,
        /// Right-hand side (`λ`, `ε` or "" for the empty string)
        body: String
    },

    /// Replace the rule at a position (starting at 1)
    Edit {
        file: PathBuf,
        #[arg(value_name = "POSITION")]
        position: usize,
        head: String,
        body: String
    },

    /// Remove the rule at a position (starting at 1)
    Remove {
        file: PathBuf,
        #[arg(value_name = "POSITION")]
        position: usize
    },

    /// Print a grammar with numbered rules
    Show {
        file: PathBuf
    },

    /// Report the Chomsky type of each grammar
    Classify {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Also print which rule decided the type and why
        #[arg(short, long)]
        explain: bool
    }
}

// Spellings of the empty body accepted on the command line
const LAMBDAS: [&str; 2] = ["λ", "ε"];

// How rules typed by the user are turned into model rules
#[derive(Debug, Clone, Copy, Default)]
pub struct InputPolicy {
    pub single_symbol_heads: bool
}

impl InputPolicy {
    pub fn rule(&self, head: &str, body: &str) -> Result<Rule, CliError> {
        if self.single_symbol_heads {
            let mut chars = head.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => {}
                _ => return Err(CliError::Input(format!("Head `{}` must be a single letter", head))),
            }
        }

        let body = if LAMBDAS.contains(&body) { "" } else { body };
        Ok(Rule::new(head, body))
    }
}

// Positions on the command line start at 1
pub fn position_to_index(position: usize) -> Result<usize, CliError> {
    position
        .checked_sub(1)
        .ok_or_else(|| CliError::Input("Rule positions start at 1".to_string()))
}

#[derive(Debug)]
pub enum CliError {
    // Reading or writing a grammar file failed
    Io(PathBuf, std::io::Error),
    // A grammar file could not be decoded
    Format(FormatErrors),
    // A grammar would not survive being written out
    Unencodable(EncodeErrors),
    // An edit broke a model rule
    Model(ModelError),
    // The command line asked for something that makes no sense
    Input(String),
    // Logging could not be set up
    Logging(String),
    // Several independent failures, e.g. one per file
    Many(Vec<CliError>),
}

impl From<ModelError> for CliError {
    fn from(error: ModelError) -> Self {
        CliError::Model(error)
    }
}

fn write_lines<T: Display>(f: &mut std::fmt::Formatter<'_>, items: &[T]) -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            CliError::Format(errors) => write_lines(f, errors),
            CliError::Unencodable(errors) => write_lines(f, errors),
            CliError::Model(e) => write!(f, "{}", e),
            CliError::Input(message) => write!(f, "{}", message),
            CliError::Logging(message) => write!(f, "Could not set up logging: {}", message),
            CliError::Many(errors) => write_lines(f, errors),
        }
    }
}

impl std::error::Error for CliError {}
