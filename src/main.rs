mod cli;
mod logging;
mod store;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chomsky::codec::render_rule;
use chomsky::{explain, Catalog, Grammar, Verdict};
use clap::Parser;
use itertools::Itertools;

use cli::{position_to_index, Cli, CliError, Command, InputPolicy};

// Numbered listing, the empty body printed as λ
fn show(grammar: &Grammar) -> String {
    let rules = grammar.rules().enumerate().map(|(i, rule)| {
        let body: &str = if rule.is_lambda() { "λ" } else { &rule.body };
        format!("{}. {} → {}", i + 1, rule.head, body)
    });

    let underline = "-".repeat(grammar.name().chars().count().max(1));
    [grammar.name().to_string(), underline].into_iter().chain(rules).join("\n")
}

fn describe(path: &Path, grammar: &Grammar, verdict: &Verdict, explain: bool) -> String {
    let summary = format!("{}: {} is {}", path.display(), grammar.name(), verdict.kind);
    if !explain {
        return summary;
    }

    let deciding_rule = verdict.position.and_then(|p| grammar.rule_at(p).map(|rule| (p, rule)));
    match deciding_rule {
        Some((position, rule)) => format!("{}\n  rule {} ({}): {}", summary, position + 1, render_rule(rule), verdict.reason),
        None => format!("{}\n  {}", summary, verdict.reason),
    }
}

// Files that fail to load are reported without stopping the others
fn classify_files(files: &[PathBuf], explain_verdicts: bool) -> (Vec<String>, Vec<CliError>) {
    let mut catalog = Catalog::new();
    let mut sources = Vec::new();
    let mut errors = Vec::new();

    for file in files {
        match store::read_grammar(file) {
            Ok(grammar) => sources.push((catalog.create(grammar), file)),
            Err(e) => errors.push(e),
        }
    }

    let report = sources
        .iter()
        .filter_map(|(id, file)| catalog.get(*id).map(|grammar| (file, grammar)))
        .map(|(file, grammar)| describe(file, grammar, &explain(grammar), explain_verdicts))
        .collect_vec();

    (report, errors)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let policy = InputPolicy {
        single_symbol_heads: cli.single_symbol_heads
    };

    match cli.command {
        Command::New { file, name, force } => {
            store::create_grammar(&file, &Grammar::new(name), force)
        }
        Command::Add { file, head, body } => {
            let rule = policy.rule(&head, &body)?;
            let grammar = store::update_grammar(&file, |g| Ok(g.add_rule(rule)?))?;
            println!("{}", show(&grammar));
            Ok(())
        }
        Command::Edit { file, position, head, body } => {
            let index = position_to_index(position)?;
            let rule = policy.rule(&head, &body)?;
            let grammar = store::update_grammar(&file, |g| Ok(g.replace_rule_at(index, rule)?))?;
            println!("{}", show(&grammar));
            Ok(())
        }
        Command::Remove { file, position } => {
            let index = position_to_index(position)?;
            let grammar = store::update_grammar(&file, |g| Ok(g.remove_rule_at(index)?))?;
            println!("{}", show(&grammar));
            Ok(())
        }
        Command::Show { file } => {
            println!("{}", show(&store::read_grammar(&file)?));
            Ok(())
        }
        Command::Classify { files, explain } => {
            let (report, mut errors) = classify_files(&files, explain);
            for line in report {
                println!("{}", line);
            }

            match errors.len() {
                0 => Ok(()),
                1 => Err(errors.remove(0)),
                _ => Err(CliError::Many(errors)),
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Still usable without logs
    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("{}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
