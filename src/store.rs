/*
    This module moves grammars between the codec and the filesystem
*/

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use chomsky::codec::{self, verify_encodable};
use chomsky::Grammar;
use tracing::{debug, info};

use crate::cli::CliError;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    move |e| CliError::Io(path.to_path_buf(), e)
}

// The whole file is read before anything is decoded
pub fn read_grammar(path: &Path) -> Result<Grammar, CliError> {
    let bytes = fs::read(path).map_err(io_error(path))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read grammar file");

    codec::decode(&bytes).map_err(|errors| {
        CliError::Format(errors.into_iter().map(|e| e.in_file(path)).collect())
    })
}

// Refuses grammars that would not read back the same
fn encode_checked(path: &Path, grammar: &Grammar) -> Result<Vec<u8>, CliError> {
    verify_encodable(grammar).map_err(|errors| {
        CliError::Unencodable(errors.into_iter().map(|e| e.in_file(path)).collect())
    })?;
    Ok(codec::encode(grammar))
}

pub fn write_grammar(path: &Path, grammar: &Grammar) -> Result<(), CliError> {
    let bytes = encode_checked(path, grammar)?;
    fs::write(path, bytes).map_err(io_error(path))?;
    info!(path = %path.display(), name = grammar.name(), rules = grammar.len(), "wrote grammar");
    Ok(())
}

// Without `force` the file is created atomically and never replaced
pub fn create_grammar(path: &Path, grammar: &Grammar, force: bool) -> Result<(), CliError> {
    if force {
        return write_grammar(path, grammar);
    }

    let bytes = encode_checked(path, grammar)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => CliError::Input(format!("{} already exists (use --force to overwrite)", path.display())),
            _ => CliError::Io(path.to_path_buf(), e),
        })?;
    file.write_all(&bytes).map_err(io_error(path))?;
    info!(path = %path.display(), name = grammar.name(), "created grammar");
    Ok(())
}

// Read, apply one edit, write back
pub fn update_grammar(path: &Path, edit: impl FnOnce(&Grammar) -> Result<Grammar, CliError>) -> Result<Grammar, CliError> {
    let grammar = read_grammar(path)?;
    let edited = edit(&grammar)?;
    write_grammar(path, &edited)?;
    Ok(edited)
}
