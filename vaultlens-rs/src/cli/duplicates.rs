//! Duplicate detection commands.

use crate::analytics::{
    find_content_duplicates, find_duplicates, ContentDuplicate, Duplicate, MatchMode,
};
use crate::cli::args::MatchModeArg;
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;

/// Output for the duplicates command.
#[derive(Debug, Serialize)]
pub struct DuplicatesOutput {
    pub field: String,
    pub count: usize,
    pub groups: Vec<Duplicate>,
}

/// Output for the content-duplicates command.
#[derive(Debug, Serialize)]
pub struct ContentDuplicatesOutput {
    pub mode: MatchMode,
    pub count: usize,
    pub groups: Vec<ContentDuplicate>,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Exact => MatchMode::Exact,
            MatchModeArg::Similar => MatchMode::Similarity,
        }
    }
}

/// Print groups of notes sharing a frontmatter value.
pub fn duplicates(vault: &Vault, field: &str, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let groups = find_duplicates(&records, field);

    output.print(&DuplicatesOutput {
        field: field.to_string(),
        count: groups.len(),
        groups,
    })?;
    Ok(ExitCode::Success)
}

/// Print groups of notes with matching bodies.
pub fn content_duplicates(vault: &Vault, mode: MatchModeArg, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let mode = MatchMode::from(mode);
    let groups = find_content_duplicates(&records, mode);

    output.print(&ContentDuplicatesOutput {
        mode,
        count: groups.len(),
        groups,
    })?;
    Ok(ExitCode::Success)
}
