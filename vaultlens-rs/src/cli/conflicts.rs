//! Sync-conflict and numbered-copy commands.

use crate::analytics::{find_obsidian_copies, find_sync_conflicts, ObsidianCopy, SyncConflictFile};
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConflictsOutput {
    pub count: usize,
    pub conflicts: Vec<SyncConflictFile>,
}

#[derive(Debug, Serialize)]
pub struct CopiesOutput {
    pub count: usize,
    pub copies: Vec<ObsidianCopy>,
}

/// Print conflict files left behind by sync services.
pub fn conflicts(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let conflicts = find_sync_conflicts(&records);

    output.print(&ConflictsOutput {
        count: conflicts.len(),
        conflicts,
    })?;
    Ok(ExitCode::Success)
}

/// Print numbered copies of existing notes.
pub fn copies(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let copies = find_obsidian_copies(&records);

    output.print(&CopiesOutput {
        count: copies.len(),
        copies,
    })?;
    Ok(ExitCode::Success)
}
