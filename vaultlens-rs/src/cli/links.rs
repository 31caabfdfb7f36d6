//! Link graph command.

use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::graph::{analyze_links, count_broken_links, LinkAnalysis};
use crate::vault::Vault;
use serde::Serialize;

/// Output for the links command.
#[derive(Debug, Serialize)]
pub struct LinksOutput {
    #[serde(flatten)]
    pub analysis: LinkAnalysis,
    pub broken_links: usize,
}

/// Print the link analysis, listing at most `limit` central notes.
pub fn links(vault: &Vault, limit: usize, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let mut analysis = analyze_links(&records);
    analysis.central_files.truncate(limit);

    output.print(&LinksOutput {
        analysis,
        broken_links: count_broken_links(&records),
    })?;
    Ok(ExitCode::Success)
}
