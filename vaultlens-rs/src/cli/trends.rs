//! Trends command.

use crate::analytics::analyze_trends;
use crate::cli::output::Output;
use crate::config::TrendsConfig;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;

/// Print activity trends. Missing options fall back to the config.
pub fn trends(
    vault: &Vault,
    timespan: Option<&str>,
    granularity: Option<&str>,
    defaults: &TrendsConfig,
    output: &Output,
) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let analysis = analyze_trends(
        &records,
        timespan.unwrap_or(&defaults.timespan),
        granularity.unwrap_or(&defaults.granularity),
    );

    output.print(&analysis)?;
    Ok(ExitCode::Success)
}
