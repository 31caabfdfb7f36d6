//! Stats, field and health commands.

use crate::analytics::{
    analyze_field, compute_stats, find_content_duplicates, MatchMode, VaultStats,
};
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::graph::count_broken_links;
use crate::health::calculate_health_score;
use crate::note::NoteRecord;
use crate::vault::Vault;

/// Compute vault statistics with broken links and duplicate groups filled in.
pub fn collect_stats(records: &[NoteRecord]) -> VaultStats {
    let mut stats = compute_stats(records);
    stats.broken_links_count = count_broken_links(records);
    stats.duplicate_count = find_content_duplicates(records, MatchMode::Exact).len();
    stats
}

/// Print vault statistics.
pub fn stats(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    output.print(&collect_stats(&records))?;
    Ok(ExitCode::Success)
}

/// Print usage of one frontmatter field.
pub fn fields(vault: &Vault, field: &str, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let analysis = analyze_field(&records, field);
    if analysis.files_with_field == 0 {
        output.warn(&format!("no note has a '{}' field", field));
    }
    output.print(&analysis)?;
    Ok(ExitCode::Success)
}

/// Print the health score. Fails when it is below `fail_below`.
pub fn health(vault: &Vault, fail_below: Option<f64>, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let health = calculate_health_score(&collect_stats(&records));
    output.print(&health)?;

    match fail_below {
        Some(threshold) if health.score < threshold => {
            output.info(&format!(
                "Health score {:.1} is below {:.1}",
                health.score, threshold
            ));
            Ok(ExitCode::GeneralError)
        }
        _ => Ok(ExitCode::Success),
    }
}
