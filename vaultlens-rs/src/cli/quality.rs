//! Content quality command.

use crate::analytics::{analyze_content, ContentAnalysis};
use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;

/// Print the content analysis with notes ordered worst first.
///
/// `limit` of `None` lists every note.
pub fn quality(vault: &Vault, limit: Option<usize>, output: &Output) -> Result<ExitCode> {
    let records = vault.load_records()?;
    let mut analysis = analyze_content(&records);
    worst_first(&mut analysis, limit);

    output.print(&analysis)?;
    Ok(ExitCode::Success)
}

fn worst_first(analysis: &mut ContentAnalysis, limit: Option<usize>) {
    analysis.files.sort_by(|a, b| {
        a.overall_score
            .total_cmp(&b.overall_score)
            .then_with(|| a.path.cmp(&b.path))
    });
    if let Some(limit) = limit {
        analysis.files.truncate(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteRecord;

    #[test]
    fn test_worst_first() {
        let records = vec![
            NoteRecord::parse(
                "good.md",
                "---\ntitle: Good\nsummary: A note.\n---\nThe cat sat on the mat. [[other]]",
            ),
            NoteRecord::parse("bad.md", ""),
        ];
        let mut analysis = analyze_content(&records);
        worst_first(&mut analysis, Some(1));

        assert_eq!(analysis.files.len(), 1);
        assert_eq!(analysis.files[0].path, "bad.md");
        assert_eq!(analysis.total_files, 2);
    }
}
