//! Vault-wide statistics and single-field analysis.

use crate::graph::find_orphans;
use crate::note::NoteRecord;
use crate::types::FrontmatterValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Aggregate statistics of a vault.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VaultStats {
    pub total_files: usize,
    pub files_with_frontmatter: usize,
    pub files_without_frontmatter: usize,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Number of notes carrying each frontmatter field.
    pub field_presence: BTreeMap<String, usize>,
    pub tag_distribution: BTreeMap<String, usize>,
    /// Per field, number of notes holding each value type.
    pub type_distribution: BTreeMap<String, BTreeMap<String, usize>>,
    pub total_links: usize,
    pub total_headings: usize,
    pub orphaned_files: Vec<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub oldest_file: Option<DateTime<Utc>>,
    /// Supplied by the caller; not computed here.
    pub broken_links_count: usize,
    /// Supplied by the caller; not computed here.
    pub duplicate_count: usize,
}

/// Compute statistics over a set of notes.
///
/// `broken_links_count` and `duplicate_count` are left at zero for the
/// caller to fill in.
pub fn compute_stats(files: &[NoteRecord]) -> VaultStats {
    let start = Instant::now();
    let mut stats = VaultStats {
        total_files: files.len(),
        ..Default::default()
    };

    for file in files {
        stats.total_size += file.raw_size;

        stats.last_modified = Some(match stats.last_modified {
            Some(t) => t.max(file.modified_at),
            None => file.modified_at,
        });
        stats.oldest_file = Some(match stats.oldest_file {
            Some(t) => t.min(file.modified_at),
            None => file.modified_at,
        });

        if file.has_frontmatter() {
            stats.files_with_frontmatter += 1;
        } else {
            stats.files_without_frontmatter += 1;
        }

        for (field, value) in &file.frontmatter {
            *stats.field_presence.entry(field.clone()).or_insert(0) += 1;
            *stats
                .type_distribution
                .entry(field.clone())
                .or_default()
                .entry(value.value_type().to_string())
                .or_insert(0) += 1;
        }

        for tag in file.tags() {
            *stats.tag_distribution.entry(tag).or_insert(0) += 1;
        }

        stats.total_links += file.links.len();
        stats.total_headings += file.headings.len();
    }

    stats.orphaned_files = find_orphans(files);

    tracing::debug!(
        files = stats.total_files,
        links = stats.total_links,
        elapsed = ?start.elapsed(),
        "vault stats"
    );
    stats
}

/// Usage of one frontmatter field across a vault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAnalysis {
    pub field: String,
    pub total_files: usize,
    pub files_with_field: usize,
    /// Percentage of notes carrying the field.
    pub coverage: f64,
    pub type_distribution: BTreeMap<String, usize>,
    /// Values by number of occurrences, most common first.
    pub value_distribution: Vec<ValueCount>,
    pub unique_values: usize,
}

/// Number of occurrences of one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Analyze how one frontmatter field is used.
///
/// Sequence values contribute each element to the value distribution.
pub fn analyze_field(files: &[NoteRecord], field: &str) -> FieldAnalysis {
    let mut files_with_field = 0;
    let mut type_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut values: HashMap<String, usize> = HashMap::new();

    for value in files.iter().filter_map(|f| f.field(field)) {
        files_with_field += 1;
        *type_distribution
            .entry(value.value_type().to_string())
            .or_insert(0) += 1;

        match value {
            FrontmatterValue::Sequence(items) => {
                for item in items {
                    *values.entry(item.to_string()).or_insert(0) += 1;
                }
            }
            other => *values.entry(other.to_string()).or_insert(0) += 1,
        }
    }

    let mut value_distribution: Vec<ValueCount> = values
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    value_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    let coverage = if files.is_empty() {
        0.0
    } else {
        files_with_field as f64 / files.len() as f64 * 100.0
    };

    FieldAnalysis {
        field: field.to_string(),
        total_files: files.len(),
        files_with_field,
        coverage,
        type_distribution,
        unique_values: value_distribution.len(),
        value_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Link;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<NoteRecord> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        vec![
            NoteRecord::parse("a.md", "---\ntitle: A\ntags: [rust, cli]\n---\n# A\nSee [[b]].")
                .with_links(vec![Link::wiki("b")])
                .with_modified_at(t0),
            NoteRecord::parse("b.md", "---\ntitle: B\ntags: rust\ndate: 2024-01-02\n---\n# B\n## Sub")
                .with_modified_at(t0 + Duration::days(5)),
            NoteRecord::parse("c.md", "---\ntitle: 3\n---\nbody")
                .with_modified_at(t0 + Duration::days(2)),
            NoteRecord::parse("d.md", "---\n---\nno frontmatter")
                .with_modified_at(t0 + Duration::days(1)),
        ]
    }

    #[test]
    fn test_frontmatter_counts() {
        let stats = compute_stats(&sample());
        assert_eq!(stats.total_files, 4);
        assert_eq!(stats.files_with_frontmatter, 3);
        assert_eq!(stats.files_without_frontmatter, 1);
    }

    #[test]
    fn test_distributions() {
        let stats = compute_stats(&sample());

        assert_eq!(stats.field_presence["title"], 3);
        assert_eq!(stats.field_presence["tags"], 2);
        assert_eq!(stats.tag_distribution["rust"], 2);
        assert_eq!(stats.tag_distribution["cli"], 1);
        assert_eq!(stats.type_distribution["title"]["string"], 2);
        assert_eq!(stats.type_distribution["title"]["number"], 1);
        assert_eq!(stats.type_distribution["tags"]["array"], 1);
        assert_eq!(stats.type_distribution["date"]["date"], 1);
    }

    #[test]
    fn test_totals_and_dates() {
        let files = sample();
        let stats = compute_stats(&files);
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        assert_eq!(stats.total_links, 1);
        assert_eq!(stats.total_headings, 3);
        assert_eq!(stats.total_size, files.iter().map(|f| f.raw_size).sum::<u64>());
        assert_eq!(stats.oldest_file, Some(t0));
        assert_eq!(stats.last_modified, Some(t0 + Duration::days(5)));
        assert_eq!(stats.orphaned_files, vec!["a.md", "c.md", "d.md"]);
        assert_eq!(stats.broken_links_count, 0);
    }

    #[test]
    fn test_empty_stats() {
        assert_eq!(compute_stats(&[]), VaultStats::default());
    }

    #[test]
    fn test_analyze_field() {
        let analysis = analyze_field(&sample(), "tags");
        assert_eq!(analysis.files_with_field, 2);
        assert_eq!(analysis.coverage, 50.0);
        assert_eq!(analysis.type_distribution["array"], 1);
        assert_eq!(analysis.type_distribution["string"], 1);
        assert_eq!(
            analysis.value_distribution,
            vec![
                ValueCount { value: "rust".to_string(), count: 2 },
                ValueCount { value: "cli".to_string(), count: 1 },
            ]
        );
        assert_eq!(analysis.unique_values, 2);
    }

    #[test]
    fn test_analyze_missing_field() {
        let analysis = analyze_field(&sample(), "nope");
        assert_eq!(analysis.files_with_field, 0);
        assert_eq!(analysis.coverage, 0.0);
        assert!(analysis.value_distribution.is_empty());

        assert_eq!(analyze_field(&[], "title").coverage, 0.0);
    }
}
