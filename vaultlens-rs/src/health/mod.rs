//! Vault health score.
//!
//! Combines a [`VaultStats`] snapshot into a single 0-100 score. Broken links
//! and duplicates are not detected here; the caller fills
//! `broken_links_count` and `duplicate_count` before scoring.

use crate::analytics::VaultStats;
use serde::Serialize;
use std::fmt;

/// Maximum penalty for notes without frontmatter.
pub const FRONTMATTER_WEIGHT: f64 = 30.0;
/// Maximum penalty for orphaned notes.
pub const ORPHAN_WEIGHT: f64 = 20.0;
/// Maximum penalty for broken links.
pub const BROKEN_LINK_WEIGHT: f64 = 25.0;
/// Penalty per duplicate group.
pub const DUPLICATE_PENALTY: f64 = 5.0;

/// Health bucket of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl HealthStatus {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            HealthStatus::Excellent
        } else if score >= 75.0 {
            HealthStatus::Good
        } else if score >= 60.0 {
            HealthStatus::Fair
        } else if score >= 40.0 {
            HealthStatus::Poor
        } else {
            HealthStatus::Critical
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "excellent"),
            HealthStatus::Good => write!(f, "good"),
            HealthStatus::Fair => write!(f, "fair"),
            HealthStatus::Poor => write!(f, "poor"),
            HealthStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Factors that lower the health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthFactor {
    MissingFrontmatter,
    Orphans,
    BrokenLinks,
    Duplicates,
}

impl fmt::Display for HealthFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthFactor::MissingFrontmatter => write!(f, "missing-frontmatter"),
            HealthFactor::Orphans => write!(f, "orphans"),
            HealthFactor::BrokenLinks => write!(f, "broken-links"),
            HealthFactor::Duplicates => write!(f, "duplicates"),
        }
    }
}

/// Points taken off by one factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Penalty {
    pub factor: HealthFactor,
    pub points: f64,
}

/// Overall vault health.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthScore {
    /// Score in `[0, 100]`.
    pub score: f64,
    pub status: HealthStatus,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    /// Non-zero penalties, in the order they were applied.
    pub penalties: Vec<Penalty>,
}

/// Score the health of a vault from its statistics.
pub fn calculate_health_score(stats: &VaultStats) -> HealthScore {
    let mut health = HealthScore {
        score: 100.0,
        status: HealthStatus::Excellent,
        issues: Vec::new(),
        suggestions: Vec::new(),
        penalties: Vec::new(),
    };
    let total = stats.total_files;

    if total > 0 && stats.files_without_frontmatter > 0 {
        let ratio = stats.files_without_frontmatter as f64 / total as f64;
        health.apply(
            HealthFactor::MissingFrontmatter,
            ratio * FRONTMATTER_WEIGHT,
            format!(
                "{} of {} notes have no frontmatter",
                stats.files_without_frontmatter, total
            ),
            "Add frontmatter to notes that lack it",
        );
    }

    let orphans = stats.orphaned_files.len();
    if total > 1 && orphans > 0 {
        let ratio = orphans as f64 / total as f64;
        health.apply(
            HealthFactor::Orphans,
            ratio * ORPHAN_WEIGHT,
            format!("{} of {} notes are orphaned", orphans, total),
            "Link orphaned notes from related notes or an index note",
        );
    }

    if stats.total_links > 0 && stats.broken_links_count > 0 {
        let ratio = (stats.broken_links_count as f64 / stats.total_links as f64).min(1.0);
        health.apply(
            HealthFactor::BrokenLinks,
            ratio * BROKEN_LINK_WEIGHT,
            format!(
                "{} of {} links are broken",
                stats.broken_links_count, stats.total_links
            ),
            "Fix or remove broken links",
        );
    }

    if stats.duplicate_count > 0 {
        health.apply(
            HealthFactor::Duplicates,
            stats.duplicate_count as f64 * DUPLICATE_PENALTY,
            format!("{} groups of duplicate notes", stats.duplicate_count),
            "Merge or delete duplicate notes",
        );
    }

    health.score = health.score.max(0.0);
    health.status = HealthStatus::from_score(health.score);

    tracing::debug!(score = health.score, status = %health.status, "health score");
    health
}

impl HealthScore {
    fn apply(&mut self, factor: HealthFactor, points: f64, issue: String, suggestion: &str) {
        self.score -= points;
        self.penalties.push(Penalty { factor, points });
        self.issues.push(issue);
        self.suggestions.push(suggestion.to_string());
    }

    /// Penalty applied for a factor, zero when it did not contribute.
    pub fn penalty(&self, factor: HealthFactor) -> f64 {
        self.penalties
            .iter()
            .filter(|p| p.factor == factor)
            .map(|p| p.points)
            .sum()
    }
}
