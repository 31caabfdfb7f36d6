//! Per-note content quality scoring and vault-level content analysis.
//!
//! Every note gets five factor scores in `[0, 1]` (readability, link density,
//! completeness, atomicity and recency); the overall score is their mean.

use super::text::{count_sentences, count_syllables, count_words, strip_markdown, topic_coherence};
use crate::note::NoteRecord;
use crate::parser::count_level;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// Frontmatter fields accepted as a summary.
pub const SUMMARY_FIELDS: [&str; 4] = ["summary", "description", "abstract", "excerpt"];

/// Quality bucket of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl QualityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            QualityLevel::Excellent
        } else if score >= 0.75 {
            QualityLevel::Good
        } else if score >= 0.6 {
            QualityLevel::Fair
        } else if score >= 0.4 {
            QualityLevel::Poor
        } else {
            QualityLevel::Critical
        }
    }
}

/// Quality scores for a single note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileQualityScore {
    pub path: String,
    pub overall_score: f64,
    pub level: QualityLevel,
    pub readability: f64,
    pub link_density: f64,
    pub completeness: f64,
    pub atomicity: f64,
    pub recency: f64,
    pub word_count: usize,
    pub content_length: usize,
    pub link_count: usize,
    pub heading_count: usize,
    pub suggestions: Vec<String>,
}

/// Number of notes per quality bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QualityDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
    pub critical: usize,
}

impl QualityDistribution {
    fn add(&mut self, level: QualityLevel) {
        match level {
            QualityLevel::Excellent => self.excellent += 1,
            QualityLevel::Good => self.good += 1,
            QualityLevel::Fair => self.fair += 1,
            QualityLevel::Poor => self.poor += 1,
            QualityLevel::Critical => self.critical += 1,
        }
    }
}

/// Vault-wide content analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentAnalysis {
    pub total_files: usize,
    pub average_score: f64,
    pub average_content_length: f64,
    pub average_word_count: f64,
    pub distribution: QualityDistribution,
    /// One entry per input note, in input order.
    pub files: Vec<FileQualityScore>,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Analyze content quality relative to the current time.
pub fn analyze_content(files: &[NoteRecord]) -> ContentAnalysis {
    analyze_content_at(files, Utc::now())
}

/// Analyze content quality relative to `now`.
pub fn analyze_content_at(files: &[NoteRecord], now: DateTime<Utc>) -> ContentAnalysis {
    let start = Instant::now();
    let scores: Vec<FileQualityScore> = files.iter().map(|f| score_file(f, now)).collect();

    let mut distribution = QualityDistribution::default();
    for score in &scores {
        distribution.add(score.level);
    }

    let total_files = files.len();
    let (average_score, average_content_length, average_word_count) = if total_files == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = total_files as f64;
        (
            scores.iter().map(|s| s.overall_score).sum::<f64>() / n,
            scores.iter().map(|s| s.content_length).sum::<usize>() as f64 / n,
            scores.iter().map(|s| s.word_count).sum::<usize>() as f64 / n,
        )
    };

    let (issues, suggestions) =
        vault_findings(files, &scores, &distribution, average_word_count);

    tracing::debug!(
        files = total_files,
        average_score,
        elapsed = ?start.elapsed(),
        "content analysis"
    );

    ContentAnalysis {
        total_files,
        average_score,
        average_content_length,
        average_word_count,
        distribution,
        files: scores,
        issues,
        suggestions,
    }
}

/// Score one note.
pub fn score_file(file: &NoteRecord, now: DateTime<Utc>) -> FileQualityScore {
    let word_count = count_words(&file.body);
    let days = days_since(file.modified_at, now);

    let readability = readability_score(&file.body);
    let link_density = link_density_score(file.links.len(), word_count);
    let completeness = completeness_score(file, word_count);
    let atomicity = atomicity_score(file, word_count);
    let recency = recency_score(days);

    let overall_score = (readability + link_density + completeness + atomicity + recency) / 5.0;

    let mut score = FileQualityScore {
        path: file.relative_path.clone(),
        overall_score,
        level: QualityLevel::from_score(overall_score),
        readability,
        link_density,
        completeness,
        atomicity,
        recency,
        word_count,
        content_length: file.body.len(),
        link_count: file.links.len(),
        heading_count: file.headings.len(),
        suggestions: Vec::new(),
    };
    score.suggestions = file_suggestions(file, &score);
    score
}

/// Flesch reading ease of the prose, scaled to `[0, 1]`.
pub fn readability_score(body: &str) -> f64 {
    let text = strip_markdown(body);
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let sentences = count_sentences(&text).max(1) as f64;
    let word_count = words.len() as f64;
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let flesch =
        206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables as f64 / word_count);
    (flesch / 100.0).clamp(0.0, 1.0)
}

/// Score links per 100 words; 3 to 4 is optimal.
pub fn link_density_score(links: usize, words: usize) -> f64 {
    if words == 0 {
        return 0.0;
    }
    let x = links as f64 * 100.0 / words as f64;

    let score = if (3.0..=4.0).contains(&x) {
        1.0
    } else if (2.0..3.0).contains(&x) {
        0.8 + (x - 2.0) * 0.2
    } else if x > 4.0 && x <= 6.0 {
        1.0 - (x - 4.0) * 0.1
    } else if x > 6.0 {
        0.5
    } else if (1.0..2.0).contains(&x) {
        x * 0.4
    } else {
        0.0
    };
    score.min(1.0)
}

/// Score presence of a title, a summary and a reasonably sized body.
pub fn completeness_score(file: &NoteRecord, words: usize) -> f64 {
    let mut score: f64 = 0.0;
    if has_title(file) {
        score += 0.4;
    }
    if has_summary(file) {
        score += 0.3;
    }
    score += if words >= 50 {
        0.3
    } else if words >= 30 {
        0.2
    } else if words >= 15 {
        0.1
    } else {
        0.0
    };
    score.min(1.0)
}

/// Score how well a note sticks to a single idea.
pub fn atomicity_score(file: &NoteRecord, words: usize) -> f64 {
    let mut score: f64 = 1.0;
    if words > 500 {
        score -= (words - 500) as f64 / 1000.0;
    }

    let h1 = count_level(&file.headings, 1);
    if h1 > 1 {
        score -= 0.3 * (h1 - 1) as f64;
    }
    let h2 = count_level(&file.headings, 2);
    if h2 > 3 {
        score -= 0.1 * (h2 - 3) as f64;
    }

    (score * topic_coherence(&file.body)).clamp(0.0, 1.0)
}

/// Step function over the age of a note in days.
pub fn recency_score(days: i64) -> f64 {
    match days {
        ..=7 => 1.0,
        8..=30 => 0.9,
        31..=90 => 0.7,
        91..=150 => 0.5,
        151..=365 => 0.3,
        _ => 0.1,
    }
}

fn days_since(modified_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - modified_at).num_days().max(0)
}

fn has_title(file: &NoteRecord) -> bool {
    file.field("title").is_some_and(|v| !v.is_blank())
}

fn has_summary(file: &NoteRecord) -> bool {
    SUMMARY_FIELDS
        .iter()
        .any(|name| file.field(name).is_some_and(|v| !v.is_blank()))
}

fn file_suggestions(file: &NoteRecord, score: &FileQualityScore) -> Vec<String> {
    let mut suggestions = Vec::new();

    if score.readability < 0.4 {
        suggestions.push(
            "Use shorter sentences and simpler words to improve readability".to_string(),
        );
    }

    if score.link_density < 0.3 {
        suggestions.push("Add links to related notes".to_string());
    } else if score.link_density < 0.6 {
        suggestions.push("Aim for 3-4 links per 100 words".to_string());
    }

    if score.completeness < 0.7 {
        if !has_title(file) {
            suggestions.push("Add a title to the frontmatter".to_string());
        }
        if !has_summary(file) {
            suggestions.push("Add a summary or description to the frontmatter".to_string());
        }
        if score.word_count < 50 {
            suggestions.push("Expand the note body".to_string());
        }
    }

    if score.atomicity < 0.6 {
        if score.word_count > 500 {
            suggestions.push("Split this long note into smaller notes".to_string());
        } else {
            suggestions.push("Focus the note on a single topic".to_string());
        }
    }

    if score.recency < 0.5 {
        suggestions.push("Review this note; it has not been updated in a while".to_string());
    }

    if suggestions.is_empty() {
        suggestions.push("Note is in good shape".to_string());
    }
    suggestions
}

fn vault_findings(
    files: &[NoteRecord],
    scores: &[FileQualityScore],
    distribution: &QualityDistribution,
    average_word_count: f64,
) -> (Vec<String>, Vec<String>) {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();
    if files.is_empty() {
        return (issues, suggestions);
    }

    let n = files.len() as f64;
    let with_frontmatter = files.iter().filter(|f| f.has_frontmatter()).count() as f64;
    let with_headings = files.iter().filter(|f| !f.headings.is_empty()).count() as f64;
    let with_links = files.iter().filter(|f| !f.links.is_empty()).count() as f64;
    let low_quality = (distribution.poor + distribution.critical) as f64;

    if with_frontmatter / n < 0.5 {
        issues.push("Less than half of the notes have frontmatter".to_string());
        suggestions.push("Add frontmatter with a title and tags to your notes".to_string());
    }
    if with_headings / n < 1.0 / 3.0 {
        issues.push("Few notes use headings".to_string());
        suggestions.push("Structure longer notes with headings".to_string());
    }
    if with_links / n < 0.25 {
        issues.push("Few notes link to other notes".to_string());
        suggestions.push("Connect related notes with links".to_string());
    }
    if average_word_count < 100.0 {
        issues.push(format!(
            "Notes are short on average ({:.0} words)",
            average_word_count
        ));
        suggestions.push("Develop short notes into fuller explanations".to_string());
    }
    if low_quality / n > 0.25 {
        issues.push(format!(
            "{} of {} notes have poor or critical quality",
            distribution.poor + distribution.critical,
            scores.len()
        ));
        suggestions.push("Start by improving the lowest-scoring notes".to_string());
    }

    (issues, suggestions)
}
