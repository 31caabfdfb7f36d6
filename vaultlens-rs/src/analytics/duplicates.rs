//! Duplicate detection: shared frontmatter values, identical bodies and
//! near-identical bodies.

use crate::note::NoteRecord;
use crate::types::FrontmatterValue;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// Jaccard similarity above which two bodies count as near-duplicates.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Files sharing the same (normalized) value for a frontmatter field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Duplicate {
    pub field: String,
    /// The first-seen original value of the group.
    pub value: FrontmatterValue,
    pub files: Vec<String>,
    pub count: usize,
}

/// Files sharing identical or near-identical body content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDuplicate {
    /// MD5 of the shared body (of the anchor body for similarity groups).
    pub hash: String,
    pub files: Vec<String>,
    pub count: usize,
    /// Lowest anchor-to-member similarity, for similarity groups only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// How bodies are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Byte-identical bodies (MD5).
    #[default]
    Exact,
    /// Word-set Jaccard similarity above [`SIMILARITY_THRESHOLD`].
    Similarity,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "similar" | "similarity" => Ok(MatchMode::Similarity),
            _ => Err(format!("Invalid match mode: {}", s)),
        }
    }
}

/// Group files whose value for `field` is the same after normalization.
///
/// Strings compare trimmed and lowercased; sequences compare as the sorted,
/// lowercased set of their elements; other values compare as-is. Files
/// without the field are ignored. Groups are sorted by size, largest first,
/// keeping first-seen order among equal sizes.
pub fn find_duplicates(files: &[NoteRecord], field: &str) -> Vec<Duplicate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (FrontmatterValue, Vec<String>)> = HashMap::new();

    for file in files {
        let Some(value) = file.field(field) else {
            continue;
        };
        let key = normalize_value(value);

        groups
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                (value.clone(), Vec::new())
            })
            .1
            .push(file.relative_path.clone());
    }

    let mut duplicates: Vec<Duplicate> = order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .filter(|(_, paths)| paths.len() >= 2)
        .map(|(value, files)| Duplicate {
            field: field.to_string(),
            value,
            count: files.len(),
            files,
        })
        .collect();

    duplicates.sort_by(|a, b| b.count.cmp(&a.count));
    tracing::debug!(field, groups = duplicates.len(), "field duplicates");
    duplicates
}

/// Group files by body content.
pub fn find_content_duplicates(files: &[NoteRecord], mode: MatchMode) -> Vec<ContentDuplicate> {
    let duplicates = match mode {
        MatchMode::Exact => exact_duplicates(files),
        MatchMode::Similarity => similar_duplicates(files),
    };
    tracing::debug!(?mode, groups = duplicates.len(), "content duplicates");
    duplicates
}

fn exact_duplicates(files: &[NoteRecord]) -> Vec<ContentDuplicate> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();

    for file in files {
        let hash = body_hash(&file.body);
        groups
            .entry(hash.clone())
            .or_insert_with(|| {
                order.push(hash);
                Vec::new()
            })
            .push(file.relative_path.clone());
    }

    let mut duplicates: Vec<ContentDuplicate> = order
        .into_iter()
        .filter_map(|hash| groups.remove(&hash).map(|files| (hash, files)))
        .filter(|(_, files)| files.len() >= 2)
        .map(|(hash, files)| ContentDuplicate {
            hash,
            count: files.len(),
            files,
            similarity: None,
        })
        .collect();

    duplicates.sort_by(|a, b| b.count.cmp(&a.count));
    duplicates
}

/// Anchor-centric near-duplicate grouping.
///
/// Each file anchors a group holding every later file whose similarity to
/// it exceeds the threshold. Groups are not merged transitively, so a file
/// can appear in several groups.
fn similar_duplicates(files: &[NoteRecord]) -> Vec<ContentDuplicate> {
    let word_sets: Vec<HashSet<String>> = files.iter().map(|f| word_set(&f.body)).collect();
    let mut duplicates = Vec::new();

    for i in 0..files.len() {
        let mut members = vec![files[i].relative_path.clone()];
        let mut lowest = 1.0_f64;

        for j in (i + 1)..files.len() {
            let similarity = jaccard_similarity(&word_sets[i], &word_sets[j]);
            if similarity > SIMILARITY_THRESHOLD {
                members.push(files[j].relative_path.clone());
                lowest = lowest.min(similarity);
            }
        }

        if members.len() >= 2 {
            duplicates.push(ContentDuplicate {
                hash: body_hash(&files[i].body),
                count: members.len(),
                files: members,
                similarity: Some(lowest),
            });
        }
    }

    duplicates.sort_by(|a, b| b.count.cmp(&a.count));
    duplicates
}

/// Hex MD5 digest of a note body.
pub fn body_hash(body: &str) -> String {
    format!("{:x}", md5::compute(body.as_bytes()))
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_lowercase()).collect()
}

/// Jaccard similarity of two word sets.
///
/// Two empty sets are identical (1.0); one empty set shares nothing (0.0).
pub fn jaccard_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

fn normalize_value(value: &FrontmatterValue) -> String {
    match value {
        FrontmatterValue::String(s) => s.trim().to_lowercase(),
        FrontmatterValue::Sequence(items) => {
            let mut parts: Vec<String> = items
                .iter()
                .map(|item| item.to_string().trim().to_lowercase())
                .collect();
            parts.sort();
            parts.join(",")
        }
        other => other.to_string(),
    }
}
