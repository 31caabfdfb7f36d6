//! Detection of sync-service conflict files and Obsidian numbered copies.

use crate::note::{NoteRecord, join_relative};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

/// Sync service that produced a conflict file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConflictVendor {
    #[serde(rename = "syncthing")]
    Syncthing,
    #[serde(rename = "dropbox")]
    Dropbox,
    #[serde(rename = "onedrive")]
    OneDrive,
    #[serde(rename = "google-drive")]
    GoogleDrive,
    #[serde(rename = "icloud")]
    ICloud,
}

impl ConflictVendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictVendor::Syncthing => "syncthing",
            ConflictVendor::Dropbox => "dropbox",
            ConflictVendor::OneDrive => "onedrive",
            ConflictVendor::GoogleDrive => "google-drive",
            ConflictVendor::ICloud => "icloud",
        }
    }
}

impl fmt::Display for ConflictVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conflict file name patterns, tried in order. Group 1 is the original
/// file name without extension.
static CONFLICT_PATTERNS: LazyLock<Vec<(ConflictVendor, Regex)>> = LazyLock::new(|| {
    [
        (
            ConflictVendor::Syncthing,
            r"^(.+)\.sync-conflict-\d{8}-\d{6}-[A-Z0-9]+\.md$",
        ),
        (ConflictVendor::Dropbox, r"^(.+) \(.+'s conflicted copy.*\)\.md$"),
        (ConflictVendor::OneDrive, r"^(.+)-(?:DESKTOP|LAPTOP)-[A-Za-z0-9]+\.md$"),
        (ConflictVendor::GoogleDrive, r"^(.+) \(\d+\)\.md$"),
        (ConflictVendor::ICloud, r"^(.+) \(conflict.*\)\.md$"),
    ]
    .into_iter()
    .map(|(vendor, pattern)| (vendor, Regex::new(pattern).unwrap()))
    .collect()
});

static NUMBERED_COPY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+) (\d+)$").unwrap());

/// A conflict file whose original is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConflictFile {
    pub conflict_file: String,
    pub original_file: String,
    pub conflict_type: ConflictVendor,
}

/// A numbered copy (`Note 1.md`) whose original (`Note.md`) is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObsidianCopy {
    pub original_file: String,
    pub copy_file: String,
    pub copy_number: u32,
}

/// Find sync-conflict files, sorted by original then conflict path.
pub fn find_sync_conflicts(files: &[NoteRecord]) -> Vec<SyncConflictFile> {
    let known = known_paths(files);
    let mut conflicts = Vec::new();

    for file in files {
        let name = file.file_name();
        let Some((vendor, base)) = CONFLICT_PATTERNS.iter().find_map(|(vendor, pattern)| {
            pattern
                .captures(name)
                .and_then(|c| c.get(1))
                .map(|m| (*vendor, m.as_str()))
        }) else {
            continue;
        };

        let original = join_relative(file.folder(), &format!("{}.md", base));
        if original != file.relative_path && known.contains(original.as_str()) {
            conflicts.push(SyncConflictFile {
                conflict_file: file.relative_path.clone(),
                original_file: original,
                conflict_type: vendor,
            });
        }
    }

    conflicts.sort_by(|a, b| {
        a.original_file
            .cmp(&b.original_file)
            .then_with(|| a.conflict_file.cmp(&b.conflict_file))
    });
    tracing::debug!(conflicts = conflicts.len(), "sync conflicts");
    conflicts
}

/// Find numbered copies, sorted by original then copy number.
pub fn find_obsidian_copies(files: &[NoteRecord]) -> Vec<ObsidianCopy> {
    let known = known_paths(files);
    let mut copies = Vec::new();

    for file in files {
        let Some(stem) = file.file_name().strip_suffix(".md") else {
            continue;
        };
        let Some(caps) = NUMBERED_COPY.captures(stem) else {
            continue;
        };
        let Ok(copy_number) = caps[2].parse::<u32>() else {
            continue;
        };

        let original = join_relative(file.folder(), &format!("{}.md", &caps[1]));
        if known.contains(original.as_str()) {
            copies.push(ObsidianCopy {
                original_file: original,
                copy_file: file.relative_path.clone(),
                copy_number,
            });
        }
    }

    copies.sort_by(|a, b| {
        a.original_file
            .cmp(&b.original_file)
            .then_with(|| a.copy_number.cmp(&b.copy_number))
    });
    tracing::debug!(copies = copies.len(), "numbered copies");
    copies
}

fn known_paths(files: &[NoteRecord]) -> HashSet<&str> {
    files.iter().map(|f| f.relative_path.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn notes(paths: &[&str]) -> Vec<NoteRecord> {
        paths.iter().map(|p| NoteRecord::parse(*p, "")).collect()
    }

    #[test]
    fn test_syncthing_conflict() {
        let files = notes(&["report.md", "report.sync-conflict-20230101-120000-ABCDEFGH.md"]);
        let conflicts = find_sync_conflicts(&files);
        assert_eq!(
            conflicts,
            vec![SyncConflictFile {
                conflict_file: "report.sync-conflict-20230101-120000-ABCDEFGH.md".to_string(),
                original_file: "report.md".to_string(),
                conflict_type: ConflictVendor::Syncthing,
            }]
        );
        assert_eq!(
            serde_json::to_value(&conflicts[0]).unwrap()["conflict_type"],
            "syncthing"
        );
    }

    #[test]
    fn test_vendor_patterns() {
        let files = notes(&[
            "notes/Plan.md",
            "notes/Plan (Jane's conflicted copy 2023-01-01).md",
            "Todo.md",
            "Todo-DESKTOP-AB12CD.md",
            "Ideas.md",
            "Ideas (1).md",
            "Journal.md",
            "Journal (conflict 2).md",
        ]);

        let found: Vec<(String, ConflictVendor)> = find_sync_conflicts(&files)
            .into_iter()
            .map(|c| (c.original_file, c.conflict_type))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Ideas.md".to_string(), ConflictVendor::GoogleDrive),
                ("Journal.md".to_string(), ConflictVendor::ICloud),
                ("Todo.md".to_string(), ConflictVendor::OneDrive),
                ("notes/Plan.md".to_string(), ConflictVendor::Dropbox),
            ]
        );
    }

    #[test]
    fn test_conflict_without_original_is_ignored() {
        let files = notes(&["lonely.sync-conflict-20230101-120000-ABC.md"]);
        assert!(find_sync_conflicts(&files).is_empty());
    }

    #[test]
    fn test_original_must_be_in_same_folder() {
        let files = notes(&["a/report.md", "b/report.sync-conflict-20230101-120000-ABC.md"]);
        assert!(find_sync_conflicts(&files).is_empty());
    }

    #[test]
    fn test_obsidian_copies() {
        let files = notes(&[
            "Note.md",
            "Note 2.md",
            "Note 1.md",
            "Chapter 3.md",
            "dir/x.md",
            "dir/x 1.md",
        ]);
        let copies = find_obsidian_copies(&files);
        assert_eq!(
            copies,
            vec![
                ObsidianCopy {
                    original_file: "Note.md".to_string(),
                    copy_file: "Note 1.md".to_string(),
                    copy_number: 1,
                },
                ObsidianCopy {
                    original_file: "Note.md".to_string(),
                    copy_file: "Note 2.md".to_string(),
                    copy_number: 2,
                },
                ObsidianCopy {
                    original_file: "dir/x.md".to_string(),
                    copy_file: "dir/x 1.md".to_string(),
                    copy_number: 1,
                },
            ]
        );
    }
}
