//! Link target resolution and broken-link counting.
//!
//! A target resolves in this order:
//! 1. Vault-relative path (case-insensitive); Markdown links are also tried
//!    relative to the linking note's folder
//! 2. File name match anywhere in the vault (case-insensitive)

use crate::note::{NoteRecord, join_relative};
use crate::types::{Link, LinkKind};
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

const MEDIA_EXTENSIONS: [&str; 17] = [
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "mp3", "wav", "ogg", "m4a", "flac", "mp4",
    "webm", "mov", "avi", "pdf",
];

/// Lookup tables for resolving link targets against a set of notes.
#[derive(Debug, Default)]
pub struct NoteIndex {
    /// Lowercased relative paths.
    paths: HashSet<String>,
    /// Lowercased file names, extension included.
    names: HashSet<String>,
}

impl NoteIndex {
    pub fn build(files: &[NoteRecord]) -> Self {
        let mut index = NoteIndex::default();
        for file in files {
            index.paths.insert(file.relative_path.to_lowercase());
            index.names.insert(file.file_name().to_lowercase());
        }
        index
    }

    /// Whether a link from a note in `source_folder` points at a known note.
    pub fn resolves(&self, link: &Link, source_folder: &str) -> bool {
        let target = link.target.split('#').next().unwrap_or_default().trim();
        if target.is_empty() {
            // Same-note heading reference
            return true;
        }

        let mut target = target.trim_start_matches('/').to_lowercase();
        if !target.ends_with(".md") {
            target.push_str(".md");
        }

        if self.paths.contains(&target) {
            return true;
        }
        if link.kind == LinkKind::Markdown {
            if let Some(joined) = normalize_path(&join_relative(source_folder, &target)) {
                if self.paths.contains(&joined) {
                    return true;
                }
            }
        }

        let name = target.rsplit('/').next().unwrap_or(&target);
        self.names.contains(name)
    }
}

/// Count links whose target matches no note. Links to media files are not
/// counted.
pub fn count_broken_links(files: &[NoteRecord]) -> usize {
    let start = Instant::now();
    let index = NoteIndex::build(files);

    let broken = files
        .iter()
        .map(|file| {
            let folder = file.folder().to_lowercase();
            file.links
                .iter()
                .filter(|link| !is_media_target(&link.target))
                .filter(|link| !index.resolves(link, &folder))
                .count()
        })
        .sum();

    tracing::debug!(broken, elapsed = ?start.elapsed(), "broken links");
    broken
}

/// Check if a target looks like a media file (image, audio, video, PDF).
pub fn is_media_target(target: &str) -> bool {
    Path::new(target)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
}

/// Collapse `.` and `..` segments. Returns `None` when the path escapes the root.
fn normalize_path(path: &str) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}
