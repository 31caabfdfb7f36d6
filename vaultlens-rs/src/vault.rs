//! Vault scanning: turns a directory of Markdown files into note records.

use crate::error::{Result, VaultError};
use crate::note::{relative_path_string, resolve_links, LinkParser, MarkdownLinkParser, NoteRecord};
use chrono::{DateTime, Utc};
use glob::glob;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Represents an Obsidian-style vault on disk.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
}

impl Vault {
    /// Create a new vault instance.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(VaultError::VaultNotFound(root));
        }

        Ok(Self { root })
    }

    /// List all markdown files in the vault, relative to the root and sorted.
    ///
    /// Hidden files and anything below a hidden directory (e.g. `.obsidian`,
    /// `.trash`) are skipped.
    pub fn list_notes(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.root.join("**/*.md");
        let pattern_str = pattern.to_string_lossy();

        let mut notes = Vec::new();

        for entry in glob(&pattern_str)? {
            match entry {
                Ok(path) => {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        if !relative
                            .components()
                            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                        {
                            notes.push(relative.to_path_buf());
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable path");
                }
            }
        }

        notes.sort();
        Ok(notes)
    }

    /// Load one note as a record, without links.
    pub fn load_record(&self, relative_path: &Path) -> Result<NoteRecord> {
        let full_path = self.root.join(relative_path);
        let content = std::fs::read_to_string(&full_path)?;
        let metadata = std::fs::metadata(&full_path)?;
        let modified_at: DateTime<Utc> = metadata.modified()?.into();

        Ok(NoteRecord::parse(relative_path_string(relative_path), &content)
            .with_path(full_path)
            .with_modified_at(modified_at)
            .with_raw_size(metadata.len()))
    }

    /// Load every note and resolve links with the default parser.
    pub fn load_records(&self) -> Result<Vec<NoteRecord>> {
        self.load_records_with(&MarkdownLinkParser)
    }

    /// Load every note and resolve links with the given parser.
    ///
    /// Notes that cannot be read (e.g. invalid UTF-8) are skipped with a warning.
    pub fn load_records_with<P: LinkParser + ?Sized>(&self, parser: &P) -> Result<Vec<NoteRecord>> {
        let start = Instant::now();
        let paths = self.list_notes()?;
        let mut records = Vec::with_capacity(paths.len());

        for path in &paths {
            match self.load_record(path) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping note");
                }
            }
        }

        let records = resolve_links(records, parser);
        tracing::debug!(
            notes = records.len(),
            elapsed = ?start.elapsed(),
            "loaded vault"
        );
        Ok(records)
    }
}
