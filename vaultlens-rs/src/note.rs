//! Note records and the link-resolution phase.

use crate::parser::{parse_frontmatter, parse_headings, parse_links, split_frontmatter};
use crate::types::{Frontmatter, FrontmatterValue, Heading, Link};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// An immutable, already-parsed view of one note.
///
/// Records are produced by the vault scanner and only read by the analytics
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteRecord {
    /// Path on disk (unique key).
    pub path: PathBuf,

    /// Path relative to the vault root, `/` separated (e.g. "proj/My Project.md").
    pub relative_path: String,

    /// Parsed frontmatter; empty when the note has none.
    pub frontmatter: Frontmatter,

    /// Markdown body with the frontmatter removed.
    pub body: String,

    /// Outgoing links. Filled by the link-resolution phase.
    pub links: Vec<Link>,

    pub headings: Vec<Heading>,

    pub modified_at: DateTime<Utc>,

    /// Size of the file on disk in bytes.
    pub raw_size: u64,
}

impl NoteRecord {
    /// Build a record from raw file content.
    ///
    /// Frontmatter that fails to parse is logged and treated as absent, so a
    /// single malformed note never aborts a vault scan. Links are left empty
    /// until [`resolve_links`] runs.
    pub fn parse(relative_path: impl Into<String>, content: &str) -> Self {
        let relative_path = relative_path.into();
        let path = PathBuf::from(&relative_path);

        let frontmatter = match parse_frontmatter(content, &path) {
            Ok(fm) => fm,
            Err(e) => {
                tracing::warn!(
                    path = %relative_path,
                    error = %e,
                    "ignoring unparseable frontmatter"
                );
                Frontmatter::new()
            }
        };
        let body = split_frontmatter(content).body.to_string();
        let headings = parse_headings(&body);

        Self {
            path,
            relative_path,
            frontmatter,
            body,
            links: Vec::new(),
            headings,
            modified_at: Utc::now(),
            raw_size: content.len() as u64,
        }
    }

    /// Set the on-disk path, keeping the relative path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = modified_at;
        self
    }

    pub fn with_raw_size(mut self, raw_size: u64) -> Self {
        self.raw_size = raw_size;
        self
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = links;
        self
    }

    /// File name including extension (e.g. "My Project.md").
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Directory part of the relative path, without trailing slash ("" at the root).
    pub fn folder(&self) -> &str {
        self.relative_path
            .rfind('/')
            .map(|idx| &self.relative_path[..idx])
            .unwrap_or("")
    }

    pub fn has_frontmatter(&self) -> bool {
        !self.frontmatter.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FrontmatterValue> {
        self.frontmatter.get(name)
    }

    /// Tags declared in the `tags` frontmatter field.
    pub fn tags(&self) -> Vec<String> {
        self.field("tags").map(|v| v.tag_values()).unwrap_or_default()
    }

    /// Key strings under which other notes may reference this one.
    pub fn keys(&self) -> Vec<String> {
        let path = self.path.to_string_lossy().into_owned();
        if path == self.relative_path {
            vec![path]
        } else {
            vec![self.relative_path.clone(), path]
        }
    }
}

/// Join a vault-relative folder and a file name.
pub fn join_relative(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Relative path of a file below the vault root, `/` separated.
pub fn relative_path_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A capability that extracts a note's outgoing links.
pub trait LinkParser {
    fn parse_links(&self, note: &NoteRecord) -> Vec<Link>;
}

/// Default link parser: wikilinks, embeds and local Markdown links in the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownLinkParser;

impl LinkParser for MarkdownLinkParser {
    fn parse_links(&self, note: &NoteRecord) -> Vec<Link> {
        parse_links(&note.body)
    }
}

/// Run the link-resolution phase.
///
/// The parser is called exactly once per record, and the returned records are
/// complete: analytics never call back into a parser.
pub fn resolve_links<P: LinkParser + ?Sized>(
    notes: Vec<NoteRecord>,
    parser: &P,
) -> Vec<NoteRecord> {
    notes
        .into_iter()
        .map(|note| {
            let links = parser.parse_links(&note);
            note.with_links(links)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_parse_record() {
        let note = NoteRecord::parse(
            "proj/Alpha.md",
            "---\ntitle: Alpha\ntags: [a, b]\n---\n# Alpha\n\nSee [[Beta]].\n",
        );
        assert_eq!(note.file_name(), "Alpha.md");
        assert_eq!(note.folder(), "proj");
        assert!(note.has_frontmatter());
        assert_eq!(note.tags(), vec!["a", "b"]);
        assert_eq!(note.headings.len(), 1);
        assert!(note.body.starts_with("# Alpha"));
        assert!(note.links.is_empty());
    }

    #[test]
    fn test_invalid_frontmatter_is_empty() {
        let note = NoteRecord::parse("bad.md", "---\ninvalid: yaml: syntax:\n---\nBody");
        assert!(!note.has_frontmatter());
        assert_eq!(note.body, "Body");
    }

    #[test]
    fn test_keys() {
        let note = NoteRecord::parse("a.md", "");
        assert_eq!(note.keys(), vec!["a.md"]);

        let note = note.with_path("/vault/a.md");
        assert_eq!(note.keys(), vec!["a.md", "/vault/a.md"]);
    }

    #[test]
    fn test_relative_helpers() {
        assert_eq!(join_relative("", "a.md"), "a.md");
        assert_eq!(join_relative("dir", "a.md"), "dir/a.md");
        assert_eq!(relative_path_string(Path::new("dir/sub/a.md")), "dir/sub/a.md");
    }

    struct CountingParser {
        calls: Cell<usize>,
    }

    impl LinkParser for CountingParser {
        fn parse_links(&self, _note: &NoteRecord) -> Vec<Link> {
            self.calls.set(self.calls.get() + 1);
            vec![Link::wiki("Target")]
        }
    }

    #[test]
    fn test_resolve_links_calls_parser_once_per_note() {
        let notes = vec![NoteRecord::parse("a.md", "x"), NoteRecord::parse("b.md", "y")];
        let parser = CountingParser { calls: Cell::new(0) };

        let resolved = resolve_links(notes, &parser);
        assert_eq!(parser.calls.get(), 2);
        assert!(resolved.iter().all(|n| n.links.len() == 1));
    }

    #[test]
    fn test_markdown_link_parser() {
        let note = NoteRecord::parse("a.md", "---\nrel: \"[[Hidden]]\"\n---\n[[B]] and [c](c.md)");
        let links = MarkdownLinkParser.parse_links(&note);
        assert_eq!(links.len(), 2);
    }
}
