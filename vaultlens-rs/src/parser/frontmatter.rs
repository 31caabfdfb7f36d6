//! YAML frontmatter splitting and parsing.

use crate::error::{Result, VaultError};
use crate::types::{Frontmatter, FrontmatterValue};
use serde_yaml::Value;
use std::path::Path;

/// Frontmatter extraction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The content after the frontmatter.
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// Frontmatter must open with `---` on the very first line and close with a
/// line containing only `---`. Anything else is treated as body.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: content,
    };

    let Some(first_line) = content.split_inclusive('\n').next() else {
        return no_frontmatter;
    };
    if first_line.trim_end_matches(['\n', '\r']) != "---" || !first_line.ends_with('\n') {
        return no_frontmatter;
    }

    let yaml_start = first_line.len();
    let mut offset = yaml_start;
    for line in content[yaml_start..].split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            let yaml = content[yaml_start..offset].trim_end_matches(['\n', '\r']);
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &content[offset + line.len()..],
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Parse the frontmatter of a note into a field map.
///
/// A note without frontmatter, or with an empty or non-mapping YAML block,
/// yields an empty map.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<Frontmatter> {
    let Some(yaml) = split_frontmatter(content).yaml else {
        return Ok(Frontmatter::new());
    };

    let value: Value = serde_yaml::from_str(yaml).map_err(|e| VaultError::InvalidFrontmatter {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(match FrontmatterValue::from(&value) {
        FrontmatterValue::Object(map) => map,
        _ => Frontmatter::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_no_frontmatter() {
        let split = split_frontmatter("Just some content");
        assert!(split.yaml.is_none());
        assert_eq!(split.body, "Just some content");
    }

    #[test]
    fn test_split_with_frontmatter() {
        let content = "---\ntitle: Test\ntags: [a, b]\n---\n\nContent here";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, Some("title: Test\ntags: [a, b]"));
        assert_eq!(split.body, "\nContent here");
    }

    #[test]
    fn test_split_frontmatter_at_eof() {
        let split = split_frontmatter("---\ntitle: Test\n---");
        assert_eq!(split.yaml, Some("title: Test"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let split = split_frontmatter("---\n---\nBody");
        assert_eq!(split.yaml, Some(""));
        assert_eq!(split.body, "Body");
        assert!(parse_frontmatter("---\n---\nBody", Path::new("a.md")).unwrap().is_empty());
    }

    #[test]
    fn test_no_closing_delimiter() {
        let split = split_frontmatter("---\ntitle: Test\n\nContent without closing");
        assert!(split.yaml.is_none());
    }

    #[test]
    fn test_triple_dash_in_content() {
        let content = "---\ntitle: Test\n---\n\n---\n\nThis has triple dashes in content";
        let split = split_frontmatter(content);
        assert_eq!(split.yaml, Some("title: Test"));
        assert!(split.body.contains("---"));
    }

    #[test]
    fn test_parse_frontmatter() {
        let content = "---\ntitle: My Note\ntags:\n  - rust\n  - cli\nrating: 4\n---\n\nContent";
        let fm = parse_frontmatter(content, Path::new("note.md")).unwrap();

        assert_eq!(fm["title"].as_str(), Some("My Note"));
        assert_eq!(fm["tags"].as_sequence().map(|s| s.len()), Some(2));
        assert_eq!(fm["rating"], FrontmatterValue::Number(4.0));
    }

    #[test]
    fn test_invalid_frontmatter() {
        let result =
            parse_frontmatter("---\ninvalid: yaml: syntax:\n---\nContent", Path::new("bad.md"));
        assert!(matches!(result, Err(VaultError::InvalidFrontmatter { .. })));
    }
}
