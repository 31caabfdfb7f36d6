//! Wikilink, embed and Markdown link parsing.

use crate::parser::code_block::{find_code_ranges, is_in_code};
use crate::types::{Link, LinkKind};
use regex::Regex;
use std::sync::LazyLock;

// (!)?[[target#heading^block|alias]]
// Group 1: embed marker, group 2: target, group 3: alias.
pub(crate) static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]\|#]+)(?:#[^\]\|]*)?(?:\|([^\]]+))?\]\]").unwrap()
});

// [text](target "title"). Images (![alt](src)) are matched so they can be skipped.
static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(!?)\[([^\]]*)\]\(\s*<?([^)\s>]+)>?(?:\s+"[^"]*")?\s*\)"#).unwrap()
});

/// Parse wikilinks, embeds and Markdown links from a note body.
///
/// Links inside code are skipped. Markdown links to external URLs, mail
/// addresses and in-page anchors are not note links and are dropped, as are
/// Markdown images. Results are ordered by position.
pub fn parse_links(content: &str) -> Vec<Link> {
    let code_ranges = find_code_ranges(content);
    let mut found: Vec<(usize, Link)> = Vec::new();

    for cap in WIKILINK.captures_iter(content) {
        let start = cap.get(0).map(|m| m.start()).unwrap_or_default();
        if is_in_code(start, &code_ranges) {
            continue;
        }

        let kind = if cap[1].is_empty() {
            LinkKind::Wiki
        } else {
            LinkKind::Embed
        };
        let target = cap[2].trim().to_string();
        let display_text = cap
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_else(|| target.clone());

        let mut link = Link::new(kind, target, display_text);
        link.line = line_of(content, start);
        found.push((start, link));
    }

    for cap in MARKDOWN_LINK.captures_iter(content) {
        let start = cap.get(0).map(|m| m.start()).unwrap_or_default();
        if !cap[1].is_empty() || is_in_code(start, &code_ranges) {
            continue;
        }

        let raw_target = &cap[3];
        if is_external(raw_target) {
            continue;
        }

        let target = raw_target.split('#').next().unwrap_or(raw_target);
        let target = urlencoding::decode(target)
            .map(|t| t.into_owned())
            .unwrap_or_else(|_| target.to_string());

        let mut link = Link::markdown(target, cap[2].trim());
        link.line = line_of(content, start);
        found.push((start, link));
    }

    found.sort_by_key(|(start, _)| *start);
    found.into_iter().map(|(_, link)| link).collect()
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

fn is_external(target: &str) -> bool {
    target.starts_with('#') || target.starts_with("mailto:") || target.contains("://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_wikilink() {
        let links = parse_links("See [[My Note]] for details.");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind, LinkKind::Wiki);
        assert_eq!(links[0].target, "My Note");
        assert_eq!(links[0].display_text, "My Note");
    }

    #[test]
    fn test_wikilink_with_heading_and_alias() {
        let links = parse_links("[[Note#Section|alias]] and [[Other#^abc123]]");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].target, "Note");
        assert_eq!(links[0].display_text, "alias");
        assert_eq!(links[1].target, "Other");
    }

    #[test]
    fn test_embed() {
        let links = parse_links("![[image.png]]");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind, LinkKind::Embed);
        assert_eq!(links[0].target, "image.png");
    }

    #[test]
    fn test_markdown_links() {
        let links = parse_links(
            "Read [the guide](docs/My%20Guide.md#intro), [site](https://example.com) and ![img](a.png).",
        );
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].kind, LinkKind::Markdown);
        assert_eq!(links[0].target, "docs/My Guide.md");
        assert_eq!(links[0].display_text, "the guide");
    }

    #[test]
    fn test_links_in_code_skipped() {
        let content = "See [[real link]] and `[[fake]]`\n\n```\n[[also fake]](x.md)\n```\n";
        let links = parse_links(content);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "real link");
    }

    #[test]
    fn test_link_order_and_lines() {
        let content = "[b](b.md)\n[[A]]\n";
        let links = parse_links(content);
        assert_eq!(links[0].target, "b.md");
        assert_eq!(links[0].line, 1);
        assert_eq!(links[1].target, "A");
        assert_eq!(links[1].line, 2);
    }
}
