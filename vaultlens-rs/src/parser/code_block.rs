//! Code span detection, so links and headings inside code are ignored.

use regex::Regex;
use std::sync::LazyLock;

/// A byte range covered by a fenced code block or an inline code span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Whether this is a fenced block (vs inline code).
    pub fenced: bool,
}

// Opening or closing fence: ``` or ~~~ at start of line
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(`{3,}|~{3,})").unwrap());

// Inline code, double backticks first so they can contain single ones
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``(?:[^`]|`[^`])*``|`[^`\n]+`").unwrap());

/// Find all fenced blocks and inline code spans in content, sorted by start.
///
/// An unterminated fence runs to the end of the content.
pub fn find_code_ranges(content: &str) -> Vec<CodeRange> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, char, usize)> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        if let Some(cap) = FENCE.captures(line) {
            let fence = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            let fence_char = fence.chars().next().unwrap_or('`');

            match open {
                None => open = Some((offset, fence_char, fence.len())),
                Some((start, open_char, open_len))
                    if fence_char == open_char
                        && fence.len() >= open_len
                        && line.trim().chars().all(|c| c == open_char) =>
                {
                    ranges.push(CodeRange {
                        start,
                        end: offset + line.trim_end_matches(['\n', '\r']).len(),
                        fenced: true,
                    });
                    open = None;
                }
                Some(_) => {}
            }
        }
        offset += line.len();
    }

    if let Some((start, _, _)) = open {
        ranges.push(CodeRange {
            start,
            end: content.len(),
            fenced: true,
        });
    }

    let fenced_count = ranges.len();
    for m in INLINE_CODE.find_iter(content) {
        let inside_fence = ranges[..fenced_count]
            .iter()
            .any(|r| m.start() < r.end && m.end() > r.start);
        if !inside_fence {
            ranges.push(CodeRange {
                start: m.start(),
                end: m.end(),
                fenced: false,
            });
        }
    }

    ranges.sort_by_key(|r| r.start);
    ranges
}

/// Check if a byte offset is inside any code range.
pub fn is_in_code(offset: usize, ranges: &[CodeRange]) -> bool {
    ranges.iter().any(|r| offset >= r.start && offset < r.end)
}

/// Remove every code range from content.
///
/// Removed spans are replaced with a single space so neighbouring words
/// do not merge.
pub fn strip_code(content: &str) -> String {
    let ranges = find_code_ranges(content);
    let mut result = String::with_capacity(content.len());
    let mut pos = 0;

    for range in &ranges {
        if range.start < pos {
            continue;
        }
        result.push_str(&content[pos..range.start]);
        result.push(' ');
        pos = range.end;
    }
    result.push_str(&content[pos..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block() {
        let content = "Some text\n\n```rust\nlet x = [[not a link]];\n```\n\nMore text";
        let ranges = find_code_ranges(content);
        assert_eq!(ranges.len(), 1);
        assert!(ranges[0].fenced);
        assert!(is_in_code(content.find("let").unwrap(), &ranges));
        assert!(!is_in_code(content.find("More").unwrap(), &ranges));
    }

    #[test]
    fn test_tilde_fence_and_inline() {
        let content = "~~~\ncode\n~~~\n\nSome `inline` here";
        let ranges = find_code_ranges(content);
        assert_eq!(ranges.len(), 2);
        assert!(ranges[0].fenced);
        assert!(!ranges[1].fenced);
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let content = "text\n```\nnever closed";
        let ranges = find_code_ranges(content);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end, content.len());
    }

    #[test]
    fn test_strip_code() {
        let stripped = strip_code("Before `x = 1` after\n```\nblock\n```\nend");
        assert!(stripped.contains("Before"));
        assert!(stripped.contains("after"));
        assert!(stripped.contains("end"));
        assert!(!stripped.contains("x = 1"));
        assert!(!stripped.contains("block"));
    }
}
