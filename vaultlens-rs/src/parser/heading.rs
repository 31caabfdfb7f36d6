//! ATX heading parsing.

use crate::parser::code_block::{find_code_ranges, is_in_code};
use crate::types::Heading;
use regex::Regex;
use std::sync::LazyLock;

// ATX-style heading: # Heading, ## Heading, etc. A trailing block id is dropped.
static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6})\s+(.+?)(?:\s+\^[a-zA-Z0-9_-]+)?\s*$").unwrap()
});

/// Parse all headings from content, skipping fenced code blocks.
pub fn parse_headings(content: &str) -> Vec<Heading> {
    let code_ranges = find_code_ranges(content);
    let mut headings = Vec::new();
    let mut offset = 0;

    for (line_idx, line) in content.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += line.len();

        if is_in_code(line_start, &code_ranges) {
            continue;
        }

        if let Some(cap) = HEADING.captures(line.trim_end_matches(['\n', '\r'])) {
            headings.push(Heading {
                level: cap[1].len() as u8,
                text: cap[2].trim().to_string(),
                line: line_idx + 1,
            });
        }
    }

    headings
}

/// Count headings at a given level.
pub fn count_level(headings: &[Heading], level: u8) -> usize {
    headings.iter().filter(|h| h.level == level).count()
}
