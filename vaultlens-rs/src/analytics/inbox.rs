//! Inbox scanning: finds sections under inbox-style headings and rates how
//! pressing their contents are.

use crate::note::NoteRecord;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Instant;

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]{0,3}#{1,6}(?:[ \t]+(.*))?$").unwrap());

static ITEM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*+](?:\s|$)|\[[ xX]\]|\d+\.(?:\s|$))").unwrap()
});

static DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{2,4}").unwrap());

static OPEN_TASK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(?:[-*+]\s+)?\[ \]").unwrap());

const URGENT_KEYWORDS: [&str; 7] = [
    "urgent", "asap", "deadline", "emergency", "critical", "priority", "due",
];

const PROCESS_KEYWORDS: [&str; 5] = ["todo", "pending", "waiting", "review", "process"];

/// Sections holding more items than this are flagged as overflowing.
pub const LARGE_INBOX_ITEMS: usize = 10;

/// Sections with more content than this (in bytes) are flagged as bulky.
pub const LARGE_INBOX_BYTES: usize = 1000;

/// Options for the inbox scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxOptions {
    /// Heading labels that open an inbox section (case-insensitive prefix).
    pub headings: Vec<String>,
    /// Sections with fewer items are ignored.
    pub min_items: usize,
}

impl Default for InboxOptions {
    fn default() -> Self {
        Self {
            headings: vec!["INBOX".to_string()],
            min_items: 1,
        }
    }
}

/// How soon an inbox section needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    High,
    Medium,
    Low,
}

/// An inbox section found in a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboxSection {
    pub file: String,
    pub heading: String,
    /// Line of the heading (1-indexed).
    pub line_start: usize,
    /// Last line of the section (1-indexed).
    pub line_end: usize,
    pub item_count: usize,
    /// Size of the section content in bytes, heading excluded.
    pub content_size: usize,
    pub urgency: UrgencyLevel,
    pub suggestions: Vec<String>,
}

/// All inbox sections of a vault.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InboxAnalysis {
    pub sections: Vec<InboxSection>,
    pub total_sections: usize,
    pub total_items: usize,
    pub files_with_inbox: usize,
    pub high_urgency: usize,
    pub medium_urgency: usize,
    pub low_urgency: usize,
}

/// Scan every note for inbox sections.
pub fn analyze_inbox(files: &[NoteRecord], options: &InboxOptions) -> InboxAnalysis {
    let start = Instant::now();
    let labels = label_patterns(&options.headings);

    let sections: Vec<InboxSection> = files
        .iter()
        .flat_map(|f| scan_file(f, &labels, options.min_items))
        .collect();

    let files_with_inbox = sections
        .iter()
        .map(|s| s.file.as_str())
        .collect::<HashSet<_>>()
        .len();
    let count = |level: UrgencyLevel| sections.iter().filter(|s| s.urgency == level).count();

    let analysis = InboxAnalysis {
        total_sections: sections.len(),
        total_items: sections.iter().map(|s| s.item_count).sum(),
        files_with_inbox,
        high_urgency: count(UrgencyLevel::High),
        medium_urgency: count(UrgencyLevel::Medium),
        low_urgency: count(UrgencyLevel::Low),
        sections,
    };

    tracing::debug!(
        sections = analysis.total_sections,
        items = analysis.total_items,
        elapsed = ?start.elapsed(),
        "inbox scan"
    );
    analysis
}

fn label_patterns(labels: &[String]) -> Vec<Regex> {
    labels
        .iter()
        .filter(|label| !label.trim().is_empty())
        .filter_map(|label| {
            let pattern = format!(r"^{}", regex::escape(label.trim()));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(label = %label, error = %e, "ignoring inbox heading");
                    None
                }
            }
        })
        .collect()
}

struct OpenSection<'a> {
    heading: &'a str,
    line_start: usize,
    lines: Vec<&'a str>,
}

fn scan_file(file: &NoteRecord, labels: &[Regex], min_items: usize) -> Vec<InboxSection> {
    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;
    let mut in_fence = false;

    for (idx, line) in file.body.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }

        let heading = if in_fence {
            None
        } else {
            HEADING_LINE
                .captures(line)
                .map(|c| c.get(1).map_or("", |m| m.as_str().trim()))
        };

        match heading {
            Some(text) => {
                if let Some(section) = open.take() {
                    sections.extend(close_section(file, section, idx, min_items));
                }
                if labels.iter().any(|re| re.is_match(text)) {
                    open = Some(OpenSection {
                        heading: text,
                        line_start: idx + 1,
                        lines: Vec::new(),
                    });
                }
            }
            None => {
                if let Some(section) = open.as_mut() {
                    section.lines.push(line);
                }
            }
        }
    }

    if let Some(section) = open.take() {
        let line_end = section.line_start + section.lines.len();
        sections.extend(close_section(file, section, line_end, min_items));
    }

    sections
}

fn close_section(
    file: &NoteRecord,
    section: OpenSection,
    line_end: usize,
    min_items: usize,
) -> Option<InboxSection> {
    let item_count = count_items(&section.lines);
    if item_count < min_items {
        return None;
    }

    let content = section.lines.join("\n");
    let urgency = urgency_level(section.heading, &content);
    let suggestions = suggest_actions(&content, item_count, urgency);

    Some(InboxSection {
        file: file.relative_path.clone(),
        heading: section.heading.to_string(),
        line_start: section.line_start,
        line_end,
        item_count,
        content_size: content.len(),
        urgency,
        suggestions,
    })
}

/// Count list, checkbox and numbered items; without any, count non-blank lines.
fn count_items(lines: &[&str]) -> usize {
    let items = lines.iter().filter(|l| ITEM_LINE.is_match(l)).count();
    if items > 0 {
        items
    } else {
        lines.iter().filter(|l| !l.trim().is_empty()).count()
    }
}

fn urgency_level(heading: &str, content: &str) -> UrgencyLevel {
    let heading = heading.to_lowercase();
    let content = content.to_lowercase();

    if URGENT_KEYWORDS
        .iter()
        .any(|k| heading.contains(k) || content.contains(k))
    {
        UrgencyLevel::High
    } else if PROCESS_KEYWORDS.iter().any(|k| heading.contains(k)) || DATE.is_match(&content) {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    }
}

fn suggest_actions(content: &str, item_count: usize, urgency: UrgencyLevel) -> Vec<String> {
    let mut suggestions = Vec::new();

    if urgency == UrgencyLevel::High {
        suggestions.push("Handle the urgent items first".to_string());
    }
    if item_count > LARGE_INBOX_ITEMS {
        suggestions.push(format!(
            "Process this inbox: {} items are waiting",
            item_count
        ));
    }
    if OPEN_TASK.is_match(content) {
        suggestions.push("Move open tasks to your task list".to_string());
    }
    if content.contains("http://") || content.contains("https://") {
        suggestions.push("File saved links into reference notes".to_string());
    }
    if content.len() > LARGE_INBOX_BYTES {
        suggestions.push("Turn long entries into notes of their own".to_string());
    }

    if suggestions.is_empty() {
        suggestions.push("Review and file these items".to_string());
    }
    suggestions
}
