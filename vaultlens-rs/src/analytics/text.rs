//! Text metrics: Markdown stripping, word/sentence/syllable counts and
//! topic coherence.

use crate::parser::links::WIKILINK;
use crate::parser::strip_code;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// Images and links share the same shape; both reduce to their bracket text.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap());

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+").unwrap());

static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*+]|\d+\.)[ \t]+(?:\[[ xX]\][ \t]+)?").unwrap()
});

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

static VOWEL_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[aeiouy]+").unwrap());

/// Common English words ignored when measuring topic focus.
pub static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her",
        "was", "one", "our", "out", "has", "him", "his", "how", "its", "may", "new", "now",
        "old", "see", "two", "who", "did", "get", "let", "she", "too", "use", "about",
        "above", "after", "again", "against", "also", "although", "always", "among",
        "another", "anyone", "anything", "around", "because", "been", "before", "being",
        "below", "between", "both", "could", "does", "doing", "done", "down", "during",
        "each", "either", "else", "even", "ever", "every", "from", "further", "have",
        "having", "here", "hers", "herself", "himself", "into", "itself", "just", "like",
        "made", "make", "many", "more", "most", "much", "must", "myself", "never", "next",
        "none", "only", "other", "ours", "ourselves", "over", "same", "shall", "should",
        "since", "some", "such", "than", "that", "their", "theirs", "them", "themselves",
        "then", "there", "these", "they", "thing", "things", "this", "those", "though",
        "through", "thus", "till", "under", "until", "upon", "very", "want", "well",
        "were", "what", "when", "where", "whether", "which", "while", "whom", "whose",
        "will", "with", "within", "without", "would", "your", "yours", "yourself",
        "yourselves", "still", "really", "used", "using", "need",
    ]
    .into_iter()
    .collect()
});

/// Reduce Markdown to prose for readability scoring.
///
/// Code is removed, links and wikilinks become their display text, and
/// heading and list markers are dropped.
pub fn strip_markdown(text: &str) -> String {
    let text = strip_code(text);
    let text = WIKILINK.replace_all(&text, |cap: &Captures| {
        cap.get(3)
            .or_else(|| cap.get(2))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    });
    let text = MARKDOWN_LINK.replace_all(&text, "$1");
    let text = HEADING_MARKER.replace_all(&text, "");
    LIST_MARKER.replace_all(&text, "").into_owned()
}

/// Number of whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of runs of sentence terminators, at least 1 for non-empty text.
pub fn count_sentences(text: &str) -> usize {
    let count = SENTENCE_END.find_iter(text).count();
    if count == 0 && !text.trim().is_empty() {
        1
    } else {
        count
    }
}

/// Approximate syllable count of a single word (never below 1).
pub fn count_syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();

    let mut count = VOWEL_GROUP.find_iter(&letters).count();
    if letters.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

/// Lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// How strongly a text concentrates on a few significant terms, in [0.5, 1].
///
/// Texts under 10 tokens are too short to judge and score 1.0. Otherwise the
/// share of significant-token occurrences taken by the five most frequent
/// terms maps linearly onto [0.5, 1].
pub fn topic_coherence(text: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.len() < 10 {
        return 1.0;
    }

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for token in &tokens {
        if token.chars().count() >= 4 && !STOP_WORDS.contains(token.as_str()) {
            *frequencies.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    let total: usize = frequencies.values().sum();
    if total == 0 {
        return 0.5;
    }

    let mut counts: Vec<usize> = frequencies.into_values().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    let top: usize = counts.iter().take(5).sum();

    (0.5 + 0.5 * (top as f64 / total as f64)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown() {
        let text = "# Title\n\n- item with [[Target|alias]] and [[Plain]]\n1. see [docs](a.md)\n\n```\ncode here\n```\nUse `inline` too. ![pic](p.png)";
        let stripped = strip_markdown(text);
        assert!(stripped.starts_with("Title"));
        assert!(stripped.contains("item with alias and Plain"));
        assert!(stripped.contains("see docs"));
        assert!(stripped.contains("pic"));
        assert!(!stripped.contains("code here"));
        assert!(!stripped.contains("inline"));
        assert!(!stripped.contains('#'));
        assert!(!stripped.contains("]("));
    }

    #[test]
    fn test_count_sentences() {
        assert_eq!(count_sentences("One. Two! Three?"), 3);
        assert_eq!(count_sentences("Wait... what?!"), 2);
        assert_eq!(count_sentences("no terminator"), 1);
        assert_eq!(count_sentences("   "), 0);
    }

    #[test]
    fn test_count_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("hello"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("readability"), 5);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("123"), 1);
        assert_eq!(count_syllables("The"), 1);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("Hello, World! rust-lang"), vec!["hello", "world", "rust", "lang"]);
    }

    #[test]
    fn test_topic_coherence_short_text() {
        assert_eq!(topic_coherence("only a few words here"), 1.0);
    }

    #[test]
    fn test_topic_coherence_only_stop_words() {
        let text = "this that with from have they were been what when";
        assert_eq!(topic_coherence(text), 0.5);
    }

    #[test]
    fn test_topic_coherence_focused_text() {
        // Five distinct significant terms only, so the top five cover everything.
        let text = "rust borrow checker lifetimes traits rust borrow checker lifetimes traits";
        assert_eq!(topic_coherence(text), 1.0);
    }

    #[test]
    fn test_topic_coherence_scattered_text() {
        let text = "alpha bravo charlie delta echoes foxtrot golfing hotel india juliet kilos limas";
        let coherence = topic_coherence(text);
        // 12 distinct terms, each once: 0.5 + 0.5 * 5/12
        assert!((coherence - (0.5 + 0.5 * 5.0 / 12.0)).abs() < 1e-9);
    }
}
