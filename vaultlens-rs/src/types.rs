//! Shared types for vaultlens.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Frontmatter of a note: field name to value.
pub type Frontmatter = BTreeMap<String, FrontmatterValue>;

/// Kind of link found in a note body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// `[[target]]` or `[[target|alias]]`.
    Wiki,
    /// `[text](target)`.
    Markdown,
    /// `![[target]]`.
    Embed,
}

/// A link from the owning note to another file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub kind: LinkKind,

    /// The raw target, possibly missing the `.md` suffix for wiki links and embeds.
    pub target: String,

    /// Alias or link text, falling back to the target.
    pub display_text: String,

    /// Line number where this link appears (1-indexed, relative to the body).
    pub line: usize,
}

impl Link {
    pub fn new(kind: LinkKind, target: impl Into<String>, display_text: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            display_text: display_text.into(),
            line: 0,
        }
    }

    /// A `[[target]]` link with no alias.
    pub fn wiki(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::new(LinkKind::Wiki, target.clone(), target)
    }

    /// A `![[target]]` embed.
    pub fn embed(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::new(LinkKind::Embed, target.clone(), target)
    }

    /// A `[text](target)` link.
    pub fn markdown(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(LinkKind::Markdown, target, text)
    }

    /// Target used as a graph key.
    ///
    /// Wiki links and embeds resolve to notes, so they get `.md` appended when
    /// it is absent. Markdown link targets are used verbatim.
    pub fn normalized_target(&self) -> String {
        match self.kind {
            LinkKind::Wiki | LinkKind::Embed if !self.target.ends_with(".md") => {
                format!("{}.md", self.target)
            }
            _ => self.target.clone(),
        }
    }
}

/// A heading found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// The heading level (1-6).
    pub level: u8,

    /// The heading text (without the # prefix).
    pub text: String,

    /// Line number where this heading appears (1-indexed).
    pub line: usize,
}

/// Coarse type of a frontmatter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Date,
    Null,
    Object,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
            ValueType::Date => "date",
            ValueType::Null => "null",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed frontmatter value, converted once from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Sequence(Vec<FrontmatterValue>),
    Object(BTreeMap<String, FrontmatterValue>),
}

impl FrontmatterValue {
    /// Coarse type used for type distributions.
    ///
    /// Strings that parse as `YYYY-MM-DD` or RFC 3339 count as dates.
    pub fn value_type(&self) -> ValueType {
        match self {
            FrontmatterValue::Null => ValueType::Null,
            FrontmatterValue::Bool(_) => ValueType::Boolean,
            FrontmatterValue::Number(_) => ValueType::Number,
            FrontmatterValue::String(s) if looks_like_date(s) => ValueType::Date,
            FrontmatterValue::String(_) => ValueType::String,
            FrontmatterValue::Sequence(_) => ValueType::Array,
            FrontmatterValue::Object(_) => ValueType::Object,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FrontmatterValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[FrontmatterValue]> {
        match self {
            FrontmatterValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Whether the value carries no content (null, blank string, empty collection).
    pub fn is_blank(&self) -> bool {
        match self {
            FrontmatterValue::Null => true,
            FrontmatterValue::String(s) => s.trim().is_empty(),
            FrontmatterValue::Sequence(items) => items.is_empty(),
            FrontmatterValue::Object(map) => map.is_empty(),
            FrontmatterValue::Bool(_) | FrontmatterValue::Number(_) => false,
        }
    }

    /// Explode a `tags`-style value into individual tag strings.
    ///
    /// Sequences yield one tag per element, strings are split on commas.
    pub fn tag_values(&self) -> Vec<String> {
        match self {
            FrontmatterValue::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    FrontmatterValue::String(s) => s.trim().to_string(),
                    other => other.to_string(),
                })
                .filter(|tag| !tag.is_empty())
                .collect(),
            FrontmatterValue::String(s) => s
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&serde_yaml::Value> for FrontmatterValue {
    fn from(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => FrontmatterValue::Null,
            Value::Bool(b) => FrontmatterValue::Bool(*b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => FrontmatterValue::Number(f),
                None => FrontmatterValue::String(n.to_string()),
            },
            Value::String(s) => FrontmatterValue::String(s.clone()),
            Value::Sequence(items) => {
                FrontmatterValue::Sequence(items.iter().map(FrontmatterValue::from).collect())
            }
            Value::Mapping(map) => FrontmatterValue::Object(
                map.iter()
                    .map(|(k, v)| (yaml_key(k), FrontmatterValue::from(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => FrontmatterValue::from(&tagged.value),
        }
    }
}

impl fmt::Display for FrontmatterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontmatterValue::Null => f.write_str("null"),
            FrontmatterValue::Bool(b) => write!(f, "{}", b),
            FrontmatterValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            FrontmatterValue::Number(n) => write!(f, "{}", n),
            FrontmatterValue::String(s) => f.write_str(s),
            FrontmatterValue::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            FrontmatterValue::Object(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        other => FrontmatterValue::from(other).to_string(),
    }
}

fn looks_like_date(s: &str) -> bool {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}
