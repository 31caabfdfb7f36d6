//! Parsers that turn raw note content into record fields.

pub mod code_block;
pub mod frontmatter;
pub mod heading;
pub mod links;

pub use code_block::{find_code_ranges, is_in_code, strip_code, CodeRange};
pub use frontmatter::{parse_frontmatter, split_frontmatter, FrontmatterSplit};
pub use heading::{count_level, parse_headings};
pub use links::parse_links;
