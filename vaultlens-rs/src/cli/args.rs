//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultlens")]
#[command(
    author,
    version,
    about = "Analytics for Obsidian-style Markdown vaults",
    long_about = None
)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Vault statistics
    Stats,

    /// Overall vault health score
    Health(HealthArgs),

    /// Notes sharing the same value for a frontmatter field
    Duplicates(DuplicatesArgs),

    /// Notes with identical or near-identical bodies
    #[command(name = "content-duplicates")]
    ContentDuplicates(ContentDuplicatesArgs),

    /// How a frontmatter field is used across the vault
    Fields(FieldsArgs),

    /// Link graph: orphans, density and central notes
    Links(LinksArgs),

    /// Content quality scores
    Quality(QualityArgs),

    /// Activity over time
    Trends(TrendsArgs),

    /// Sync-service conflict files
    Conflicts,

    /// Numbered copies such as "Note 1.md"
    Copies,

    /// Sections under inbox headings
    Inbox(InboxArgs),
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Exit with status 1 when the score is below this value
    #[arg(long)]
    pub fail_below: Option<f64>,
}

#[derive(Args, Debug)]
pub struct DuplicatesArgs {
    /// Frontmatter field to compare
    #[arg(long, default_value = "title")]
    pub field: String,
}

#[derive(Args, Debug)]
pub struct ContentDuplicatesArgs {
    /// Comparison mode
    #[arg(long, value_enum, default_value_t = MatchModeArg::Exact)]
    pub mode: MatchModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchModeArg {
    /// Identical bodies
    #[default]
    Exact,
    /// Word-set similarity above 0.8
    Similar,
}

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Frontmatter field to analyze
    pub field: String,
}

#[derive(Args, Debug)]
pub struct LinksArgs {
    /// Number of central notes to list
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct QualityArgs {
    /// Number of lowest-scoring notes to list (config default: 20)
    #[arg(long)]
    pub limit: Option<usize>,

    /// List every note
    #[arg(long, conflicts_with = "limit")]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct TrendsArgs {
    /// Time window: 1w, 1m, 3m, 6m, 1y or all
    #[arg(long)]
    pub timespan: Option<String>,

    /// Bucket size: day, week, month or quarter
    #[arg(long)]
    pub granularity: Option<String>,
}

#[derive(Args, Debug)]
pub struct InboxArgs {
    /// Heading label that opens an inbox section (repeatable)
    #[arg(long = "heading")]
    pub headings: Vec<String>,

    /// Ignore sections with fewer items
    #[arg(long)]
    pub min_items: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["vaultlens", "--vault", "/v", "-vv", "--yaml", "stats"]);
        assert_eq!(cli.vault, Some(PathBuf::from("/v")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output_format(), OutputFormat::Yaml);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn test_parse_inbox_headings() {
        let cli =
            Cli::parse_from(["vaultlens", "inbox", "--heading", "Inbox", "--heading", "Capture"]);
        match cli.command {
            Commands::Inbox(args) => {
                assert_eq!(args.headings, vec!["Inbox", "Capture"]);
                assert_eq!(args.min_items, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_conflicting_formats() {
        assert!(Cli::try_parse_from(["vaultlens", "--json", "--toml", "stats"]).is_err());
    }
}
