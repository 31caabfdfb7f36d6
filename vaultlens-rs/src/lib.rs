//! vaultlens - analytics for Obsidian-style Markdown vaults.
//!
//! # Overview
//!
//! A vault is scanned into immutable [`NoteRecord`]s (frontmatter, body,
//! links, headings, size and modification time). The analytics engine then
//! turns those records into:
//! - Vault statistics and per-field usage
//! - Duplicate reports (shared frontmatter values, identical or similar bodies)
//! - Link graph metrics: orphans, density and central notes
//! - Per-note content quality scores
//! - Activity trends over time
//! - Sync-conflict files and numbered copies
//! - Inbox sections and their urgency
//! - An overall health score
//!
//! # Example
//!
//! ```no_run
//! use vaultlens::analytics::{analyze_content, compute_stats};
//! use vaultlens::health::calculate_health_score;
//! use vaultlens::Vault;
//!
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let records = vault.load_records().unwrap();
//!
//! let stats = compute_stats(&records);
//! println!("{} notes, {} orphans", stats.total_files, stats.orphaned_files.len());
//!
//! let quality = analyze_content(&records);
//! println!("Average quality: {:.2}", quality.average_score);
//!
//! let health = calculate_health_score(&stats);
//! println!("Health: {:.0} ({})", health.score, health.status);
//! ```

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod health;
pub mod logging;
pub mod note;
pub mod parser;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{Result, VaultError};
pub use note::{LinkParser, NoteRecord};
pub use types::*;
pub use vault::Vault;
