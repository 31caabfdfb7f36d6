//! The analytics engine.
//!
//! Every entry point is a pure function over a slice of finished
//! [`NoteRecord`](crate::note::NoteRecord)s and returns a fresh result value.

pub mod conflicts;
pub mod duplicates;
pub mod inbox;
pub mod quality;
pub mod stats;
pub mod text;
pub mod trends;

pub use conflicts::{
    find_obsidian_copies, find_sync_conflicts, ConflictVendor, ObsidianCopy, SyncConflictFile,
};
pub use duplicates::{
    find_content_duplicates, find_duplicates, ContentDuplicate, Duplicate, MatchMode,
};
pub use inbox::{analyze_inbox, InboxAnalysis, InboxOptions, InboxSection, UrgencyLevel};
pub use quality::{
    analyze_content, analyze_content_at, ContentAnalysis, FileQualityScore, QualityDistribution,
    QualityLevel,
};
pub use stats::{analyze_field, compute_stats, FieldAnalysis, ValueCount, VaultStats};
pub use trends::{
    analyze_trends, analyze_trends_at, Granularity, TagTrend, TimeSpan, TimelinePoint,
    TrendsAnalysis,
};
