//! Link graph, centrality and link resolution.

mod link_graph;
pub mod resolution;

pub use link_graph::{
    analyze_links, find_orphans, CentralFile, LinkAnalysis, LinkGraph, INBOUND_WEIGHT,
    OUTBOUND_WEIGHT,
};
pub use resolution::{count_broken_links, is_media_target, NoteIndex};
