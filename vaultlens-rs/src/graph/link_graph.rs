//! Link graph construction and analysis.

use crate::note::NoteRecord;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

/// Weight of incoming links in the centrality score.
pub const INBOUND_WEIGHT: f64 = 0.7;
/// Weight of outgoing links in the centrality score.
pub const OUTBOUND_WEIGHT: f64 = 0.3;

/// A directed graph of links between notes.
///
/// Wiki links and embeds are keyed by their target with `.md` appended;
/// Markdown links by their raw target.
#[derive(Debug, Default)]
pub struct LinkGraph {
    /// Map from a note's relative path to its normalized link targets.
    outgoing: HashMap<String, Vec<String>>,

    /// Map from a normalized target to the notes that link to it.
    incoming: HashMap<String, Vec<String>>,
}

impl LinkGraph {
    /// Build a link graph from note records.
    pub fn build(files: &[NoteRecord]) -> Self {
        let mut graph = LinkGraph::default();

        for file in files {
            let targets: Vec<String> = file.links.iter().map(|l| l.normalized_target()).collect();

            for target in &targets {
                graph
                    .incoming
                    .entry(target.clone())
                    .or_default()
                    .push(file.relative_path.clone());
            }

            graph
                .outgoing
                .entry(file.relative_path.clone())
                .or_default()
                .extend(targets);
        }

        graph
    }

    /// Normalized targets a note links to.
    pub fn get_outgoing(&self, path: &str) -> &[String] {
        self.outgoing.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Notes linking to a normalized target.
    pub fn get_incoming(&self, target: &str) -> &[String] {
        self.incoming.get(target).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of links pointing at a note under any of its keys.
    pub fn inbound_count(&self, note: &NoteRecord) -> usize {
        note.keys().iter().map(|key| self.get_incoming(key).len()).sum()
    }

    /// Number of links leaving a note.
    pub fn outbound_count(&self, note: &NoteRecord) -> usize {
        self.get_outgoing(&note.relative_path).len()
    }

    /// Whether no other note links to this one. Self-links do not count.
    pub fn is_orphan(&self, note: &NoteRecord) -> bool {
        !note.keys().iter().any(|key| {
            self.get_incoming(key)
                .iter()
                .any(|source| *source != note.relative_path)
        })
    }

    /// Total number of links in the graph.
    pub fn total_links(&self) -> usize {
        self.outgoing.values().map(Vec::len).sum()
    }

    /// Number of distinct targets that receive at least one link.
    pub fn linked_target_count(&self) -> usize {
        self.incoming.len()
    }
}

/// A note ranked by link centrality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralFile {
    pub path: String,
    pub inbound_links: usize,
    pub outbound_links: usize,
    pub score: f64,
}

/// Link structure of a set of notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAnalysis {
    pub total_files: usize,
    pub total_links: usize,
    pub orphaned_files: Vec<String>,
    pub orphan_count: usize,
    pub avg_outbound_links: f64,
    /// Distinct linked targets divided by the number of files.
    pub avg_inbound_links: f64,
    /// Links divided by the square of the number of files.
    pub link_density: f64,
    /// Notes with a positive centrality score, highest first.
    pub central_files: Vec<CentralFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_connected_file: Option<String>,
    pub most_connected_links: usize,
}

/// Relative paths of notes that no other note links to, in input order.
pub fn find_orphans(files: &[NoteRecord]) -> Vec<String> {
    let graph = LinkGraph::build(files);
    orphans_in(&graph, files)
}

fn orphans_in(graph: &LinkGraph, files: &[NoteRecord]) -> Vec<String> {
    files
        .iter()
        .filter(|f| graph.is_orphan(f))
        .map(|f| f.relative_path.clone())
        .collect()
}

/// Analyze the link graph of a set of notes.
pub fn analyze_links(files: &[NoteRecord]) -> LinkAnalysis {
    let start = Instant::now();
    let graph = LinkGraph::build(files);
    let total_files = files.len();
    let total_links = graph.total_links();

    let orphaned_files = orphans_in(&graph, files);

    let (avg_outbound_links, avg_inbound_links, link_density) = if total_files == 0 {
        (0.0, 0.0, 0.0)
    } else {
        let n = total_files as f64;
        (
            total_links as f64 / n,
            graph.linked_target_count() as f64 / n,
            total_links as f64 / (n * n),
        )
    };

    let mut central_files: Vec<CentralFile> = files
        .iter()
        .map(|f| {
            let inbound_links = graph.inbound_count(f);
            let outbound_links = graph.outbound_count(f);
            CentralFile {
                path: f.relative_path.clone(),
                inbound_links,
                outbound_links,
                score: inbound_links as f64 * INBOUND_WEIGHT
                    + outbound_links as f64 * OUTBOUND_WEIGHT,
            }
        })
        .filter(|c| c.score > 0.0)
        .collect();
    central_files.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.path.cmp(&b.path)));

    let most_connected = central_files
        .iter()
        .map(|c| (c.inbound_links + c.outbound_links, &c.path))
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(a.1)));
    let (most_connected_file, most_connected_links) = match most_connected {
        Some((links, path)) => (Some(path.clone()), links),
        None => (None, 0),
    };

    tracing::debug!(
        files = total_files,
        links = total_links,
        orphans = orphaned_files.len(),
        elapsed = ?start.elapsed(),
        "link analysis"
    );

    LinkAnalysis {
        total_files,
        total_links,
        orphan_count: orphaned_files.len(),
        orphaned_files,
        avg_outbound_links,
        avg_inbound_links,
        link_density,
        central_files,
        most_connected_file,
        most_connected_links,
    }
}
