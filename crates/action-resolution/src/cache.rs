use std::collections::HashMap;

use ax_graph::DomGraph;
use sightline_core_types::{NodeId, SnapshotId};
use tracing::debug;

use crate::types::SelectorBundle;

/// Selector bundles resolved so far, keyed by node id and scoped to one
/// snapshot epoch.
///
/// The graph itself stays immutable; this side table is the only mutable
/// resolution state. An entry is written at most once per snapshot, and
/// offering a graph from a different snapshot resets the table. Filtered
/// views keep their source snapshot's id, so entries survive filtering.
#[derive(Debug, Default)]
pub struct SelectorCache {
    snapshot: Option<SnapshotId>,
    entries: HashMap<NodeId, SelectorBundle>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached bundle for `id`, if this cache is tracking the graph's
    /// snapshot. A stale cache never answers; it waits for the next fill
    /// to retarget.
    pub fn get(&self, graph: &DomGraph, id: &NodeId) -> Option<&SelectorBundle> {
        if self.snapshot.as_ref() != Some(graph.snapshot()) {
            return None;
        }
        self.entries.get(id)
    }

    /// Stores a bundle for `id`, insert-if-absent: a second fill for the
    /// same node in the same snapshot keeps the first bundle. Retargets
    /// (and clears) the table when the graph belongs to a new snapshot.
    pub fn fill(&mut self, graph: &DomGraph, id: &NodeId, bundle: SelectorBundle) -> &SelectorBundle {
        if self.snapshot.as_ref() != Some(graph.snapshot()) {
            if self.snapshot.is_some() {
                debug!(
                    target: "resolution.cache",
                    snapshot = %graph.snapshot(),
                    dropped = self.entries.len(),
                    "resolution.cache.retargeted"
                );
            }
            self.snapshot = Some(graph.snapshot().clone());
            self.entries.clear();
        }
        self.entries.entry(id.clone()).or_insert(bundle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
