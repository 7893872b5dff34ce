use std::time::SystemTime;

use sightline_core_types::SnapshotId;

use crate::graph::DomGraph;

#[derive(Clone, Debug)]
pub struct SnapshotMetadata {
    pub url: String,
    pub title: String,
    pub captured_at: SystemTime,
}

impl SnapshotMetadata {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            captured_at: SystemTime::now(),
        }
    }
}

/// One capture, fully processed: page context plus the built graph.
/// Collaborators read it; nothing here mutates after construction.
#[derive(Clone, Debug)]
pub struct ProcessedSnapshot {
    pub metadata: SnapshotMetadata,
    pub graph: DomGraph,
}

impl ProcessedSnapshot {
    pub fn new(metadata: SnapshotMetadata, graph: DomGraph) -> Self {
        Self { metadata, graph }
    }

    pub fn id(&self) -> &SnapshotId {
        self.graph.snapshot()
    }
}
