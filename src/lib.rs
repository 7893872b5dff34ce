//! Sightline library
//!
//! Umbrella over the workspace crates, in data-flow order: raw
//! accessibility captures become immutable node graphs, node picks
//! against those graphs become verified live-page locators.

pub use action_resolution as resolution;
pub use ax_graph as graph;
pub use sightline_core_types as core_types;

// Re-export commonly used types for external use
pub use action_resolution::{
    ActionNodeResolutionPipe, ActionRequest, PageDriver, ResolutionPolicy, ResolveError,
    ResolvedAction, SelectorBundle,
};
pub use ax_graph::{
    AttributeDiagnostics, DomGraph, NodeRole, ProcessedSnapshot, RawAxNode, Role,
    SnapshotMetadata,
};
pub use sightline_core_types::{FrameId, NodeId, PageId, SnapshotId};
