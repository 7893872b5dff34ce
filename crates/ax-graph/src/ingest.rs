use std::sync::Arc;

use sightline_core_types::{NodeId, SnapshotId};
use tracing::debug;

use crate::attrs::AttributeRecord;
use crate::diagnostics::AttributeDiagnostics;
use crate::graph::{DomGraph, NodeData, NodeIdx};
use crate::model::{ComputedAttributes, NodeKind};
use crate::raw::RawAxNode;
use crate::role::{NodeCategory, Role};

impl DomGraph {
    /// Builds the arena for one raw snapshot. Mints a fresh [`SnapshotId`];
    /// node ids are lifted from the payload and never invented here.
    ///
    /// Unknown attribute keys land in `diagnostics`; the caller decides
    /// when to flush them.
    pub fn from_raw(raw: &RawAxNode, diagnostics: &AttributeDiagnostics) -> Self {
        let mut nodes = Vec::new();
        let root = build_node(raw, diagnostics, &mut nodes);
        let graph = Self::from_parts(SnapshotId::new(), nodes, root);
        debug!(
            target: "ax_graph.ingest",
            snapshot = %graph.snapshot(),
            node_count = graph.len(),
            "graph.ingest.completed"
        );
        graph
    }
}

fn build_node(
    raw: &RawAxNode,
    diagnostics: &AttributeDiagnostics,
    out: &mut Vec<NodeData>,
) -> NodeIdx {
    let children: Vec<NodeIdx> = raw
        .children
        .iter()
        .map(|child| build_node(child, diagnostics, out))
        .collect();

    let id = raw.id.as_ref().map(|raw_id| NodeId::from(raw_id.as_str()));
    let role = Role::from_raw(&raw.role);

    // An id means the capture considered the node actionable; a textual
    // role overrides that. Classified here, once, never recomputed.
    let mut kind = if id.is_some() {
        NodeKind::Interaction
    } else {
        NodeKind::Other
    };
    if role.category() == Some(NodeCategory::Text) {
        kind = NodeKind::Text;
    }

    let attribute_keys = raw.attribute_keys();
    let attributes = if attribute_keys.is_empty() {
        None
    } else {
        Some(Arc::new(AttributeRecord::from_raw_keys(
            &attribute_keys,
            diagnostics,
        )))
    };

    let mut subtree_ids: Vec<NodeId> = id.iter().cloned().collect();
    for &child in &children {
        subtree_ids.extend_from_slice(&out[child.get()].subtree_ids);
    }

    let me = NodeIdx(out.len() as u32);
    for &child in &children {
        out[child.get()].parent = Some(me);
    }
    out.push(NodeData {
        id,
        kind,
        role,
        text: raw.name.clone(),
        children,
        parent: None,
        attributes,
        computed: ComputedAttributes {
            in_viewport: raw.in_viewport.unwrap_or(false),
            is_interactive: raw.is_interactive.unwrap_or(false),
            is_top_element: raw.is_top_element.unwrap_or(false),
            shadow_root: raw.shadow_root.unwrap_or(false),
            highlight_index: raw.highlight_index,
        },
        subtree_ids,
    });
    me
}
