use sightline_core_types::NodeId;

use crate::errors::GraphError;
use crate::graph::{DomGraph, NodeData, NodeIdx, NodeRef};
use crate::role::{NodeRole, Role};

impl DomGraph {
    /// Rebuilds the graph keeping only nodes the predicate accepts. A
    /// rejected node takes its whole subtree with it. Accepted nodes that
    /// end up carrying nothing (no id, no surviving children, no trimmed
    /// text) are dropped as dead branches.
    ///
    /// Returns `None` when the root itself does not survive. The filtered
    /// graph keeps this snapshot's id, so caches keyed on it stay valid.
    pub fn subtree_filter<F>(&self, pred: F) -> Option<DomGraph>
    where
        F: Fn(NodeRef<'_>) -> bool,
    {
        let mut nodes = Vec::new();
        let root = copy_filtered(self, self.root_idx(), &pred, &mut nodes)?;
        Some(DomGraph::from_parts(self.snapshot().clone(), nodes, root))
    }

    /// Drops every node whose known role is in `roles`. Unknown roles are
    /// never dropped here; only an explicit classification can exclude a
    /// node. An empty survivor set is an error, not an empty graph.
    pub fn subtree_without(&self, roles: &[NodeRole]) -> Result<DomGraph, GraphError> {
        self.subtree_filter(|node| match node.role() {
            Role::Unknown(_) => true,
            Role::Known(role) => !roles.contains(role),
        })
        .ok_or_else(|| GraphError::empty_after(format!("subtree_without(roles={roles:?})")))
    }
}

fn copy_filtered<F>(
    graph: &DomGraph,
    idx: NodeIdx,
    pred: &F,
    out: &mut Vec<NodeData>,
) -> Option<NodeIdx>
where
    F: Fn(NodeRef<'_>) -> bool,
{
    if !pred(graph.node(idx)) {
        return None;
    }
    let data = graph.data(idx);
    let mut children = Vec::new();
    for &child in &data.children {
        if let Some(kept) = copy_filtered(graph, child, pred, out) {
            children.push(kept);
        }
    }
    if data.id.is_none() && children.is_empty() && data.text.trim().is_empty() {
        return None;
    }

    let mut subtree_ids: Vec<NodeId> = data.id.iter().cloned().collect();
    for &child in &children {
        subtree_ids.extend_from_slice(&out[child.get()].subtree_ids);
    }
    let me = NodeIdx(out.len() as u32);
    for &child in &children {
        out[child.get()].parent = Some(me);
    }
    out.push(NodeData {
        id: data.id.clone(),
        kind: data.kind,
        role: data.role.clone(),
        text: data.text.clone(),
        children,
        parent: None,
        attributes: data.attributes.clone(),
        computed: data.computed.clone(),
        subtree_ids,
    });
    Some(me)
}

impl<'a> NodeRef<'a> {
    /// Highest nodes of this subtree matching the predicate. Descent stops
    /// at a match, so no returned node is inside another.
    pub fn find_matching_subtrees<F>(&self, pred: F) -> Vec<NodeRef<'a>>
    where
        F: Fn(NodeRef<'_>) -> bool,
    {
        let mut matches = Vec::new();
        collect_matches(*self, &pred, &mut matches);
        matches
    }

    /// When any in-viewport dialog exists, attention narrows to the dialog
    /// subtrees; otherwise the node stands as is.
    pub fn prune_non_dialogs_if_present(&self) -> Vec<NodeRef<'a>> {
        let dialogs = self.find_matching_subtrees(|node| {
            matches!(node.role(), Role::Known(NodeRole::Dialog)) && node.computed().in_viewport
        });
        if dialogs.is_empty() {
            vec![*self]
        } else {
            dialogs
        }
    }
}

fn collect_matches<'a, F>(node: NodeRef<'a>, pred: &F, out: &mut Vec<NodeRef<'a>>)
where
    F: Fn(NodeRef<'_>) -> bool,
{
    if pred(node) {
        out.push(node);
        return;
    }
    for child in node.children() {
        collect_matches(child, pred, out);
    }
}
