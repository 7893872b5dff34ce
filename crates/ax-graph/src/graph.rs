use std::sync::Arc;

use sightline_core_types::{NodeId, SnapshotId};

use crate::attrs::AttributeRecord;
use crate::errors::GraphError;
use crate::model::{ComputedAttributes, NodeKind};
use crate::role::{NodeCategory, Role};

/// Index of a node inside its graph's arena. Only meaningful together with
/// the graph that allocated it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct NodeIdx(pub(crate) u32);

impl NodeIdx {
    pub(crate) fn get(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) id: Option<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) role: Role,
    pub(crate) text: String,
    pub(crate) children: Vec<NodeIdx>,
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) attributes: Option<Arc<AttributeRecord>>,
    pub(crate) computed: ComputedAttributes,
    pub(crate) subtree_ids: Vec<NodeId>,
}

/// One snapshot's accessibility tree, flattened into an arena.
///
/// The graph is immutable once built: a new capture produces a new graph
/// with a new [`SnapshotId`], and filtered views are fresh graphs that keep
/// the id of the snapshot they were derived from. Nodes are addressed by
/// index internally and borrowed out as [`NodeRef`] handles.
#[derive(Clone, Debug)]
pub struct DomGraph {
    snapshot: SnapshotId,
    nodes: Vec<NodeData>,
    root: NodeIdx,
}

impl DomGraph {
    pub(crate) fn from_parts(snapshot: SnapshotId, nodes: Vec<NodeData>, root: NodeIdx) -> Self {
        Self {
            snapshot,
            nodes,
            root,
        }
    }

    pub fn snapshot(&self) -> &SnapshotId {
        &self.snapshot
    }

    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Locates the interaction node carrying `id`, anywhere in the tree.
    /// A match that cannot be coerced is a contract violation, not a miss.
    pub fn find(&self, id: &NodeId) -> Result<Option<InteractionNode<'_>>, GraphError> {
        self.root().find(id)
    }

    pub(crate) fn node(&self, idx: NodeIdx) -> NodeRef<'_> {
        NodeRef { graph: self, idx }
    }

    pub(crate) fn data(&self, idx: NodeIdx) -> &NodeData {
        &self.nodes[idx.get()]
    }

    pub(crate) fn root_idx(&self) -> NodeIdx {
        self.root
    }
}

/// Borrowing handle to one node of a [`DomGraph`].
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    pub(crate) graph: &'a DomGraph,
    pub(crate) idx: NodeIdx,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        self.graph.data(self.idx)
    }

    pub fn id(&self) -> Option<&'a NodeId> {
        self.data().id.as_ref()
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn role(&self) -> &'a Role {
        &self.data().role
    }

    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    pub fn attributes(&self) -> Option<&'a AttributeRecord> {
        self.data().attributes.as_deref()
    }

    pub fn computed(&self) -> &'a ComputedAttributes {
        &self.data().computed
    }

    /// Ids of every id-carrying node in this subtree, this node included.
    pub fn subtree_ids(&self) -> &'a [NodeId] {
        &self.data().subtree_ids
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        let graph = self.graph;
        self.data().children.iter().map(move |&idx| graph.node(idx))
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|idx| self.graph.node(idx))
    }

    pub fn is_interaction(&self) -> bool {
        let data = self.data();
        if !data.role.is_known() || data.id.is_none() {
            return false;
        }
        data.kind == NodeKind::Interaction
            || data.role.category() == Some(NodeCategory::Interaction)
    }

    pub fn is_image(&self) -> bool {
        self.data().id.is_some() && self.data().role.category() == Some(NodeCategory::Image)
    }

    /// Pre-order traversal of this subtree. With `only_interaction` only
    /// interaction nodes are collected, but descent never stops early.
    pub fn flatten(&self, only_interaction: bool) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        let mut stack = vec![self.idx];
        while let Some(idx) = stack.pop() {
            let node = self.graph.node(idx);
            if !only_interaction || node.is_interaction() {
                out.push(node);
            }
            for &child in self.graph.data(idx).children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Visible text of this subtree. Text nodes yield their own text;
    /// every other node joins its children's text with single spaces.
    ///
    /// A child is excluded only when a flag says so explicitly: hidden set
    /// to true, or visible/enabled set to false. An absent flag never
    /// excludes.
    pub fn inner_text(&self) -> String {
        if self.kind() == NodeKind::Text {
            return self.text().to_string();
        }
        let mut parts: Vec<String> = Vec::new();
        for child in self.children() {
            let text = child.inner_text();
            if text.is_empty() || child.excluded_from_text() {
                continue;
            }
            parts.push(text);
        }
        parts.join(" ")
    }

    fn excluded_from_text(&self) -> bool {
        match self.attributes() {
            Some(attrs) => {
                attrs.hidden == Some(true)
                    || attrs.visible == Some(false)
                    || attrs.enabled == Some(false)
            }
            None => false,
        }
    }

    /// Depth-first search for the node carrying `id`, coerced on match.
    pub fn find(&self, id: &NodeId) -> Result<Option<InteractionNode<'a>>, GraphError> {
        if self.id() == Some(id) {
            return self.to_interaction().map(Some);
        }
        for child in self.children() {
            if let Some(found) = child.find(id)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Checked coercion into an [`InteractionNode`]. Wrong kind, missing id
    /// or remaining children each violate the coercion contract; nothing is
    /// dropped silently to force a success.
    pub fn to_interaction(&self) -> Result<InteractionNode<'a>, GraphError> {
        let data = self.data();
        if data.kind != NodeKind::Interaction {
            return Err(GraphError::contract(format!(
                "only interaction nodes can be coerced, got kind={:?} id={:?} role={} text={:?}",
                data.kind, data.id, data.role, data.text
            )));
        }
        let id = match data.id.as_ref() {
            Some(id) => id,
            None => {
                return Err(GraphError::contract(
                    "interaction node must carry a non-empty id",
                ))
            }
        };
        if !data.children.is_empty() {
            return Err(GraphError::contract(format!(
                "interaction node {id} must have no children, found {}",
                data.children.len()
            )));
        }
        Ok(InteractionNode { node: *self, id })
    }

    /// All interaction nodes of this subtree, coerced. Any single coercion
    /// failure fails the whole call.
    pub fn interaction_nodes(&self) -> Result<Vec<InteractionNode<'a>>, GraphError> {
        self.flatten(true)
            .into_iter()
            .map(|node| node.to_interaction())
            .collect()
    }

    /// Image-category nodes of this subtree that carry an id.
    pub fn image_nodes(&self) -> Vec<NodeRef<'a>> {
        self.flatten(false)
            .into_iter()
            .filter(|node| node.is_image())
            .collect()
    }
}

/// A node that is guaranteed actionable: interaction kind, id present, no
/// children. Built only through [`NodeRef::to_interaction`].
#[derive(Clone, Copy, Debug)]
pub struct InteractionNode<'a> {
    node: NodeRef<'a>,
    id: &'a NodeId,
}

impl<'a> InteractionNode<'a> {
    pub fn id(&self) -> &'a NodeId {
        self.id
    }

    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    pub fn role(&self) -> &'a Role {
        self.node.role()
    }

    pub fn text(&self) -> &'a str {
        self.node.text()
    }

    pub fn attributes(&self) -> Option<&'a AttributeRecord> {
        self.node.attributes()
    }

    pub fn computed(&self) -> &'a ComputedAttributes {
        self.node.computed()
    }
}
