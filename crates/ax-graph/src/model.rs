/// Coarse node kind, assigned once at ingest and never recomputed.
///
/// A node is `Interaction` when the capture assigned it an id, unless its
/// role classifies as textual, in which case `Text` wins.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    Text,
    Interaction,
    Other,
}

/// Flags the capture engine computed for a node. Copied verbatim from the
/// raw payload; a missing flag means false here, unlike the optional raw
/// attributes, which keep their absence.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComputedAttributes {
    pub in_viewport: bool,
    pub is_interactive: bool,
    pub is_top_element: bool,
    pub shadow_root: bool,
    pub highlight_index: Option<i64>,
}
