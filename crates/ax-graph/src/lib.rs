//! Accessibility node graph - snapshot model & tree algorithms
//!
//! This crate turns one raw accessibility snapshot into an immutable,
//! queryable node graph:
//! - attribute normalization with bounded unknown-key diagnostics
//! - arena-backed tree with borrowed node handles
//! - traversal, text aggregation, pruning and role filtering
//! - checked coercion into actionable interaction nodes

pub mod attrs;
pub mod diagnostics;
pub mod errors;
pub mod filter;
pub mod graph;
pub mod ingest;
pub mod model;
pub mod raw;
pub mod role;
pub mod snapshot;

pub use attrs::*;
pub use diagnostics::*;
pub use errors::*;
pub use graph::*;
pub use model::*;
pub use raw::*;
pub use role::*;
pub use snapshot::*;
