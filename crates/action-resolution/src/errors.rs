//! Error types for the resolution pipeline

use sightline_core_types::NodeId;
use thiserror::Error;

/// Errors the page driver can surface. Inside the uniqueness probing loop
/// these are swallowed per frame/selector pair; everywhere else they bubble
/// up as a failed resolution.
#[derive(Debug, Error, Clone)]
pub enum DriverError {
    #[error("driver timeout: {0}")]
    Timeout(String),

    #[error("driver transport: {0}")]
    Transport(String),

    #[error("invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    /// The requested id is not in the graph. The snapshot and the caller's
    /// view of it disagree.
    #[error("node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// An internal guarantee did not hold. Not retryable; a bug, not a
    /// state of the page.
    #[error("resolution contract violated: {check}")]
    ContractViolation { check: String },

    /// No unique live match, or the matched element is not actionable.
    /// Worth retrying against a fresh snapshot.
    #[error("failed to resolve node {id}: {reason}")]
    ResolutionFailed { id: NodeId, reason: String },
}

impl ResolveError {
    pub fn failed(id: &NodeId, reason: impl Into<String>) -> Self {
        Self::ResolutionFailed {
            id: id.clone(),
            reason: reason.into(),
        }
    }

    pub fn contract(check: impl Into<String>) -> Self {
        Self::ContractViolation {
            check: check.into(),
        }
    }

    /// Whether a fresh snapshot plus a new pass could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ResolutionFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failed_resolution_is_retryable() {
        let id = NodeId::from("B1");
        assert!(ResolveError::failed(&id, "no unique match").is_retryable());
        assert!(!ResolveError::contract("id mismatch").is_retryable());
        assert!(!ResolveError::NodeNotFound { id }.is_retryable());
    }
}
