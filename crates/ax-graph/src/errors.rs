use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A structural guarantee the graph is supposed to uphold did not hold.
    /// Fatal for the current snapshot; retrying without a fresh capture
    /// cannot help.
    #[error("graph contract violated: {check}")]
    ContractViolation { check: String },
    /// A filter removed every node, including the root.
    #[error("graph empty after {operation}")]
    EmptyAfterFilter { operation: String },
}

impl GraphError {
    pub fn contract(check: impl Into<String>) -> Self {
        Self::ContractViolation {
            check: check.into(),
        }
    }

    pub fn empty_after(operation: impl Into<String>) -> Self {
        Self::EmptyAfterFilter {
            operation: operation.into(),
        }
    }
}
