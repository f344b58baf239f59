use thiserror::Error;

/// Recoverable failures of the public tree API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Indexed access to a key that is not stored in the tree.
    #[error("key not found")]
    KeyNotFound,
}

/// A broken structural invariant, reported by the `assert_valid` checkers.
///
/// Seeing one of these means the tree code itself is defective; it is never
/// produced by a correct sequence of public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root has a parent")]
    RootHasParent,
    #[error("broken parent link on child of node {node}")]
    BrokenParentLink { node: u32 },
    #[error("balance factor mismatch at node {node}: expected {expected}, got {actual}")]
    BalanceMismatch { node: u32, expected: i64, actual: i8 },
    #[error("AVL balance violated at node {node}")]
    Unbalanced { node: u32 },
    #[error("node order violated at node {node}")]
    OrderViolated { node: u32 },
}
