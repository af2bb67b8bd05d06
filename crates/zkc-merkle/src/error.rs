//! Error types for the Merkle tree engine.

use zkc_crypto::HashError;

/// Errors that can occur during tree operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Depth outside `1..=MAX_DEPTH`.
    #[error("invalid tree depth {0}")]
    InvalidDepth(usize),

    /// Leaf index outside `0..leaves`.
    #[error("invalid leaf index {index} (tree has {leaves} leaves)")]
    InvalidLeafIndex {
        /// The requested index.
        index: usize,
        /// Number of leaves in the tree.
        leaves: usize,
    },

    /// The node buffer for this depth could not be allocated.
    #[error("cannot allocate a tree of depth {depth}")]
    Capacity {
        /// The requested depth.
        depth: usize,
    },

    /// Combining two nodes failed.
    #[error("compute hash: {0}")]
    Hash(#[from] HashError),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
