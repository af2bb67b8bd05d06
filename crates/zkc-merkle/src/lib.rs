//! Fixed-depth Merkle accumulator over BN254 field elements.
//!
//! The tree is a complete binary tree stored in one contiguous buffer with
//! the root at index 0. Nodes are combined with Poseidon. Empty trees are
//! seeded with a single repeated leaf value, single leaves are updated in
//! place, and inclusion proofs are read straight out of the buffer.
//!
//! A [`Tree`] is mutated through `&mut self`, so the borrow checker already
//! enforces one writer and no concurrent readers during an update. Share a
//! tree across threads behind a lock if it must be written concurrently.

pub mod config;
pub mod error;
pub mod index;
pub mod proof;
pub mod tree;

pub use config::TreeConfig;
pub use error::{TreeError, TreeResult};
pub use proof::Proof;
pub use tree::{Tree, TreeNode, MAX_DEPTH, TREE_DEPTH};
