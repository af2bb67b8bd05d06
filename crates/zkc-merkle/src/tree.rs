use serde::{Deserialize, Serialize};
use tracing::debug;
use zkc_crypto::poseidon_pair;
use zkc_types::FieldElement;

use crate::error::{TreeError, TreeResult};
use crate::index::{children_indices, is_right_child, parent_index, sibling_index};
use crate::proof::Proof;

/// Tree depth used by the production registry.
pub const TREE_DEPTH: usize = 32;

/// Deepest tree the engine will build: the node count `2^depth - 1` must
/// fit a `usize` on the target, and the proof bitmask a `u64`.
pub const MAX_DEPTH: usize = usize::BITS as usize - 1;

/// One node of the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeNode(pub FieldElement);

impl TreeNode {
    pub fn value(&self) -> &FieldElement {
        &self.0
    }
}

impl From<FieldElement> for TreeNode {
    fn from(value: FieldElement) -> Self {
        Self(value)
    }
}

/// Fixed-depth complete binary tree of field elements.
///
/// Stored as `2^depth - 1` nodes with the root at index 0 and the leaves in
/// the last `2^(depth-1)` slots. Every internal node is
/// `Poseidon(left, right)` of its children after every public operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Build a tree whose every leaf is `leaf_value`.
    ///
    /// All nodes on one level are equal, so each level's value is hashed
    /// once and copied across the level.
    pub fn new_empty(depth: usize, leaf_value: FieldElement) -> TreeResult<Self> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(TreeError::InvalidDepth(depth));
        }

        // level_values[0] is the leaf level, level_values[depth - 1] the root.
        let mut level_values = Vec::with_capacity(depth);
        let mut value = leaf_value;
        level_values.push(value);
        for _ in 1..depth {
            value = poseidon_pair(&value, &value)?;
            level_values.push(value);
        }

        let total = (1usize << depth) - 1;
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(total)
            .map_err(|_| TreeError::Capacity { depth })?;
        for (level, value) in level_values.iter().rev().enumerate() {
            nodes.resize(nodes.len() + (1usize << level), TreeNode(*value));
        }

        debug!(depth, nodes = total, root = %value, "built empty tree");
        Ok(Self { nodes })
    }

    /// Build a tree of the given depth, seed it with `empty_leaf` and write
    /// `leaves` into the first slots in order.
    pub fn from_leaves(
        depth: usize,
        empty_leaf: FieldElement,
        leaves: &[FieldElement],
    ) -> TreeResult<Self> {
        let mut tree = Self::new_empty(depth, empty_leaf)?;
        for (index, leaf) in leaves.iter().enumerate() {
            tree.set_leaf(index, *leaf)?;
        }
        Ok(tree)
    }

    /// Overwrite leaf `index` and recompute its ancestors up to the root.
    ///
    /// The new ancestor values are all computed before any slot is written,
    /// so a failure leaves the tree unchanged.
    pub fn set_leaf(&mut self, index: usize, value: FieldElement) -> TreeResult<()> {
        let mut j = self.leaf_slot(index)?;

        let mut updates = Vec::with_capacity(self.depth());
        let mut current = TreeNode(value);
        updates.push((j, current));

        while j > 0 {
            let sibling = self.nodes[sibling_index(j)];
            let (left, right) = if is_right_child(j) {
                (sibling, current)
            } else {
                (current, sibling)
            };
            current = TreeNode(poseidon_pair(left.value(), right.value())?);
            j = parent_index(j);
            updates.push((j, current));
        }

        for (slot, node) in updates {
            self.nodes[slot] = node;
        }

        debug!(index, %value, root = %self.root().0, "set leaf");
        Ok(())
    }

    /// Inclusion proof for leaf `index`.
    ///
    /// The path holds the `depth - 1` siblings from the leaf upward followed
    /// by the root itself, and bit `k` of `indices` is set when the node at
    /// level `k` sits in a right (even-index) slot.
    pub fn proof(&self, index: usize) -> TreeResult<Proof> {
        let mut j = self.leaf_slot(index)?;

        let mut path = Vec::with_capacity(self.depth());
        let mut indices = 0u64;
        let mut level = 0u32;

        while j > 0 {
            if is_right_child(j) {
                indices |= 1 << level;
            }
            path.push(self.nodes[sibling_index(j)]);
            j = parent_index(j);
            level += 1;
        }
        path.push(self.root());

        Ok(Proof { path, indices })
    }

    /// Current value of leaf `index`.
    pub fn leaf(&self, index: usize) -> TreeResult<FieldElement> {
        let slot = self.leaf_slot(index)?;
        Ok(self.nodes[slot].0)
    }

    pub fn root(&self) -> TreeNode {
        self.nodes[0]
    }

    pub fn leaves_count(&self) -> usize {
        (self.nodes.len() + 1) / 2
    }

    pub fn depth(&self) -> usize {
        (self.nodes.len() + 1).trailing_zeros() as usize
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Check that every internal node is the hash of its children.
    pub fn is_consistent(&self) -> TreeResult<bool> {
        let internal = self.nodes.len() - self.leaves_count();
        for i in 0..internal {
            let (left, right) = children_indices(i);
            let expected = poseidon_pair(self.nodes[left].value(), self.nodes[right].value())?;
            if self.nodes[i].0 != expected {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn leaf_slot(&self, index: usize) -> TreeResult<usize> {
        let leaves = self.leaves_count();
        if index >= leaves {
            return Err(TreeError::InvalidLeafIndex { index, leaves });
        }
        Ok(self.nodes.len() - leaves + index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    fn h(a: FieldElement, b: FieldElement) -> FieldElement {
        poseidon_pair(&a, &b).unwrap()
    }

    #[test]
    fn depth_zero_is_rejected() {
        assert_eq!(Tree::new_empty(0, fe(1)), Err(TreeError::InvalidDepth(0)));
        assert_eq!(
            Tree::new_empty(MAX_DEPTH + 1, fe(1)),
            Err(TreeError::InvalidDepth(MAX_DEPTH + 1))
        );
        assert_eq!(MAX_DEPTH, usize::BITS as usize - 1);
    }

    #[test]
    fn depth_one_tree_is_a_single_leaf() {
        let mut tree = Tree::new_empty(1, fe(5)).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.leaves_count(), 1);
        assert_eq!(tree.root().0, fe(5));

        tree.set_leaf(0, fe(9)).unwrap();
        assert_eq!(tree.root().0, fe(9));

        let proof = tree.proof(0).unwrap();
        assert_eq!(proof.path, vec![TreeNode(fe(9))]);
        assert_eq!(proof.indices, 0);
    }

    #[test]
    fn empty_tree_shape_and_root() {
        for depth in 1..=6 {
            let e = fe(77);
            let tree = Tree::new_empty(depth, e).unwrap();
            assert_eq!(tree.nodes().len(), (1 << depth) - 1);
            assert_eq!(tree.leaves_count(), 1 << (depth - 1));
            assert_eq!(tree.depth(), depth);

            let mut expected = e;
            for _ in 1..depth {
                expected = h(expected, expected);
            }
            assert_eq!(tree.root().0, expected);
            assert!(tree.is_consistent().unwrap());
        }
    }

    #[test]
    fn depth_two_scenario() {
        let (e, a, b) = (fe(1), fe(2), fe(3));
        let mut tree = Tree::new_empty(2, e).unwrap();
        tree.set_leaf(0, a).unwrap();
        tree.set_leaf(1, b).unwrap();
        assert_eq!(tree.root().0, h(a, b));

        let proof = tree.proof(0).unwrap();
        assert_eq!(proof.path, vec![TreeNode(b), TreeNode(h(a, b))]);
        assert_eq!(proof.indices, 0);

        let proof = tree.proof(1).unwrap();
        assert_eq!(proof.path, vec![TreeNode(a), TreeNode(h(a, b))]);
        assert_eq!(proof.indices, 1);
    }

    #[test]
    fn proof_bits_follow_even_slots() {
        // Depth 3: leaves live in slots 3..=6.
        let tree = Tree::new_empty(3, fe(0)).unwrap();
        // leaf 0 -> slot 3 (odd), parent 1 (odd)
        assert_eq!(tree.proof(0).unwrap().indices, 0b00);
        // leaf 1 -> slot 4 (even), parent 1 (odd)
        assert_eq!(tree.proof(1).unwrap().indices, 0b01);
        // leaf 2 -> slot 5 (odd), parent 2 (even)
        assert_eq!(tree.proof(2).unwrap().indices, 0b10);
        // leaf 3 -> slot 6 (even), parent 2 (even)
        assert_eq!(tree.proof(3).unwrap().indices, 0b11);
    }

    #[test]
    fn out_of_range_index_is_rejected_without_mutation() {
        let mut tree = Tree::new_empty(3, fe(0)).unwrap();
        let before = tree.clone();
        assert_eq!(
            tree.set_leaf(4, fe(1)),
            Err(TreeError::InvalidLeafIndex { index: 4, leaves: 4 })
        );
        assert_eq!(tree, before);
        assert!(matches!(
            tree.proof(4),
            Err(TreeError::InvalidLeafIndex { .. })
        ));
        assert!(tree.leaf(4).is_err());
    }

    #[test]
    fn proof_length_equals_depth() {
        let tree = Tree::new_empty(5, fe(3)).unwrap();
        for i in 0..tree.leaves_count() {
            let proof = tree.proof(i).unwrap();
            assert_eq!(proof.path.len(), 5);
            assert_eq!(proof.path.last(), Some(&tree.root()));
        }
    }

    #[test]
    fn from_leaves_matches_manual_updates() {
        let leaves = [fe(10), fe(20), fe(30)];
        let tree = Tree::from_leaves(3, fe(0), &leaves).unwrap();
        let mut manual = Tree::new_empty(3, fe(0)).unwrap();
        for (i, leaf) in leaves.iter().enumerate() {
            manual.set_leaf(i, *leaf).unwrap();
        }
        assert_eq!(tree, manual);
        assert_eq!(tree.leaf(2).unwrap(), fe(30));
        assert_eq!(tree.leaf(3).unwrap(), fe(0));
    }

    #[test]
    fn too_many_leaves_fail() {
        let leaves: Vec<FieldElement> = (0..5).map(fe).collect();
        assert!(matches!(
            Tree::from_leaves(3, fe(0), &leaves),
            Err(TreeError::InvalidLeafIndex { index: 4, leaves: 4 })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn updated_leaf_proof_reconstructs_root(
            depth in 1usize..=6,
            seed in any::<u64>(),
            raw_index in any::<usize>(),
            value in any::<u64>(),
        ) {
            let mut tree = Tree::new_empty(depth, fe(seed)).unwrap();
            let index = raw_index % tree.leaves_count();
            tree.set_leaf(index, fe(value)).unwrap();

            let proof = tree.proof(index).unwrap();
            prop_assert_eq!(proof.compute_root(&fe(value)).unwrap(), tree.root().0);
            prop_assert!(proof.verify(&fe(value)).unwrap());
            prop_assert!(tree.is_consistent().unwrap());
        }

        #[test]
        fn update_only_touches_shared_ancestors(
            depth in 2usize..=6,
            raw_i in any::<usize>(),
            raw_j in any::<usize>(),
            value in any::<u64>(),
        ) {
            let mut tree = Tree::new_empty(depth, fe(1)).unwrap();
            let leaves = tree.leaves_count();
            let (i, j) = (raw_i % leaves, raw_j % leaves);
            prop_assume!(i != j);

            let before = tree.proof(j).unwrap();
            tree.set_leaf(i, fe(value)).unwrap();
            let after = tree.proof(j).unwrap();

            // The paths of i and j join at level `meet`. Below it j's
            // siblings lie outside i's subtree; from it upward the ancestors
            // are shared and their siblings are off i's path. Only the
            // sibling at `meet - 1` is i's own ancestor.
            let meet = (usize::BITS - (i ^ j).leading_zeros()) as usize;
            let siblings = depth - 1;
            for level in 0..siblings {
                if level + 1 == meet {
                    continue;
                }
                prop_assert_eq!(before.path[level], after.path[level]);
            }
            let mut slot = leaves - 1 + i;
            for _ in 1..meet {
                slot = crate::index::parent_index(slot);
            }
            prop_assert_eq!(after.path[meet - 1], tree.nodes()[slot]);
            prop_assert_eq!(before.indices, after.indices);
        }
    }
}
