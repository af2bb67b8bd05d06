use serde::{Deserialize, Serialize};
use zkc_crypto::{poseidon_pair, HashError};
use zkc_types::FieldElement;

use crate::tree::TreeNode;

/// Merkle inclusion proof.
///
/// `path` has one entry per tree level: the first `depth - 1` entries are
/// the siblings from the leaf upward and the last entry is the root the
/// proof was taken against. Downstream verifiers rely on that trailing root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Siblings from leaf to root, then the root.
    pub path: Vec<TreeNode>,
    /// Bit `k` is set when the node at level `k` is a right child.
    pub indices: u64,
}

impl Proof {
    /// The sibling entries, without the trailing root.
    pub fn siblings(&self) -> &[TreeNode] {
        match self.path.split_last() {
            Some((_, siblings)) => siblings,
            None => &[],
        }
    }

    /// The root entry appended to the path.
    pub fn root(&self) -> Option<&TreeNode> {
        self.path.last()
    }

    /// Fold `leaf` up through the siblings.
    pub fn compute_root(&self, leaf: &FieldElement) -> Result<FieldElement, HashError> {
        let mut current = *leaf;
        for (level, sibling) in self.siblings().iter().enumerate() {
            current = if (self.indices >> level) & 1 == 1 {
                poseidon_pair(sibling.value(), &current)?
            } else {
                poseidon_pair(&current, sibling.value())?
            };
        }
        Ok(current)
    }

    /// Recompute the root from `leaf` and compare it with the root entry.
    pub fn verify(&self, leaf: &FieldElement) -> Result<bool, HashError> {
        let Some(root) = self.root() else {
            return Ok(false);
        };
        Ok(self.compute_root(leaf)? == root.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    fn fe(v: u64) -> FieldElement {
        FieldElement::from_u64(v)
    }

    fn sample_tree() -> Tree {
        Tree::from_leaves(4, fe(0), &[fe(11), fe(12), fe(13), fe(14), fe(15)]).unwrap()
    }

    #[test]
    fn proof_verifies_for_all_leaves() {
        let tree = sample_tree();
        for i in 0..tree.leaves_count() {
            let leaf = tree.leaf(i).unwrap();
            let proof = tree.proof(i).unwrap();
            assert!(proof.verify(&leaf).unwrap(), "proof for leaf {i} should verify");
        }
    }

    #[test]
    fn tampered_leaf_fails() {
        let tree = sample_tree();
        let proof = tree.proof(2).unwrap();
        assert!(!proof.verify(&fe(99)).unwrap());
    }

    #[test]
    fn flipped_direction_bit_fails() {
        let tree = sample_tree();
        let mut proof = tree.proof(2).unwrap();
        proof.indices ^= 1;
        assert!(!proof.verify(&fe(13)).unwrap());
    }

    #[test]
    fn siblings_exclude_root() {
        let tree = sample_tree();
        let proof = tree.proof(0).unwrap();
        assert_eq!(proof.siblings().len(), 3);
        assert_eq!(proof.root(), Some(&tree.root()));
    }

    #[test]
    fn empty_path_never_verifies() {
        let proof = Proof { path: vec![], indices: 0 };
        assert!(proof.siblings().is_empty());
        assert!(!proof.verify(&fe(1)).unwrap());
    }

    #[test]
    fn wire_format() {
        let tree = Tree::from_leaves(2, fe(0), &[fe(1), fe(2)]).unwrap();
        let proof = tree.proof(1).unwrap();
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["indices"], 1);
        assert_eq!(json["path"][0], "1");
        assert_eq!(json["path"][1], tree.root().0.to_string());

        let parsed: Proof = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, proof);
        assert!(parsed.verify(&fe(2)).unwrap());
    }
}
