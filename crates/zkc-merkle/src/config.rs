use serde::{Deserialize, Serialize};
use zkc_crypto::empty_leaf_value;

use crate::error::TreeResult;
use crate::tree::{Tree, TREE_DEPTH};

/// Configuration for building registry trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Number of levels, leaves included.
    pub depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { depth: TREE_DEPTH }
    }
}

impl TreeConfig {
    pub fn with_depth(depth: usize) -> Self {
        Self { depth }
    }

    /// An empty tree of the configured depth seeded with the registry's
    /// empty-leaf value.
    pub fn build_empty(&self) -> TreeResult<Tree> {
        Tree::new_empty(self.depth, empty_leaf_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;

    #[test]
    fn default_config() {
        let c = TreeConfig::default();
        assert_eq!(c.depth, 32);
    }

    #[test]
    fn builds_seeded_tree() {
        let tree = TreeConfig::with_depth(3).build_empty().unwrap();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf(0).unwrap(), empty_leaf_value());
    }

    #[test]
    fn invalid_depth_propagates() {
        assert_eq!(
            TreeConfig::with_depth(0).build_empty(),
            Err(TreeError::InvalidDepth(0))
        );
    }

    #[test]
    fn toml_roundtrip_and_defaults() {
        let c: TreeConfig = toml::from_str("depth = 20").unwrap();
        assert_eq!(c.depth, 20);
        let c: TreeConfig = toml::from_str("").unwrap();
        assert_eq!(c, TreeConfig::default());
        let text = toml::to_string(&TreeConfig::with_depth(8)).unwrap();
        assert_eq!(toml::from_str::<TreeConfig>(&text).unwrap().depth, 8);
    }
}
