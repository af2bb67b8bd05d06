//! Index arithmetic for the root-at-0 array layout.
//!
//! Node `i` has children `2i + 1` and `2i + 2`, so every left child has an
//! odd index and every right child a non-zero even one.

/// Index of the parent of node `i`. The root is its own parent.
pub fn parent_index(i: usize) -> usize {
    i.saturating_sub(1) / 2
}

/// Index of the other child of `i`'s parent.
pub fn sibling_index(i: usize) -> usize {
    if is_right_child(i) {
        i - 1
    } else {
        i + 1
    }
}

/// Whether node `i` occupies its parent's right slot (even index).
pub fn is_right_child(i: usize) -> bool {
    i % 2 == 0
}

/// Indices of the two children of node `i`.
pub fn children_indices(i: usize) -> (usize, usize) {
    (2 * i + 1, 2 * i + 2)
}
