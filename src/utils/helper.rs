//! Height bounds for Red-Black trees

use num_traits::Float;

/// Returns the largest height a Red-Black tree with `len` keys can reach
///
/// # Arguments
///
/// * `len` - Number of real nodes in the tree
///
/// # Returns
///
/// * `f64` - `2 * log2(len + 1)`
///
/// # Examples
///
/// ```
/// use rbtree_core::{RbTree, helper::max_height};
///
/// let tree: RbTree<u32> = (0..1000).collect();
/// assert!(tree.height() as f64 <= max_height(tree.len()));
/// ```
#[inline]
pub fn max_height(len: usize) -> f64 {
    2.0 * Float::log2(len as f64 + 1.0)
}

/// Returns the smallest height any binary tree with `len` keys can have
///
/// # Arguments
///
/// * `len` - Number of real nodes in the tree
///
/// # Returns
///
/// * `usize` - `ceil(log2(len + 1))`
#[inline]
pub fn min_height(len: usize) -> usize {
    Float::ceil(Float::log2(len as f64 + 1.0)) as usize
}
