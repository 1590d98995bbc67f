use ahash::RandomState;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::Hash;
use hashbrown::HashMap;

use crate::{Color, NodeRef, RbTree};

/// Layout-relevant facts about one node, captured by [`RbTree::shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeShape<T> {
    /// Node color at capture time
    pub color: Color,
    /// Key of the parent, `None` for the root
    pub parent: Option<T>,
    /// Key of the left child, `None` for a sentinel
    pub left: Option<T>,
    /// Key of the right child, `None` for a sentinel
    pub right: Option<T>,
    /// Whether the node hangs on its parent's left slot
    pub is_left_child: bool,
    /// Height of the subtree rooted at the node
    pub height: usize,
}

/// Snapshot of a tree's shape keyed by node key.
///
/// A renderer keeps the snapshot of what it last drew and asks the next snapshot for
/// the [`ShapeDiff`] to know which nodes to add, recolor or move.
///
/// # Examples
///
/// ```
/// use rbtree_core::RbTree;
///
/// let mut tree: RbTree<i32> = [10, 20].into_iter().collect();
/// let before = tree.shape();
///
/// tree.insert(30);
/// let diff = tree.shape().diff(&before);
///
/// assert_eq!(diff.added, vec![30]);
/// assert_eq!(diff.recolored, vec![20, 10]);
/// assert_eq!(diff.moved, vec![20, 10]);
/// ```
#[derive(Debug, Clone)]
pub struct Shape<T> {
    /// Per-key node facts
    nodes: HashMap<T, NodeShape<T>, RandomState>,
    /// Keys in pre-order
    order: Vec<T>,
}

/// Changes between two [`Shape`] snapshots, each list in the newer snapshot's pre-order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeDiff<T> {
    /// Keys absent from the previous snapshot
    pub added: Vec<T>,
    /// Keys present in both snapshots whose color changed
    pub recolored: Vec<T>,
    /// Keys present in both snapshots whose parent or side changed
    pub moved: Vec<T>,
}

impl<T> ShapeDiff<T> {
    /// `true` when nothing changed
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.recolored.is_empty() && self.moved.is_empty()
    }
}

impl<T: Clone + Hash + Eq> Shape<T> {
    /// Number of nodes captured
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` for the snapshot of an empty tree
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Key of the root node
    pub fn root(&self) -> Option<&T> {
        self.order.first()
    }

    /// Facts about the node holding `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&NodeShape<T>>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.nodes.get(key)
    }

    /// Keys in pre-order, the order a renderer walks them
    pub fn keys(&self) -> &[T] {
        &self.order
    }

    /// Compares this snapshot against an older one
    ///
    /// # Arguments
    ///
    /// * `previous` - The snapshot taken before the latest mutations
    ///
    /// # Returns
    ///
    /// * `ShapeDiff<T>` - Added, recolored and moved keys
    pub fn diff(&self, previous: &Shape<T>) -> ShapeDiff<T> {
        let mut diff = ShapeDiff {
            added: Vec::new(),
            recolored: Vec::new(),
            moved: Vec::new(),
        };

        for key in &self.order {
            let Some(current) = self.nodes.get(key) else {
                continue;
            };
            match previous.nodes.get(key) {
                None => diff.added.push(key.clone()),
                Some(old) => {
                    if old.color != current.color {
                        diff.recolored.push(key.clone());
                    }
                    if old.parent != current.parent || old.is_left_child != current.is_left_child {
                        diff.moved.push(key.clone());
                    }
                }
            }
        }

        diff
    }
}

impl<T: Clone + Hash + Eq> RbTree<T> {
    /// Captures color, links and height of every real node
    pub fn shape(&self) -> Shape<T> {
        let nodes = self.all_nodes();
        let mut shape = Shape {
            nodes: HashMap::with_capacity_and_hasher(nodes.len(), RandomState::default()),
            order: Vec::with_capacity(nodes.len()),
        };

        for node in nodes {
            let Some(key) = node.key() else {
                continue;
            };
            let facts = NodeShape {
                color: node.color(),
                parent: key_of(node.parent()),
                left: key_of(node.left()),
                right: key_of(node.right()),
                is_left_child: node.is_left_child(),
                height: node.height(),
            };
            shape.order.push(key.clone());
            shape.nodes.insert(key.clone(), facts);
        }

        shape
    }
}

#[inline]
fn key_of<T: Clone>(node: Option<NodeRef<'_, T>>) -> Option<T> {
    node.and_then(|n| n.key().cloned())
}
