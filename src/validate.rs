use core::fmt;

use crate::{NodeId, RbTree};

/// A broken Red-Black or search-tree invariant, with the node where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The root is red
    RedRoot(NodeId),
    /// A red node has a red child
    RedChildOfRed {
        /// The red parent
        parent: NodeId,
        /// Its red child
        child: NodeId,
    },
    /// The two subtrees of a node have different black heights
    BlackHeightMismatch {
        /// Node whose subtrees disagree
        node: NodeId,
        /// Black height of the left subtree
        left: usize,
        /// Black height of the right subtree
        right: usize,
    },
    /// A key is on the wrong side of an ancestor
    OutOfOrder(NodeId),
    /// A child's parent handle does not point back at the node holding it
    BrokenParentLink(NodeId),
    /// The stored count disagrees with the number of reachable nodes
    CountMismatch {
        /// Value of `len()`
        expected: usize,
        /// Nodes reached from the root
        found: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RedRoot(id) => write!(f, "root {} is red", id.index()),
            Violation::RedChildOfRed { parent, child } => write!(
                f,
                "red node {} has red child {}",
                parent.index(),
                child.index()
            ),
            Violation::BlackHeightMismatch { node, left, right } => write!(
                f,
                "node {} has black height {left} on the left and {right} on the right",
                node.index()
            ),
            Violation::OutOfOrder(id) => write!(f, "node {} breaks search order", id.index()),
            Violation::BrokenParentLink(id) => {
                write!(f, "node {} does not point back at its parent", id.index())
            }
            Violation::CountMismatch { expected, found } => {
                write!(f, "tree counts {expected} nodes but {found} are reachable")
            }
        }
    }
}

impl core::error::Error for Violation {}

impl<T: Ord> RbTree<T> {
    /// Checks every structural invariant of the tree.
    ///
    /// # Returns
    ///
    /// * `Result<usize, Violation>` - Black height of the root (sentinels count as one),
    ///   or the first violation found
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_core::RbTree;
    ///
    /// let tree: RbTree<u32> = (0..100).collect();
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<usize, Violation> {
        let root = self.root_id();
        if root.is_nil() {
            return self.check_count(0).map(|_| 1);
        }

        if self.get_color(root).is_red() {
            return Err(Violation::RedRoot(root));
        }
        if !self.get_parent(root).is_nil() {
            return Err(Violation::BrokenParentLink(root));
        }

        let mut reached = 0;
        let black_height = self.verify_subtree(root, None, None, &mut reached)?;
        self.check_count(reached)?;
        Ok(black_height)
    }

    fn check_count(&self, found: usize) -> Result<(), Violation> {
        if found == self.len() {
            Ok(())
        } else {
            Err(Violation::CountMismatch {
                expected: self.len(),
                found,
            })
        }
    }

    /// Black height of the subtree at `node`, keys bounded by `lower <= key < upper`
    fn verify_subtree(
        &self,
        node: NodeId,
        lower: Option<&T>,
        upper: Option<&T>,
        reached: &mut usize,
    ) -> Result<usize, Violation> {
        if node.is_nil() {
            return Ok(1);
        }

        *reached += 1;
        let node_ref = self.node_at(node);

        if lower.is_some_and(|lower| node_ref.key < *lower)
            || upper.is_some_and(|upper| node_ref.key >= *upper)
        {
            return Err(Violation::OutOfOrder(node));
        }

        for child in [node_ref.left, node_ref.right] {
            if child.is_nil() {
                continue;
            }
            if self.get_parent(child) != node {
                return Err(Violation::BrokenParentLink(child));
            }
            if node_ref.color.is_red() && self.get_color(child).is_red() {
                return Err(Violation::RedChildOfRed {
                    parent: node,
                    child,
                });
            }
        }

        let left = self.verify_subtree(node_ref.left, lower, Some(&node_ref.key), reached)?;
        let right = self.verify_subtree(node_ref.right, Some(&node_ref.key), upper, reached)?;

        if left != right {
            return Err(Violation::BlackHeightMismatch { node, left, right });
        }

        if node_ref.color.is_black() {
            Ok(left + 1)
        } else {
            Ok(left)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree_is_valid() {
        let tree = RbTree::<i32>::new();
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_black_height() {
        let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(tree.validate(), Ok(2));

        let tree: RbTree<i32> = [10, 5, 15, 1].into_iter().collect();
        assert_eq!(tree.validate(), Ok(3));
    }

    #[test]
    fn test_valid_after_each_insert() {
        let mut tree = RbTree::new();
        for key in [41, 38, 31, 12, 19, 8, 7, 44, 3, 99, 50, 27, 1] {
            tree.insert(key);
            assert!(tree.validate().is_ok(), "invalid after inserting {key}");
        }
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation::BlackHeightMismatch {
            node: NodeId::new(4),
            left: 2,
            right: 3,
        };
        assert_eq!(
            format!("{violation}"),
            "node 4 has black height 2 on the left and 3 on the right"
        );
        assert_eq!(
            format!("{}", Violation::CountMismatch { expected: 3, found: 2 }),
            "tree counts 3 nodes but 2 are reachable"
        );
        assert_eq!(format!("{}", Violation::RedRoot(NodeId::new(0))), "root 0 is red");
    }
}
