use core::fmt;

use crate::{NodeId, RbTree};

/// Indented dump of the tree, one node per line.
///
/// ```
/// use rbtree_core::RbTree;
///
/// let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();
/// let dump = format!("{tree}");
/// assert!(dump.starts_with("20 black\nL=10 red\n"));
/// ```
impl<T: fmt::Display> fmt::Display for RbTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.print_node(f, self.root_id(), 0)
    }
}

impl<T: fmt::Display> RbTree<T> {
    fn print_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId, depth: usize) -> fmt::Result {
        let Some(key) = self.key_at(node) else {
            return writeln!(f, "∅");
        };
        writeln!(f, "{key} {}", self.get_color(node))?;

        for (label, child) in [("L=", self.get_left(node)), ("R=", self.get_right(node))] {
            write!(f, "{:indent$}{label}", "", indent = depth * 2)?;
            self.print_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}
