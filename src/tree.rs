use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;

use log::{debug, trace};

use crate::node::{Color, Node, NodeId, NodeRef};

/// Side of a parent a child hangs on, and the direction of a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// An insert-only Red-Black tree over any totally ordered key type.
///
/// Nodes live in an arena and link to each other by [`NodeId`]; the child slots are the
/// only ownership edges and the parent handle is a plain back-reference. Every empty
/// subtree is the shared black sentinel [`NodeId::NIL`], so rebalancing never
/// special-cases absence.
///
/// Key features:
/// - O(log n) insertion and search
/// - Duplicate keys are rejected without touching the tree
/// - Read-only node views ([`NodeRef`]) for renderers that walk the tree shape
///
/// # Examples
///
/// ```
/// use rbtree_core::RbTree;
///
/// let mut tree = RbTree::new();
/// for key in [23, 10, 50, 100, 1, 37] {
///     tree.insert(key);
/// }
///
/// assert_eq!(tree.count(), 6);
/// assert_eq!(tree.all_elements(), vec![&1, &10, &23, &37, &50, &100]);
/// assert_eq!(tree.search(&37).and_then(|n| n.key().copied()), Some(37));
/// assert!(tree.search(&99).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RbTree<T> {
    /// Arena of real nodes, indexed by `NodeId`
    nodes: Vec<Node<T>>,

    /// Handle of the root node, nil when the tree is empty
    root: NodeId,

    /// Number of real nodes reachable from the root
    len: usize,
}

impl<T> Default for RbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RbTree<T> {
    /// Creates an empty tree whose root is the sentinel
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId::NIL,
            len: 0,
        }
    }

    /// Creates an empty tree with room for `capacity` nodes before reallocating
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of nodes to reserve in the arena
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: NodeId::NIL,
            len: 0,
        }
    }

    /// Number of keys stored
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of keys stored, same as [`RbTree::len`]
    #[inline]
    pub const fn count(&self) -> usize {
        self.len
    }

    /// `true` when the tree holds no keys
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes the arena can hold without reallocating
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Removes every node, keeping the arena allocation
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NodeId::NIL;
        self.len = 0;
    }

    /// View of the root node, the sentinel when the tree is empty
    #[inline]
    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef::new(self, self.root)
    }

    /// View of the node behind `id`, `None` if the index is out of range for this arena.
    /// The sentinel handle always resolves.
    ///
    /// Handles are plain indices: one taken from another tree, or from before
    /// [`RbTree::clear`], resolves to whatever node now sits at that index.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        (id.is_nil() || id.index() < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    /// Longest root-to-leaf path counted in real nodes, 0 when empty
    #[inline]
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Smallest key
    pub fn min(&self) -> Option<&T> {
        self.key_at(self.find_minimum(self.root))
    }

    /// Largest key
    pub fn max(&self) -> Option<&T> {
        self.key_at(self.find_maximum(self.root))
    }

    /// Keys in ascending order (in-order walk)
    pub fn all_elements(&self) -> Vec<&T> {
        let mut keys = Vec::with_capacity(self.len);
        self.collect_in_order(self.root, &mut keys);
        keys
    }

    /// Every real node, parents before children, left subtree before right (pre-order walk)
    pub fn all_nodes(&self) -> Vec<NodeRef<'_, T>> {
        let mut nodes = Vec::with_capacity(self.len);
        self.collect_pre_order(self.root, &mut nodes);
        nodes
    }

    fn collect_in_order<'a>(&'a self, node_idx: NodeId, keys: &mut Vec<&'a T>) {
        if node_idx.is_nil() {
            return;
        }

        let node = self.node_at(node_idx);
        self.collect_in_order(node.left, keys);
        keys.push(&node.key);
        self.collect_in_order(node.right, keys);
    }

    fn collect_pre_order<'a>(&'a self, node_idx: NodeId, nodes: &mut Vec<NodeRef<'a, T>>) {
        if node_idx.is_nil() {
            return;
        }

        nodes.push(NodeRef::new(self, node_idx));
        let node = self.node_at(node_idx);
        self.collect_pre_order(node.left, nodes);
        self.collect_pre_order(node.right, nodes);
    }

    #[inline]
    pub(crate) const fn root_id(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub(crate) fn node_at(&self, idx: NodeId) -> &Node<T> {
        debug_assert!(!idx.is_nil());
        &self.nodes[idx.index()]
    }

    #[inline]
    fn node_at_mut(&mut self, idx: NodeId) -> &mut Node<T> {
        debug_assert!(!idx.is_nil());
        &mut self.nodes[idx.index()]
    }

    #[inline]
    pub(crate) fn key_at(&self, idx: NodeId) -> Option<&T> {
        if idx.is_nil() {
            None
        } else {
            Some(&self.node_at(idx).key)
        }
    }

    #[inline]
    pub(crate) fn get_color(&self, idx: NodeId) -> Color {
        if idx.is_nil() {
            Color::Black
        } else {
            self.node_at(idx).color
        }
    }

    /// Sentinels are never mutated
    #[inline]
    fn set_color(&mut self, idx: NodeId, color: Color) {
        if !idx.is_nil() {
            self.node_at_mut(idx).color = color;
        }
    }

    #[inline]
    fn is_red(&self, idx: NodeId) -> bool {
        self.get_color(idx).is_red()
    }

    #[inline]
    pub(crate) fn get_parent(&self, idx: NodeId) -> NodeId {
        if idx.is_nil() {
            NodeId::NIL
        } else {
            self.node_at(idx).parent
        }
    }

    #[inline]
    pub(crate) fn get_left(&self, idx: NodeId) -> NodeId {
        if idx.is_nil() {
            NodeId::NIL
        } else {
            self.node_at(idx).left
        }
    }

    #[inline]
    pub(crate) fn get_right(&self, idx: NodeId) -> NodeId {
        if idx.is_nil() {
            NodeId::NIL
        } else {
            self.node_at(idx).right
        }
    }

    #[inline]
    pub(crate) fn get_child(&self, idx: NodeId, side: Direction) -> NodeId {
        match side {
            Direction::Left => self.get_left(idx),
            Direction::Right => self.get_right(idx),
        }
    }

    #[inline]
    fn set_child(&mut self, idx: NodeId, side: Direction, child: NodeId) {
        let node = self.node_at_mut(idx);
        match side {
            Direction::Left => node.left = child,
            Direction::Right => node.right = child,
        }
    }

    #[inline]
    fn set_parent(&mut self, idx: NodeId, parent: NodeId) {
        if !idx.is_nil() {
            self.node_at_mut(idx).parent = parent;
        }
    }

    pub(crate) fn is_left_child(&self, idx: NodeId) -> bool {
        let parent = self.get_parent(idx);
        !idx.is_nil() && !parent.is_nil() && self.node_at(parent).left == idx
    }

    pub(crate) fn is_right_child(&self, idx: NodeId) -> bool {
        let parent = self.get_parent(idx);
        !idx.is_nil() && !parent.is_nil() && self.node_at(parent).right == idx
    }

    /// Side of its parent `idx` hangs on, `None` for the root and sentinels
    fn side_of(&self, idx: NodeId) -> Option<Direction> {
        if self.is_left_child(idx) {
            Some(Direction::Left)
        } else if self.is_right_child(idx) {
            Some(Direction::Right)
        } else {
            None
        }
    }

    pub(crate) fn sibling_of(&self, idx: NodeId) -> NodeId {
        let parent = self.get_parent(idx);
        if self.is_left_child(idx) {
            self.get_right(parent)
        } else {
            self.get_left(parent)
        }
    }

    #[inline]
    fn grandparent_of(&self, idx: NodeId) -> NodeId {
        self.get_parent(self.get_parent(idx))
    }

    #[inline]
    fn uncle_of(&self, idx: NodeId) -> NodeId {
        self.sibling_of(self.get_parent(idx))
    }

    pub(crate) fn find_minimum(&self, mut node: NodeId) -> NodeId {
        while !node.is_nil() {
            let left = self.node_at(node).left;
            if left.is_nil() {
                break;
            }
            node = left;
        }
        node
    }

    pub(crate) fn find_maximum(&self, mut node: NodeId) -> NodeId {
        while !node.is_nil() {
            let right = self.node_at(node).right;
            if right.is_nil() {
                break;
            }
            node = right;
        }
        node
    }

    pub(crate) fn height_of(&self, node: NodeId) -> usize {
        if node.is_nil() {
            return 0;
        }
        let node = self.node_at(node);
        1 + self.height_of(node.left).max(self.height_of(node.right))
    }

    /// Rotates the subtree rooted at `x` towards `direction`.
    ///
    /// For a left rotation the right child `y` takes `x`'s place, `x` becomes `y`'s left
    /// child and `y`'s former left subtree becomes `x`'s right subtree. Right rotation is
    /// the mirror image. In-order key sequence is preserved.
    fn rotate(&mut self, x: NodeId, direction: Direction) {
        if x.is_nil() {
            return;
        }

        // y rises from the side opposite to the rotation
        let rising = direction.opposite();
        let y = self.get_child(x, rising);
        if y.is_nil() {
            return;
        }

        trace!("rotate {direction:?} at {x:?}, {y:?} rises");

        let y_inner = self.get_child(y, direction);
        self.set_child(x, rising, y_inner);
        self.set_parent(y_inner, x);

        let x_parent = self.get_parent(x);
        self.set_parent(y, x_parent);

        match self.side_of(x) {
            None => self.root = y,
            Some(side) => self.set_child(x_parent, side, y),
        }

        self.set_child(y, direction, x);
        self.set_parent(x, y);
    }
}

impl<T: Ord> RbTree<T> {
    /// Finds the node holding `key`
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Returns
    ///
    /// * `Option<NodeRef>` - View of the matching node, `None` if absent
    pub fn search<Q>(&self, key: &Q) -> Option<NodeRef<'_, T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).map(|idx| NodeRef::new(self, idx))
    }

    /// `true` if `key` is stored
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Inserts `key` and rebalances.
    ///
    /// A key that is already present leaves the tree untouched: no count change, no
    /// relinking, no recoloring.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to insert
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the key was stored, `false` if it was already present
    pub fn insert(&mut self, key: T) -> bool {
        if self.find_node(&key).is_some() {
            debug!("duplicate key rejected, tree unchanged ({} nodes)", self.len);
            return false;
        }

        let new_idx = NodeId::new(self.nodes.len());
        let parent_idx = self.find_insertion_parent(&key);
        let side = match self.key_at(parent_idx) {
            Some(parent_key) if key < *parent_key => Direction::Left,
            _ => Direction::Right,
        };

        self.nodes.push(Node::new(key));
        self.link_to_parent(new_idx, parent_idx, side);
        self.len += 1;

        debug!("inserted {new_idx:?} under {parent_idx:?}");

        self.fix_insertion_violations(new_idx);
        self.set_color(self.root, Color::Black);

        #[cfg(debug_assertions)]
        debug_assert!(
            self.validate().is_ok(),
            "RB tree invariants violated after insertion"
        );

        true
    }

    fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;

        while !current.is_nil() {
            let node = self.node_at(current);
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    /// Last real node on the descent for `key` (less goes left, greater-or-equal right)
    fn find_insertion_parent(&self, key: &T) -> NodeId {
        let mut current = self.root;
        let mut parent = NodeId::NIL;

        while !current.is_nil() {
            parent = current;
            let node = self.node_at(current);
            current = if *key < node.key {
                node.left
            } else {
                node.right
            };
        }
        parent
    }

    fn link_to_parent(&mut self, node_idx: NodeId, parent_idx: NodeId, side: Direction) {
        self.set_parent(node_idx, parent_idx);
        if parent_idx.is_nil() {
            self.root = node_idx;
        } else {
            self.set_child(parent_idx, side, node_idx);
        }
    }

    /// Restores the no-red-red rule above a freshly linked red node.
    ///
    /// A red uncle pushes the violation two levels up by recoloring; a black uncle ends the
    /// walk with at most two rotations. The caller recolors the root afterwards.
    fn fix_insertion_violations(&mut self, mut node: NodeId) {
        while !node.is_nil() && self.is_red(self.get_parent(node)) {
            let parent = self.get_parent(node);
            let grandparent = self.grandparent_of(node);
            let uncle = self.uncle_of(node);

            let Some(parent_side) = self.side_of(parent) else {
                // a red root, recolored by the caller
                break;
            };

            if self.is_red(uncle) {
                trace!("fixup {node:?}: red uncle {uncle:?}, recolor and move up");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if self.side_of(node) != Some(parent_side) {
                trace!("fixup {node:?}: triangle, rotate {parent_side:?} at parent {parent:?}");
                node = parent;
                self.rotate(node, parent_side);
            }

            let parent = self.get_parent(node);
            let grandparent = self.get_parent(parent);
            trace!("fixup {node:?}: line, rotate {:?} at {grandparent:?}", parent_side.opposite());
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            break;
        }
    }
}

impl<T: Ord> Extend<T> for RbTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord> FromIterator<T> for RbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RbTree::new();
        tree.extend(iter);
        tree
    }
}
