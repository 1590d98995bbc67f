use core::fmt;

use crate::RbTree;
use crate::tree::Direction;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from a node to the sentinels below it have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node - cannot be adjacent to other red nodes
    Red,
    /// Black node - can have children of any color, contributes to black height
    Black,
}

impl Color {
    /// Returns `true` for [`Color::Red`]
    #[inline]
    pub const fn is_red(self) -> bool {
        matches!(self, Color::Red)
    }

    /// Returns `true` for [`Color::Black`]
    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Stable handle of a node inside its tree's arena.
///
/// Handles never change for the lifetime of a node; rotations only re-point links.
/// [`NodeId::NIL`] is the shared sentinel standing in for every empty subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The sentinel handle: keyless, always black, no children, no parent
    pub const NIL: NodeId = NodeId(usize::MAX);

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in the arena (insertion order)
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns `true` if this is the sentinel handle
    #[inline]
    pub const fn is_nil(self) -> bool {
        self.0 == usize::MAX
    }
}

/// Arena cell of a real node. Sentinels have no cell.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// The stored key
    pub(crate) key: T,

    /// Color used for balancing
    pub(crate) color: Color,

    /// Handle of the parent node (nil for the root)
    pub(crate) parent: NodeId,

    /// Handle of the left child (nil for an empty subtree)
    pub(crate) left: NodeId,

    /// Handle of the right child (nil for an empty subtree)
    pub(crate) right: NodeId,
}

impl<T> Node<T> {
    /// Fresh node with two sentinel children and a sentinel parent, colored red
    /// so it can be linked below an existing node without changing black heights.
    pub(crate) const fn new(key: T) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: NodeId::NIL,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

/// Read-only view of one node of an [`RbTree`], real or sentinel.
///
/// All relations (`parent`, `sibling`, `uncle`, ...) are derived from the current
/// links on every call, so a view always reflects the tree it borrows.
///
/// Two views are equal when they point at the same node of the same tree. Compare
/// [`NodeRef::key`] to match nodes by value.
///
/// # Examples
///
/// ```
/// use rbtree_core::{Color, RbTree};
///
/// let tree: RbTree<i32> = [10, 20, 30].into_iter().collect();
/// let root = tree.root();
/// assert_eq!(root.key(), Some(&20));
/// assert_eq!(root.color(), Color::Black);
///
/// let left = root.left().unwrap();
/// assert!(left.is_left_child());
/// assert_eq!(left.sibling().and_then(|s| s.key().copied()), Some(30));
/// ```
pub struct NodeRef<'a, T> {
    tree: &'a RbTree<T>,
    id: NodeId,
    /// Owner and side of the child slot a sentinel view was reached through
    slot: Option<(NodeId, Direction)>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.id == other.id && self.slot == other.slot
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &self.key())
            .field("color", &self.color())
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    #[inline]
    pub(crate) const fn new(tree: &'a RbTree<T>, id: NodeId) -> Self {
        Self {
            tree,
            id,
            slot: None,
        }
    }

    #[inline]
    fn at(&self, id: NodeId) -> Self {
        Self::new(self.tree, id)
    }

    /// View of whatever fills `owner`'s `side` slot; a sentinel remembers the slot
    fn child_of(&self, owner: NodeId, side: Direction) -> Self {
        let id = self.tree.get_child(owner, side);
        Self {
            tree: self.tree,
            id,
            slot: id.is_nil().then_some((owner, side)),
        }
    }

    /// Handle of the node holding this one in a child slot, nil for the root
    fn parent_id(&self) -> NodeId {
        match self.slot {
            Some((owner, _)) => owner,
            None => self.tree.get_parent(self.id),
        }
    }

    fn side(&self) -> Option<Direction> {
        match self.slot {
            Some((_, side)) => Some(side),
            None if self.tree.is_left_child(self.id) => Some(Direction::Left),
            None if self.tree.is_right_child(self.id) => Some(Direction::Right),
            None => None,
        }
    }

    /// Arena handle of this node
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The key, absent for a sentinel
    #[inline]
    pub fn key(&self) -> Option<&'a T> {
        self.tree.key_at(self.id)
    }

    /// Node color; sentinels are always black
    #[inline]
    pub fn color(&self) -> Color {
        self.tree.get_color(self.id)
    }

    /// Left child slot. A real node always has one (possibly a sentinel), a sentinel has none.
    pub fn left(&self) -> Option<Self> {
        (!self.id.is_nil()).then(|| self.child_of(self.id, Direction::Left))
    }

    /// Right child slot. A real node always has one (possibly a sentinel), a sentinel has none.
    pub fn right(&self) -> Option<Self> {
        (!self.id.is_nil()).then(|| self.child_of(self.id, Direction::Right))
    }

    /// Parent node, absent only for the root.
    ///
    /// A sentinel reached through [`NodeRef::left`], [`NodeRef::right`] or
    /// [`NodeRef::sibling`] answers with the node owning that slot; the sentinel root
    /// of an empty tree has no parent.
    pub fn parent(&self) -> Option<Self> {
        let parent = self.parent_id();
        (!parent.is_nil()).then(|| self.at(parent))
    }

    /// `true` when the node has no parent
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id().is_nil()
    }

    /// `true` when neither child is a real node
    pub fn is_leaf(&self) -> bool {
        self.tree.get_left(self.id).is_nil() && self.tree.get_right(self.id).is_nil()
    }

    /// `true` for the keyless black stand-in of an empty subtree
    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        self.id.is_nil()
    }

    /// `true` when the parent's left slot holds this node
    #[inline]
    pub fn is_left_child(&self) -> bool {
        self.side() == Some(Direction::Left)
    }

    /// `true` when the parent's right slot holds this node
    #[inline]
    pub fn is_right_child(&self) -> bool {
        self.side() == Some(Direction::Right)
    }

    /// Parent of the parent
    pub fn grandparent(&self) -> Option<Self> {
        self.parent()?.parent()
    }

    /// The other child of the parent, possibly a sentinel
    pub fn sibling(&self) -> Option<Self> {
        let parent = self.parent_id();
        if parent.is_nil() {
            return None;
        }
        let side = self.side()?;
        Some(self.child_of(parent, side.opposite()))
    }

    /// The parent's sibling, possibly a sentinel
    pub fn uncle(&self) -> Option<Self> {
        self.parent()?.sibling()
    }

    /// Leftmost real node of this subtree; a sentinel returns itself
    pub fn minimum(&self) -> Self {
        if self.id.is_nil() {
            return *self;
        }
        self.at(self.tree.find_minimum(self.id))
    }

    /// Rightmost real node of this subtree; a sentinel returns itself
    pub fn maximum(&self) -> Self {
        if self.id.is_nil() {
            return *self;
        }
        self.at(self.tree.find_maximum(self.id))
    }

    /// Number of real nodes on the longest downward path, 0 for a sentinel
    pub fn height(&self) -> usize {
        self.tree.height_of(self.id)
    }
}
