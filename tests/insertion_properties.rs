//! Property-based tests for insertion and rebalancing.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rbtree_core::helper::{max_height, min_height};
use rbtree_core::{Color, FloatTree, NodeRef, OrderedFloat, RbTree};

// =============================================================================
// Test helpers
// =============================================================================

fn init_logging() {
    use simplelog::{Config, LevelFilter, TestLogger};
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Black nodes from `node` down to any sentinel, sentinel included.
/// Panics if two paths disagree.
fn black_height(node: NodeRef<'_, i32>) -> usize {
    if node.is_sentinel() {
        assert_eq!(node.color(), Color::Black);
        assert!(node.key().is_none());
        return 1;
    }

    let left = node.left().map(black_height).unwrap_or(1);
    let right = node.right().map(black_height).unwrap_or(1);
    assert_eq!(left, right, "unequal black heights below {:?}", node.key());

    left + usize::from(node.color().is_black())
}

/// Re-checks every invariant through the public node views only
fn assert_red_black(tree: &RbTree<i32>) {
    let root = tree.root();
    assert_eq!(root.color(), Color::Black);
    assert!(root.parent().is_none());

    for node in tree.all_nodes() {
        if node.color().is_red() {
            for child in [node.left(), node.right()].into_iter().flatten() {
                assert_eq!(child.color(), Color::Black, "red-red edge at {:?}", node.key());
            }
        }
        for child in [node.left(), node.right()].into_iter().flatten() {
            assert_eq!(child.parent(), Some(node));
            assert!(!child.is_root());
        }
    }

    black_height(root);
    assert_eq!(tree.validate().map(|_| ()), Ok(()));
}

fn snapshot(tree: &RbTree<i32>) -> Vec<(i32, Color, Option<i32>, bool)> {
    tree.all_nodes()
        .into_iter()
        .filter_map(|n| {
            let key = *n.key()?;
            let parent = n.parent().and_then(|p| p.key().copied());
            Some((key, n.color(), parent, n.is_left_child()))
        })
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn simple_rotation_scenario() {
    init_logging();
    let mut tree = RbTree::new();
    tree.insert(10);
    tree.insert(20);
    assert_red_black(&tree);
    tree.insert(30);
    assert_red_black(&tree);

    assert_eq!(
        snapshot(&tree),
        vec![
            (20, Color::Black, None, false),
            (10, Color::Red, Some(20), true),
            (30, Color::Red, Some(20), false),
        ]
    );
}

#[test]
fn recolor_without_rotation_scenario() {
    init_logging();
    let mut tree = RbTree::new();
    for key in [10, 5, 15] {
        tree.insert(key);
    }
    let before: Vec<_> = snapshot(&tree).into_iter().map(|(k, _, p, l)| (k, p, l)).collect();

    tree.insert(1);
    assert_red_black(&tree);

    let colors: Vec<_> = snapshot(&tree).into_iter().map(|(k, c, _, _)| (k, c)).collect();
    assert_eq!(
        colors,
        vec![
            (10, Color::Black),
            (5, Color::Black),
            (1, Color::Red),
            (15, Color::Black)
        ]
    );

    // no rotation: the three original nodes kept their places
    let after: Vec<_> = snapshot(&tree)
        .into_iter()
        .filter(|(k, ..)| *k != 1)
        .map(|(k, _, p, l)| (k, p, l))
        .collect();
    assert_eq!(after, before);
}

#[test]
fn search_scenario() {
    let mut tree = RbTree::new();
    for key in [23, 10, 50, 100, 1, 37] {
        tree.insert(key);
    }

    assert_eq!(tree.search(&37).and_then(|n| n.key().copied()), Some(37));
    assert!(tree.search(&99).is_none());
}

#[test]
fn float_keys() {
    let mut tree = FloatTree::<f64>::new();
    for value in [2.5, -1.0, f64::INFINITY, 0.0, f64::NAN, 2.5] {
        tree.insert(OrderedFloat(value));
    }

    assert_eq!(tree.count(), 5);
    assert_eq!(tree.min(), Some(&OrderedFloat(-1.0)));
    assert!(tree.max().is_some_and(|m| m.0.is_nan()));
    assert!(tree.search(&OrderedFloat(0.0)).is_some());
    assert!(tree.validate().is_ok());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every invariant holds after every single insertion
    #[test]
    fn invariants_hold_after_each_insert(keys in prop::collection::vec(-500i32..500, 0..200)) {
        let mut tree = RbTree::new();
        for key in keys {
            tree.insert(key);
            assert_red_black(&tree);
        }
    }

    /// In-order walk is strictly ascending and matches a reference set
    #[test]
    fn elements_match_reference(keys in prop::collection::vec(any::<i32>(), 0..300)) {
        let tree: RbTree<i32> = keys.iter().copied().collect();
        let reference: BTreeSet<i32> = keys.iter().copied().collect();

        let elements: Vec<i32> = tree.all_elements().into_iter().copied().collect();
        let expected: Vec<i32> = reference.into_iter().collect();
        prop_assert_eq!(elements, expected);
    }

    /// count(), all_elements() and all_nodes() always agree
    #[test]
    fn count_and_traversals_agree(keys in prop::collection::vec(0i32..100, 0..300)) {
        let tree: RbTree<i32> = keys.into_iter().collect();

        prop_assert_eq!(tree.all_elements().len(), tree.count());
        prop_assert_eq!(tree.all_nodes().len(), tree.count());
        prop_assert_eq!(tree.is_empty(), tree.count() == 0);
    }

    /// Height stays within the red-black bound
    #[test]
    fn height_is_logarithmic(keys in prop::collection::vec(any::<i32>(), 1..500)) {
        let tree: RbTree<i32> = keys.into_iter().collect();
        let height = tree.root().height();

        prop_assert!(height as f64 <= max_height(tree.count()));
        prop_assert!(height >= min_height(tree.count()));
        prop_assert_eq!(height, tree.height());
    }

    /// Re-inserting a stored key changes nothing
    #[test]
    fn duplicate_insert_is_noop(
        keys in prop::collection::vec(-50i32..50, 1..100),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree: RbTree<i32> = keys.iter().copied().collect();
        let existing = keys[pick.index(keys.len())];

        let count = tree.count();
        let before = snapshot(&tree);

        prop_assert!(!tree.insert(existing));
        prop_assert_eq!(tree.count(), count);
        prop_assert_eq!(snapshot(&tree), before);
    }

    /// Every stored key is found, every other key is not
    #[test]
    fn search_finds_exactly_stored_keys(
        keys in prop::collection::vec(0i32..1000, 0..100),
        probes in prop::collection::vec(0i32..1000, 0..50),
    ) {
        let tree: RbTree<i32> = keys.iter().copied().collect();

        for key in &keys {
            let found = tree.search(key);
            prop_assert_eq!(found.and_then(|n| n.key().copied()), Some(*key));
        }
        for probe in probes {
            prop_assert_eq!(tree.search(&probe).is_some(), keys.contains(&probe));
        }
    }

    /// Subtree minimum and maximum bound every key below a node
    #[test]
    fn minimum_and_maximum_bound_subtrees(keys in prop::collection::vec(any::<i16>(), 1..150)) {
        let tree: RbTree<i16> = keys.into_iter().collect();

        for node in tree.all_nodes() {
            let key = node.key().copied();
            prop_assert!(node.minimum().key().copied() <= key);
            prop_assert!(node.maximum().key().copied() >= key);
        }
        prop_assert_eq!(tree.root().minimum().key(), tree.min());
        prop_assert_eq!(tree.root().maximum().key(), tree.max());
    }

    /// A snapshot diff lists exactly the newly inserted key as added
    #[test]
    fn shape_diff_reports_new_key(
        keys in prop::collection::vec(0i32..200, 0..80),
        extra in 200i32..300,
    ) {
        let mut tree: RbTree<i32> = keys.into_iter().collect();
        let before = tree.shape();

        tree.insert(extra);
        let diff = tree.shape().diff(&before);
        prop_assert_eq!(diff.added, vec![extra]);
    }
}
