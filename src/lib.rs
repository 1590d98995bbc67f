#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[cfg_attr(test, macro_use)]
extern crate alloc;

mod node;
pub use node::{Color, NodeId, NodeRef};

mod tree;
pub use tree::RbTree;

mod validate;
pub use validate::Violation;

mod shape;
pub use shape::{NodeShape, Shape, ShapeDiff};

mod print;

mod utils;
pub use utils::helper;

pub use ordered_float::OrderedFloat;

/// Tree of floating point keys, totally ordered through [`OrderedFloat`] (NaN sorts last)
pub type FloatTree<F> = RbTree<OrderedFloat<F>>;
