//! Array engine for rankarray
//!
//! This crate builds the array value model on top of the core types and a
//! storage backend:
//! - BoundsTable: per-dimension bounds, strides and offset arithmetic
//! - Array: construction, typed element access, clear and reverse
//! - copy: same-type fast path and coerced element-wise copy
//! - search: binary search and linear index-of
//! - sort: partition sort with optional parallel items
//! - iter: row-major cursor and iterator for every rank
//! - SharedArray: lock-protected handle for cross-thread use
//!
//! All operations are synchronous. `Array` itself never locks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod bounds;
pub mod copy;
pub mod iter;
pub mod search;
pub mod shared;
pub mod sort;

pub use array::Array;
pub use bounds::{BoundsTable, Dimension, Indices};
pub use copy::{copy, copy_from_start, copy_long, copy_to, copy_within};
pub use iter::{ArrayCursor, Elements};
pub use search::{
    binary_search, binary_search_range, index_of, index_of_from, index_of_range, last_index_of,
    last_index_of_from, last_index_of_range,
};
pub use shared::SharedArray;
pub use sort::{sort, sort_range, sort_range_with_items, sort_with_items};
