//! rankarray - multi-dimensional array value model
//!
//! Arrays of any rank with per-dimension lower bounds, typed element access,
//! covariant bulk copy between differently typed arrays, in-place sort,
//! binary search and row-major iteration.
//!
//! # Quick Start
//!
//! ```
//! use rankarray::{binary_search, sort, Array, Element, ElementType, PrimitiveKind};
//!
//! let mut array: Array =
//!     Array::from_elements(ElementType::primitive(PrimitiveKind::I32), [5, 3, 4, 1, 2])?;
//! sort(&mut array, None)?;
//! assert_eq!(binary_search(&array, &Element::I32(4), None)?, 3);
//! assert_eq!(!binary_search(&array, &Element::I32(10), None)?, 5);
//! # Ok::<(), rankarray::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `rankarray-core`: errors, element types and values, conversion and
//!   coercion rules, comparers, construction limits
//! - `rankarray-storage`: the [`StorageEngine`] trait and its backends
//! - `rankarray-engine`: bounds, the [`Array`] type and the algorithms
//!
//! Everything public in those crates is re-exported here.

pub use rankarray_core::*;
pub use rankarray_engine::*;
pub use rankarray_storage::*;
