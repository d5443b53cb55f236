//! Core types for rankarray
//!
//! This crate defines the foundational types used by the storage and engine layers:
//! - Error: Error type hierarchy and `ErrorKind`
//! - ElementType / TypeRegistry: opaque element type descriptors and name resolution
//! - Element: tagged union of slot values
//! - Widening table and `convert_element`
//! - Coercion policy: when may elements of one array type be copied into another
//! - Comparer: three-way ordering used by search and sort
//! - ArrayLimits: construction limits, loadable from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coercion;
pub mod compare;
pub mod convert;
pub mod error;
pub mod limits;
pub mod types;
pub mod value;

pub use coercion::{classify, compatible, Coercion};
pub use compare::{Comparer, DefaultComparer, Reversed};
pub use convert::{convert_element, has_widening_conversion, widen};
pub use error::{Error, ErrorKind, Result};
pub use limits::{ArrayLimits, MAX_ADDRESSABLE_SLOTS};
pub use types::{ElementType, PrimitiveKind, TypeKind, TypeRegistry};
pub use value::{Element, ObjectRef};
