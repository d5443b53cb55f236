//! Storage layer for rankarray
//!
//! This crate implements the flat slot buffers that back every array:
//! - StorageEngine: allocate, read, write and bulk-move slots by 0-based offset
//! - SlotBuffer: one tagged-union `Element` per slot (default backend)
//! - NativeBuffer: native typed vectors for primitive element types
//!
//! Buffers perform no validation. The engine layer checks every offset,
//! count and conversion before calling into them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod native;
pub mod slots;
pub mod traits;

pub use native::NativeBuffer;
pub use slots::SlotBuffer;
pub use traits::StorageEngine;
