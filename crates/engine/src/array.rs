//! The array value
//!
//! An [`Array`] couples an element type, a [`BoundsTable`] and one flat
//! storage buffer of exactly `total_length_long()` slots. The shape is fixed
//! at construction; only element contents change afterwards.
//!
//! Every element write goes through the same store path: nulls are rejected
//! for value-typed arrays, and any other value is converted to the element
//! type (identity, boxing, unboxing, checked downcast or primitive
//! widening) before it reaches the buffer.

use rankarray_core::{
    convert_element, ArrayLimits, Element, ElementType, Error, Result, TypeRegistry,
};
use rankarray_storage::{SlotBuffer, StorageEngine};
use tracing::debug;

use crate::bounds::BoundsTable;

/// Fixed-shape, multi-dimensional array
#[derive(Debug, Clone)]
pub struct Array<S: StorageEngine = SlotBuffer> {
    element_type: ElementType,
    bounds: BoundsTable,
    buffer: S,
}

impl<S: StorageEngine> Array<S> {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create an array with zero lower bounds and default limits
    ///
    /// # Errors
    ///
    /// See [`Array::create_with_limits`].
    pub fn create(element_type: ElementType, lengths: &[i32]) -> Result<Self> {
        Self::create_with_limits(element_type, lengths, None, &ArrayLimits::default())
    }

    /// Create an array with explicit per-dimension lower bounds
    pub fn create_with_bounds(
        element_type: ElementType,
        lengths: &[i32],
        lower_bounds: &[i32],
    ) -> Result<Self> {
        Self::create_with_limits(
            element_type,
            lengths,
            Some(lower_bounds),
            &ArrayLimits::default(),
        )
    }

    /// Create an array, enforcing `limits`
    ///
    /// Every slot starts at the element type's default: zero for
    /// primitives, null for references.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the rank or element count exceeds `limits`,
    ///   or the shape is malformed (see [`BoundsTable::new`])
    /// - `OutOfRange` if a length is negative
    pub fn create_with_limits(
        element_type: ElementType,
        lengths: &[i32],
        lower_bounds: Option<&[i32]>,
        limits: &ArrayLimits,
    ) -> Result<Self> {
        limits.validate_rank(lengths.len())?;
        let bounds = BoundsTable::new(lengths, lower_bounds)?;
        limits.validate_total_length(bounds.total_length_long())?;

        let buffer = S::allocate(&element_type, bounds.total_length_long() as usize);
        debug!(
            target: "rankarray::alloc",
            element_type = %element_type,
            rank = bounds.rank(),
            slots = bounds.total_length_long(),
            backend = buffer.backend_id(),
            "Array allocated"
        );

        Ok(Array {
            element_type,
            bounds,
            buffer,
        })
    }

    /// Create an array whose element type is looked up by name
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedType` if `registry` does not know `type_name`,
    /// before anything is allocated.
    pub fn create_named(registry: &TypeRegistry, type_name: &str, lengths: &[i32]) -> Result<Self> {
        let element_type = registry.resolve(type_name)?;
        Self::create(element_type, lengths)
    }

    /// Create a zero-based rank-1 array
    pub fn vector(element_type: ElementType, length: i32) -> Result<Self> {
        Self::create(element_type, &[length])
    }

    /// Create a zero-based rank-1 array holding `elements`
    ///
    /// # Errors
    ///
    /// Fails like [`Array::set_value`] if an element cannot be stored.
    pub fn from_elements<I>(element_type: ElementType, elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        let elements: Vec<Element> = elements.into_iter().map(Into::into).collect();
        let length = i32::try_from(elements.len()).map_err(|_| {
            Error::invalid_argument(format!("{} elements exceed a 32-bit length", elements.len()))
        })?;
        let mut array = Self::vector(element_type, length)?;
        for (offset, element) in elements.into_iter().enumerate() {
            array.store(offset, element)?;
        }
        Ok(array)
    }

    // ========================================================================
    // Shape
    // ========================================================================

    /// Element type
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Bounds table
    pub fn bounds(&self) -> &BoundsTable {
        &self.bounds
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.bounds.rank()
    }

    /// Total element count as a 32-bit value
    pub fn length(&self) -> Result<i32> {
        self.bounds.total_length()
    }

    /// Total element count
    pub fn long_length(&self) -> u64 {
        self.bounds.total_length_long()
    }

    /// True if the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Lower bound of dimension `d`
    pub fn lower_bound(&self, d: usize) -> Result<i32> {
        self.bounds.lower_bound(d)
    }

    /// Upper bound of dimension `d`
    pub fn upper_bound(&self, d: usize) -> Result<i32> {
        self.bounds.upper_bound(d)
    }

    /// Length of dimension `d`
    pub fn dimension_length(&self, d: usize) -> Result<i32> {
        self.bounds.length(d)
    }

    /// Backing buffer
    pub fn storage(&self) -> &S {
        &self.buffer
    }

    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.buffer
    }

    pub(crate) fn require_rank(&self, expected: usize) -> Result<()> {
        if self.rank() != expected {
            return Err(Error::RankMismatch {
                expected,
                actual: self.rank(),
            });
        }
        Ok(())
    }

    /// Validate a flat range addressed from `lower_bound(0)`
    ///
    /// Returns the relative start offset and count.
    pub(crate) fn flat_range(&self, index_name: &str, index: i64, length: i64) -> Result<(usize, usize)> {
        let lower = i64::from(self.bounds.lower_bound(0)?);
        if index < lower {
            return Err(Error::out_of_range(
                index_name,
                format!("{} is below the lower bound {}", index, lower),
            ));
        }
        if length < 0 {
            return Err(Error::out_of_range("length", "must be non-negative"));
        }
        let start = index - lower;
        let total = self.long_length() as i64;
        if start > total || total - start < length {
            return Err(Error::invalid_argument(format!(
                "{} {} with length {} exceeds the {} available elements",
                index_name, index, length, total
            )));
        }
        Ok((start as usize, length as usize))
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Read the element at `indices`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `indices.len() != rank`
    /// - `OutOfRange` if an index is outside its dimension
    pub fn get_value(&self, indices: &[i32]) -> Result<Element> {
        let offset = self.bounds.to_relative(indices)?;
        Ok(self.buffer.raw_get(offset))
    }

    /// Rank-1 read
    pub fn get_value1(&self, i: i32) -> Result<Element> {
        let offset = self.bounds.to_relative1(i)?;
        Ok(self.buffer.raw_get(offset))
    }

    /// Rank-2 read
    pub fn get_value2(&self, i: i32, j: i32) -> Result<Element> {
        let offset = self.bounds.to_relative2(i, j)?;
        Ok(self.buffer.raw_get(offset))
    }

    /// Rank-3 read
    pub fn get_value3(&self, i: i32, j: i32, k: i32) -> Result<Element> {
        let offset = self.bounds.to_relative3(i, j, k)?;
        Ok(self.buffer.raw_get(offset))
    }

    /// Read with 64-bit indices; indices outside `i32` are out of range
    pub fn get_value_long(&self, indices: &[i64]) -> Result<Element> {
        let offset = self.bounds.to_relative_long(indices)?;
        Ok(self.buffer.raw_get(offset))
    }

    /// Store `value` at `indices`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` / `OutOfRange` as for [`Array::get_value`]
    /// - `NullArgument` if `value` is null and the element type is a value type
    /// - `InvalidArgument` if `value` cannot be converted to the element type
    pub fn set_value(&mut self, indices: &[i32], value: impl Into<Element>) -> Result<()> {
        let offset = self.bounds.to_relative(indices)?;
        self.store(offset, value.into())
    }

    /// Rank-1 store
    pub fn set_value1(&mut self, i: i32, value: impl Into<Element>) -> Result<()> {
        let offset = self.bounds.to_relative1(i)?;
        self.store(offset, value.into())
    }

    /// Rank-2 store
    pub fn set_value2(&mut self, i: i32, j: i32, value: impl Into<Element>) -> Result<()> {
        let offset = self.bounds.to_relative2(i, j)?;
        self.store(offset, value.into())
    }

    /// Rank-3 store
    pub fn set_value3(&mut self, i: i32, j: i32, k: i32, value: impl Into<Element>) -> Result<()> {
        let offset = self.bounds.to_relative3(i, j, k)?;
        self.store(offset, value.into())
    }

    /// Store with 64-bit indices
    pub fn set_value_long(&mut self, indices: &[i64], value: impl Into<Element>) -> Result<()> {
        let offset = self.bounds.to_relative_long(indices)?;
        self.store(offset, value.into())
    }

    fn store(&mut self, offset: usize, value: Element) -> Result<()> {
        let converted = match value.runtime_type() {
            None if self.element_type.is_value_type() => {
                return Err(Error::null_argument("value"));
            }
            None => Element::Null,
            Some(runtime) => convert_element(&value, &runtime, &self.element_type).map_err(|_| {
                Error::invalid_argument(format!(
                    "element type mismatch: cannot store {} in a {} array",
                    runtime, self.element_type
                ))
            })?,
        };
        self.buffer.raw_set(offset, converted);
        Ok(())
    }

    /// All elements in row-major order
    pub fn to_vec(&self) -> Vec<Element> {
        (0..self.buffer.slot_count())
            .map(|offset| self.buffer.raw_get(offset))
            .collect()
    }

    // ========================================================================
    // Clear / reverse
    // ========================================================================

    /// Reset `length` elements starting at flat index `index` to the default
    ///
    /// `index` counts row-major from `lower_bound(0)`, so it also addresses
    /// multi-dimensional arrays.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `index` is below `lower_bound(0)` or the range
    /// does not fit the array.
    pub fn clear(&mut self, index: i32, length: i32) -> Result<()> {
        let lower = i64::from(self.bounds.lower_bound(0)?);
        let index = i64::from(index);
        let length = i64::from(length);
        if index < lower {
            return Err(Error::out_of_range(
                "index",
                format!("{} is below the lower bound {}", index, lower),
            ));
        }
        let start = index - lower;
        let total = self.long_length() as i64;
        if length < 0 || start > total || total - start < length {
            return Err(Error::out_of_range(
                "length",
                format!("{} elements from index {} exceed the array", length, index),
            ));
        }
        let default = self.element_type.default_element();
        self.buffer.raw_fill(start as usize, length as usize, &default);
        Ok(())
    }

    /// Reverse a rank-1 array in place
    ///
    /// # Errors
    ///
    /// Returns `RankMismatch` unless the array has rank 1.
    pub fn reverse(&mut self) -> Result<()> {
        self.require_rank(1)?;
        let lower = self.bounds.lower_bound(0)?;
        let length = self.bounds.length(0)?;
        self.reverse_range(lower, length)
    }

    /// Reverse `length` elements of a rank-1 array starting at `index`
    ///
    /// # Errors
    ///
    /// - `RankMismatch` unless the array has rank 1
    /// - `OutOfRange` if `index < lower_bound(0)` or `length < 0`
    /// - `InvalidArgument` if the range runs past the end
    pub fn reverse_range(&mut self, index: i32, length: i32) -> Result<()> {
        self.require_rank(1)?;
        let (start, count) = self.flat_range("index", i64::from(index), i64::from(length))?;
        if count < 2 {
            return Ok(());
        }
        let (mut lo, mut hi) = (start, start + count - 1);
        while lo < hi {
            self.buffer.raw_swap(lo, hi);
            lo += 1;
            hi -= 1;
        }
        Ok(())
    }
}
