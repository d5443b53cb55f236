//! Per-dimension bounds and flat-offset arithmetic
//!
//! A [`BoundsTable`] records one `(lower_bound, length)` pair per dimension
//! and derives everything else from them: upper bounds, the 64-bit total
//! element count, row-major strides, and the mapping between logical
//! indices and 0-based relative offsets into the flat buffer.

use rankarray_core::{Error, Result, MAX_ADDRESSABLE_SLOTS};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Coordinate vector; ranks up to 4 stay inline
pub type Indices = SmallVec<[i32; 4]>;

/// One dimension of an array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// Smallest valid logical index
    pub lower_bound: i32,
    /// Number of valid indices
    pub length: i32,
}

impl Dimension {
    /// Largest valid logical index; `lower_bound - 1` when empty
    pub fn upper_bound(&self) -> i32 {
        // Construction guarantees this cannot overflow.
        self.lower_bound + self.length - 1
    }

    /// True if `index` is a valid logical index in this dimension
    pub fn contains(&self, index: i64) -> bool {
        index >= i64::from(self.lower_bound) && index <= i64::from(self.upper_bound())
    }
}

/// Shape of an array: rank, per-dimension bounds and strides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsTable {
    dims: SmallVec<[Dimension; 4]>,
    strides: SmallVec<[u64; 4]>,
    total: u64,
}

impl BoundsTable {
    /// Build a table from per-dimension lengths and optional lower bounds
    ///
    /// Lower bounds default to zero.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `lengths` is empty, if `lower_bounds` has a
    ///   different count, if an upper bound does not fit `i32`, or if the
    ///   element count exceeds the addressable slot count
    /// - `OutOfRange` if any length is negative
    pub fn new(lengths: &[i32], lower_bounds: Option<&[i32]>) -> Result<Self> {
        if lengths.is_empty() {
            return Err(Error::invalid_argument("rank must be at least 1"));
        }
        if let Some(lowers) = lower_bounds {
            if lowers.len() != lengths.len() {
                return Err(Error::invalid_argument(format!(
                    "{} lower bounds supplied for {} dimensions",
                    lowers.len(),
                    lengths.len()
                )));
            }
        }

        let mut dims: SmallVec<[Dimension; 4]> = SmallVec::with_capacity(lengths.len());
        for (d, &length) in lengths.iter().enumerate() {
            if length < 0 {
                return Err(Error::out_of_range(
                    "lengths",
                    format!("length {} of dimension {} is negative", length, d),
                ));
            }
            let lower_bound = lower_bounds.map_or(0, |lowers| lowers[d]);
            let upper = i64::from(lower_bound) + i64::from(length) - 1;
            if i32::try_from(upper).is_err() {
                return Err(Error::invalid_argument(format!(
                    "upper bound of dimension {} does not fit a 32-bit index",
                    d
                )));
            }
            dims.push(Dimension {
                lower_bound,
                length,
            });
        }

        // Saturation is harmless: anything past the ceiling is rejected below.
        let total = dims
            .iter()
            .fold(1u64, |acc, dim| acc.saturating_mul(dim.length as u64));
        if total > MAX_ADDRESSABLE_SLOTS {
            return Err(Error::invalid_argument(format!(
                "array of {} elements exceeds the addressable maximum of {}",
                total, MAX_ADDRESSABLE_SLOTS
            )));
        }

        // Strides only overflow when a zero-length dimension empties the
        // array, and an empty array never resolves an offset.
        let mut strides: SmallVec<[u64; 4]> = SmallVec::from_elem(1, dims.len());
        for d in (0..dims.len() - 1).rev() {
            strides[d] = strides[d + 1].saturating_mul(dims[d + 1].length as u64);
        }

        Ok(BoundsTable {
            dims,
            strides,
            total,
        })
    }

    /// Single zero-based dimension of `length` elements
    pub fn vector(length: i32) -> Result<Self> {
        Self::new(&[length], None)
    }

    // ========================================================================
    // Per-dimension queries
    // ========================================================================

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// All dimensions, outermost first
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dims
    }

    /// Dimension `d`
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `d >= rank`.
    pub fn dimension(&self, d: usize) -> Result<&Dimension> {
        self.dims.get(d).ok_or_else(|| {
            Error::out_of_range(
                "dimension",
                format!("dimension {} does not exist in a rank {} array", d, self.rank()),
            )
        })
    }

    /// Lower bound of dimension `d`
    pub fn lower_bound(&self, d: usize) -> Result<i32> {
        Ok(self.dimension(d)?.lower_bound)
    }

    /// Upper bound of dimension `d`
    pub fn upper_bound(&self, d: usize) -> Result<i32> {
        Ok(self.dimension(d)?.upper_bound())
    }

    /// Length of dimension `d`
    pub fn length(&self, d: usize) -> Result<i32> {
        Ok(self.dimension(d)?.length)
    }

    // ========================================================================
    // Totals
    // ========================================================================

    /// Total element count as a 32-bit value
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the count exceeds `i32::MAX`; use
    /// [`BoundsTable::total_length_long`] for such arrays.
    pub fn total_length(&self) -> Result<i32> {
        i32::try_from(self.total).map_err(|_| {
            Error::invalid_argument(format!(
                "array of {} elements is too large for a 32-bit length",
                self.total
            ))
        })
    }

    /// Total element count
    pub fn total_length_long(&self) -> u64 {
        self.total
    }

    /// True if the array has no elements
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    // ========================================================================
    // Offset arithmetic
    // ========================================================================

    fn check_index(&self, d: usize, index: i64) -> Result<u64> {
        let dim = &self.dims[d];
        if !dim.contains(index) {
            return Err(Error::out_of_range(
                "indices",
                format!(
                    "index {} of dimension {} is outside [{}, {}]",
                    index,
                    d,
                    dim.lower_bound,
                    dim.upper_bound()
                ),
            ));
        }
        Ok((index - i64::from(dim.lower_bound)) as u64)
    }

    fn check_count(&self, supplied: usize) -> Result<()> {
        if supplied != self.rank() {
            return Err(Error::invalid_argument(format!(
                "{} indices supplied for a rank {} array",
                supplied,
                self.rank()
            )));
        }
        Ok(())
    }

    /// Map logical indices to a relative offset
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `indices.len() != rank`
    /// - `OutOfRange` if any index lies outside its dimension
    pub fn to_relative(&self, indices: &[i32]) -> Result<usize> {
        self.check_count(indices.len())?;
        let mut offset = 0u64;
        for (d, &index) in indices.iter().enumerate() {
            offset += self.check_index(d, i64::from(index))? * self.strides[d];
        }
        Ok(offset as usize)
    }

    /// Same as [`BoundsTable::to_relative`] for 64-bit indices
    ///
    /// Indices that do not fit `i32` are out of range.
    pub fn to_relative_long(&self, indices: &[i64]) -> Result<usize> {
        self.check_count(indices.len())?;
        let mut offset = 0u64;
        for (d, &index) in indices.iter().enumerate() {
            offset += self.check_index(d, index)? * self.strides[d];
        }
        Ok(offset as usize)
    }

    /// Rank-1 fast path
    pub fn to_relative1(&self, i: i32) -> Result<usize> {
        self.check_count(1)?;
        Ok(self.check_index(0, i64::from(i))? as usize)
    }

    /// Rank-2 fast path
    pub fn to_relative2(&self, i: i32, j: i32) -> Result<usize> {
        self.check_count(2)?;
        let row = self.check_index(0, i64::from(i))?;
        let col = self.check_index(1, i64::from(j))?;
        Ok((row * self.strides[0] + col) as usize)
    }

    /// Rank-3 fast path
    pub fn to_relative3(&self, i: i32, j: i32, k: i32) -> Result<usize> {
        self.check_count(3)?;
        let a = self.check_index(0, i64::from(i))?;
        let b = self.check_index(1, i64::from(j))?;
        let c = self.check_index(2, i64::from(k))?;
        Ok((a * self.strides[0] + b * self.strides[1] + c) as usize)
    }

    /// Decompose a row-major position into logical indices
    ///
    /// Coordinates are peeled off from the last dimension to the first by
    /// repeated remainder and division, then shifted by each lower bound.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if `position >= total_length_long()`.
    pub fn coordinates(&self, position: u64) -> Result<Indices> {
        if position >= self.total {
            return Err(Error::out_of_range(
                "position",
                format!("position {} is past the last of {} elements", position, self.total),
            ));
        }
        let mut indices: Indices = SmallVec::from_elem(0, self.rank());
        let mut rest = position;
        for (d, dim) in self.dims.iter().enumerate().rev() {
            let len = dim.length as u64;
            indices[d] = dim.lower_bound + (rest % len) as i32;
            rest /= len;
        }
        Ok(indices)
    }
}
