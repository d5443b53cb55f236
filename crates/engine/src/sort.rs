//! In-place partition sort
//!
//! Keys are sorted over a logical range with a middle-element pivot and two
//! cursors scanning inward. After each partition the smaller side is sorted
//! recursively and the larger side by looping, so recursion depth stays
//! logarithmic whatever the input order. An optional items array is
//! permuted in lockstep with the keys.
//!
//! A comparer that reports `InvalidArgument` has broken its contract; that
//! error surfaces as `InvalidState`. The mapping happens at each comparison
//! call site and nowhere else.

use std::cmp::Ordering;

use rankarray_core::{Comparer, DefaultComparer, Element, Error, Result};
use rankarray_storage::StorageEngine;
use tracing::trace;

use crate::array::Array;

/// Sort a rank-1 array
///
/// Without a comparer the elements' own ordering is used.
///
/// # Errors
///
/// - `RankMismatch` unless the array has rank 1
/// - `InvalidState` if two elements cannot be ordered or the comparer is
///   inconsistent
pub fn sort<S: StorageEngine>(keys: &mut Array<S>, comparer: Option<&dyn Comparer>) -> Result<()> {
    keys.require_rank(1)?;
    let (start, count) = whole(keys)?;
    run::<S, S>(keys, None, start, count, comparer)
}

/// Sort `length` elements of a rank-1 array starting at logical `index`
///
/// # Errors
///
/// - `RankMismatch` unless rank 1
/// - `OutOfRange` if `index < lower_bound(0)` or `length < 0`
/// - `InvalidArgument` if the range runs past the end
/// - `InvalidState` as for [`sort`]
pub fn sort_range<S: StorageEngine>(
    keys: &mut Array<S>,
    index: i32,
    length: i32,
    comparer: Option<&dyn Comparer>,
) -> Result<()> {
    keys.require_rank(1)?;
    let (start, count) = keys.flat_range("index", i64::from(index), i64::from(length))?;
    run::<S, S>(keys, None, start, count, comparer)
}

/// Sort `keys`, applying the same permutation to `items`
///
/// # Errors
///
/// - `RankMismatch` unless both arrays have rank 1
/// - `InvalidArgument` if `items` has a different lower bound or is shorter
///   than `keys`
/// - `InvalidState` as for [`sort`]
pub fn sort_with_items<S: StorageEngine, T: StorageEngine>(
    keys: &mut Array<S>,
    items: &mut Array<T>,
    comparer: Option<&dyn Comparer>,
) -> Result<()> {
    keys.require_rank(1)?;
    items.require_rank(1)?;
    check_same_lower_bound(keys, items)?;
    if items.long_length() < keys.long_length() {
        return Err(Error::invalid_argument(format!(
            "items array of {} elements is shorter than the {} keys",
            items.long_length(),
            keys.long_length()
        )));
    }
    let (start, count) = whole(keys)?;
    run(keys, Some(items), start, count, comparer)
}

/// Range form of [`sort_with_items`]
///
/// The range is validated against `keys` and must also lie inside `items`.
pub fn sort_range_with_items<S: StorageEngine, T: StorageEngine>(
    keys: &mut Array<S>,
    items: &mut Array<T>,
    index: i32,
    length: i32,
    comparer: Option<&dyn Comparer>,
) -> Result<()> {
    keys.require_rank(1)?;
    let (start, count) = keys.flat_range("index", i64::from(index), i64::from(length))?;
    items.require_rank(1)?;
    check_same_lower_bound(keys, items)?;
    items
        .flat_range("index", i64::from(index), i64::from(length))
        .map_err(|_| {
            Error::invalid_argument(format!(
                "range of {} elements from {} does not fit the items array",
                length, index
            ))
        })?;
    run(keys, Some(items), start, count, comparer)
}

fn whole<S: StorageEngine>(keys: &Array<S>) -> Result<(usize, usize)> {
    Ok((0, keys.dimension_length(0)? as usize))
}

fn check_same_lower_bound<S: StorageEngine, T: StorageEngine>(
    keys: &Array<S>,
    items: &Array<T>,
) -> Result<()> {
    let (k, i) = (keys.lower_bound(0)?, items.lower_bound(0)?);
    if k != i {
        return Err(Error::invalid_argument(format!(
            "items lower bound {} differs from keys lower bound {}",
            i, k
        )));
    }
    Ok(())
}

fn run<S: StorageEngine, T: StorageEngine>(
    keys: &mut Array<S>,
    items: Option<&mut Array<T>>,
    start: usize,
    count: usize,
    comparer: Option<&dyn Comparer>,
) -> Result<()> {
    if count < 2 {
        return Ok(());
    }
    let mut sorter = Partitioner {
        keys: keys.storage_mut(),
        items: items.map(|items| items.storage_mut()),
        comparer: comparer.unwrap_or(&DefaultComparer),
    };
    sorter.quicksort(start as i64, (start + count - 1) as i64, 0)
}

// ============================================================================
// Partitioning
// ============================================================================

struct Partitioner<'a, S, T> {
    keys: &'a mut S,
    items: Option<&'a mut T>,
    comparer: &'a dyn Comparer,
}

impl<S: StorageEngine, T: StorageEngine> Partitioner<'_, S, T> {
    fn compare_at(&self, offset: i64, pivot: &Element) -> Result<Ordering> {
        let key = self.keys.raw_get(offset as usize);
        self.comparer.compare(&key, pivot).map_err(|e| match e {
            Error::InvalidArgument(message) => {
                Error::invalid_state(format!("comparer failed: {}", message))
            }
            other => other,
        })
    }

    fn swap(&mut self, a: i64, b: i64) {
        self.keys.raw_swap(a as usize, b as usize);
        if let Some(items) = self.items.as_deref_mut() {
            items.raw_swap(a as usize, b as usize);
        }
    }

    fn quicksort(&mut self, mut lower: i64, mut upper: i64, depth: usize) -> Result<()> {
        while lower < upper {
            let mut i = lower;
            let mut j = upper;
            let pivot = self.keys.raw_get((i + (j - i) / 2) as usize);
            loop {
                while self.compare_at(i, &pivot)? == Ordering::Less {
                    i += 1;
                    if i > upper {
                        return Err(inconsistent());
                    }
                }
                while self.compare_at(j, &pivot)? == Ordering::Greater {
                    j -= 1;
                    if j < lower {
                        return Err(inconsistent());
                    }
                }
                if i > j {
                    break;
                }
                if i < j {
                    self.swap(i, j);
                }
                i += 1;
                j -= 1;
                if i > j {
                    break;
                }
            }

            trace!(
                target: "rankarray::sort",
                lower,
                upper,
                split_left = j,
                split_right = i,
                depth,
                "Partitioned"
            );

            if j - lower <= upper - i {
                if lower < j {
                    self.quicksort(lower, j, depth + 1)?;
                }
                lower = i;
            } else {
                if i < upper {
                    self.quicksort(i, upper, depth + 1)?;
                }
                upper = j;
            }
        }
        Ok(())
    }
}

fn inconsistent() -> Error {
    Error::invalid_state("comparer is inconsistent: a partition cursor left the range")
}
