//! Binary and linear search over rank-1 arrays
//!
//! Binary search returns the index of a match, or the bitwise complement of
//! the insertion point when there is none, so callers distinguish the two by
//! sign. Index arithmetic is done in 64 bits; the insertion point itself
//! must fit `i32`, which is why a range ending at `i32::MAX` is rejected.

use std::cmp::Ordering;

use rankarray_core::{Comparer, Element, Error, Result};
use rankarray_storage::StorageEngine;

use crate::array::Array;

/// Binary search the whole of a sorted rank-1 array
///
/// See [`binary_search_range`].
pub fn binary_search<S: StorageEngine>(
    array: &Array<S>,
    value: &Element,
    comparer: Option<&dyn Comparer>,
) -> Result<i32> {
    array.require_rank(1)?;
    let lower = array.lower_bound(0)?;
    let length = array.dimension_length(0)?;
    binary_search_range(array, lower, length, value, comparer)
}

/// Binary search `length` elements starting at logical index `index`
///
/// The range must be sorted ascending under the comparison used. Without a
/// comparer, the element's own ordering is used (inverted), falling back
/// to the searched value's ordering. Null orders before everything else,
/// and pairs involving null are decided without calling the comparer.
///
/// # Errors
///
/// - `RankMismatch` unless the array has rank 1
/// - `OutOfRange` if `index < lower_bound(0)` or `length < 0`
/// - `InvalidArgument` if the range runs past the end, ends at `i32::MAX`,
///   or two elements cannot be ordered
pub fn binary_search_range<S: StorageEngine>(
    array: &Array<S>,
    index: i32,
    length: i32,
    value: &Element,
    comparer: Option<&dyn Comparer>,
) -> Result<i32> {
    array.require_rank(1)?;
    let (start, _) = array.flat_range("index", i64::from(index), i64::from(length))?;
    let lower = i64::from(index);
    let upper = lower + i64::from(length) - 1;
    if upper == i64::from(i32::MAX) {
        return Err(Error::invalid_argument(
            "search range may not end at the maximum index",
        ));
    }
    let base = lower - start as i64;

    let mut left = lower;
    let mut right = upper;
    while left <= right {
        let middle = left + (right - left) / 2;
        let element = array.storage().raw_get((middle - base) as usize);
        match order(comparer, value, &element)? {
            Ordering::Equal => return Ok(middle as i32),
            Ordering::Less => right = middle - 1,
            Ordering::Greater => left = middle + 1,
        }
    }
    Ok(!(left as i32))
}

// Order of `value` relative to `element`.
fn order(comparer: Option<&dyn Comparer>, value: &Element, element: &Element) -> Result<Ordering> {
    match (value.is_null(), element.is_null()) {
        (true, true) => return Ok(Ordering::Equal),
        (true, false) => return Ok(Ordering::Less),
        (false, true) => return Ok(Ordering::Greater),
        (false, false) => {}
    }
    if let Some(comparer) = comparer {
        return comparer.compare(value, element);
    }
    if let Some(ordering) = element.try_compare(value) {
        return ordering.map(Ordering::reverse);
    }
    if let Some(ordering) = value.try_compare(element) {
        return ordering;
    }
    Err(Error::invalid_argument(format!(
        "cannot order {} against {}",
        value.type_name(),
        element.type_name()
    )))
}

// ============================================================================
// Linear search
// ============================================================================

/// First logical index holding a value equal to `value`
pub fn index_of<S: StorageEngine>(array: &Array<S>, value: &Element) -> Result<Option<i32>> {
    array.require_rank(1)?;
    let lower = array.lower_bound(0)?;
    index_of_range(array, value, lower, array.dimension_length(0)?)
}

/// First match at or after `start`
pub fn index_of_from<S: StorageEngine>(
    array: &Array<S>,
    value: &Element,
    start: i32,
) -> Result<Option<i32>> {
    array.require_rank(1)?;
    let upper = i64::from(array.upper_bound(0)?);
    let count = (upper - i64::from(start) + 1).clamp(0, i64::from(i32::MAX)) as i32;
    index_of_range(array, value, start, count)
}

/// First match within `count` elements starting at `start`
///
/// # Errors
///
/// `RankMismatch` unless rank 1; `OutOfRange` if `start` is outside
/// `[lower_bound, upper_bound + 1]` or `count` runs past the end.
pub fn index_of_range<S: StorageEngine>(
    array: &Array<S>,
    value: &Element,
    start: i32,
    count: i32,
) -> Result<Option<i32>> {
    array.require_rank(1)?;
    let lower = i64::from(array.lower_bound(0)?);
    let upper = i64::from(array.upper_bound(0)?);
    let (start, count) = (i64::from(start), i64::from(count));
    if start < lower || start > upper + 1 {
        return Err(Error::out_of_range(
            "start",
            format!("{} is outside [{}, {}]", start, lower, upper + 1),
        ));
    }
    if count < 0 || count > upper - start + 1 {
        return Err(Error::out_of_range(
            "count",
            format!("{} elements from {} exceed the array", count, start),
        ));
    }
    let storage = array.storage();
    let found = (start..start + count)
        .find(|&logical| storage.raw_get((logical - lower) as usize).equals(value));
    Ok(found.map(|logical| logical as i32))
}

/// Last logical index holding a value equal to `value`
pub fn last_index_of<S: StorageEngine>(array: &Array<S>, value: &Element) -> Result<Option<i32>> {
    array.require_rank(1)?;
    let upper = array.upper_bound(0)?;
    last_index_of_range(array, value, upper, array.dimension_length(0)?)
}

/// Last match at or before `start`
pub fn last_index_of_from<S: StorageEngine>(
    array: &Array<S>,
    value: &Element,
    start: i32,
) -> Result<Option<i32>> {
    array.require_rank(1)?;
    let lower = i64::from(array.lower_bound(0)?);
    let count = (i64::from(start) - lower + 1).clamp(0, i64::from(i32::MAX)) as i32;
    last_index_of_range(array, value, start, count)
}

/// Last match within `count` elements ending at `start`, scanning backwards
///
/// An empty array always yields `None`.
///
/// # Errors
///
/// `RankMismatch` unless rank 1; `OutOfRange` if `start` is outside the
/// array or `count` reaches below the lower bound.
pub fn last_index_of_range<S: StorageEngine>(
    array: &Array<S>,
    value: &Element,
    start: i32,
    count: i32,
) -> Result<Option<i32>> {
    array.require_rank(1)?;
    if array.is_empty() {
        return Ok(None);
    }
    let lower = i64::from(array.lower_bound(0)?);
    let upper = i64::from(array.upper_bound(0)?);
    let (start, count) = (i64::from(start), i64::from(count));
    if start < lower || start > upper {
        return Err(Error::out_of_range(
            "start",
            format!("{} is outside [{}, {}]", start, lower, upper),
        ));
    }
    if count < 0 || start - count + 1 < lower {
        return Err(Error::out_of_range(
            "count",
            format!("{} elements back from {} exceed the array", count, start),
        ));
    }
    let storage = array.storage();
    let found = (start - count + 1..=start)
        .rev()
        .find(|&logical| storage.raw_get((logical - lower) as usize).equals(value));
    Ok(found.map(|logical| logical as i32))
}
