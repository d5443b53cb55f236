//! Bulk copy between arrays
//!
//! Two paths:
//! - identical element types: one raw bulk copy, no per-element work
//! - different element types: the coercion policy must classify the pair,
//!   then every element is converted on its way to the destination
//!
//! All range and rank validation happens before the first write. A
//! conversion failure in the element-wise path aborts the copy with
//! `CastFailure`; elements already written stay written.
//!
//! Indices are flat: they count row-major from `lower_bound(0)`, so the
//! same functions copy between multi-dimensional arrays of equal rank.

use rankarray_core::{classify, convert_element, Error, Result};
use rankarray_storage::StorageEngine;
use tracing::{debug, warn};

use crate::array::Array;

/// Copy `length` elements from `src[src_index..]` to `dest[dest_index..]`
///
/// # Errors
///
/// - `RankMismatch` if the arrays have different ranks
/// - `OutOfRange` if an index is below its array's `lower_bound(0)` or
///   `length` is negative
/// - `InvalidArgument` if the range does not fit either array
/// - `TypeMismatch` if the element types are incompatible; nothing is written
/// - `CastFailure` if an element fails to convert; earlier elements remain
///   written
pub fn copy<S: StorageEngine>(
    src: &Array<S>,
    src_index: i32,
    dest: &mut Array<S>,
    dest_index: i32,
    length: i32,
) -> Result<()> {
    copy_long(
        src,
        i64::from(src_index),
        dest,
        i64::from(dest_index),
        i64::from(length),
    )
}

/// Copy the first `length` elements of `src` to the start of `dest`
pub fn copy_from_start<S: StorageEngine>(
    src: &Array<S>,
    dest: &mut Array<S>,
    length: i32,
) -> Result<()> {
    let src_index = src.lower_bound(0)?;
    let dest_index = dest.lower_bound(0)?;
    copy(src, src_index, dest, dest_index, length)
}

/// 64-bit overload of [`copy`]
///
/// Indices and lengths that do not fit `i32` are out of range.
pub fn copy_long<S: StorageEngine>(
    src: &Array<S>,
    src_index: i64,
    dest: &mut Array<S>,
    dest_index: i64,
    length: i64,
) -> Result<()> {
    let src_index = downgrade("src_index", src_index)?;
    let dest_index = downgrade("dest_index", dest_index)?;
    let length = downgrade("length", length)?;

    if src.rank() != dest.rank() {
        return Err(Error::RankMismatch {
            expected: src.rank(),
            actual: dest.rank(),
        });
    }
    let (src_offset, count) = src.flat_range("src_index", src_index, length)?;
    let (dest_offset, _) = dest.flat_range("dest_index", dest_index, length)?;

    transfer(src, src_offset, dest, dest_offset, count)
}

/// Copy within one array; source and destination ranges may overlap
///
/// The result is as if the source range were first copied to a temporary.
pub fn copy_within<S: StorageEngine>(
    array: &mut Array<S>,
    src_index: i32,
    dest_index: i32,
    length: i32,
) -> Result<()> {
    let (src_offset, count) = array.flat_range("src_index", i64::from(src_index), i64::from(length))?;
    let (dest_offset, _) =
        array.flat_range("dest_index", i64::from(dest_index), i64::from(length))?;
    if count > 0 {
        array
            .storage_mut()
            .raw_copy_within(src_offset, dest_offset, count);
    }
    Ok(())
}

/// Copy all of a rank-1 `src` into `dest`, starting `index` elements past
/// `dest`'s lower bound
///
/// # Errors
///
/// `RankMismatch` unless both arrays have rank 1; otherwise as [`copy`].
pub fn copy_to<S: StorageEngine>(src: &Array<S>, dest: &mut Array<S>, index: i32) -> Result<()> {
    src.require_rank(1)?;
    dest.require_rank(1)?;
    let dest_index = i64::from(dest.lower_bound(0)?) + i64::from(index);
    copy_long(
        src,
        i64::from(src.lower_bound(0)?),
        dest,
        dest_index,
        i64::from(src.dimension_length(0)?),
    )
}

fn downgrade(name: &str, value: i64) -> Result<i64> {
    if i32::try_from(value).is_err() {
        return Err(Error::out_of_range(
            name,
            format!("{} does not fit a 32-bit index", value),
        ));
    }
    Ok(value)
}

fn transfer<S: StorageEngine>(
    src: &Array<S>,
    src_offset: usize,
    dest: &mut Array<S>,
    dest_offset: usize,
    count: usize,
) -> Result<()> {
    let src_type = src.element_type().clone();
    let dest_type = dest.element_type().clone();

    if src_type == dest_type {
        debug!(target: "rankarray::copy", element_type = %src_type, count, "Raw bulk copy");
        if count > 0 {
            S::raw_bulk_copy(src.storage(), src_offset, dest.storage_mut(), dest_offset, count);
        }
        return Ok(());
    }

    let coercion = classify(&src_type, &dest_type).ok_or_else(|| Error::TypeMismatch {
        from: src_type.name().to_string(),
        to: dest_type.name().to_string(),
    })?;
    debug!(
        target: "rankarray::copy",
        from = %src_type,
        to = %dest_type,
        ?coercion,
        count,
        "Element-wise copy"
    );

    for i in 0..count {
        let value = src.storage().raw_get(src_offset + i);
        match convert_element(&value, &src_type, &dest_type) {
            Ok(converted) => dest.storage_mut().raw_set(dest_offset + i, converted),
            Err(e) => {
                warn!(
                    target: "rankarray::copy",
                    written = i,
                    requested = count,
                    error = %e,
                    "Element-wise copy aborted; destination prefix already overwritten"
                );
                return Err(e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankarray_core::{Element, ElementType, ErrorKind, ObjectRef, PrimitiveKind, TypeRegistry};
    use rankarray_storage::NativeBuffer;

    fn prim(kind: PrimitiveKind) -> ElementType {
        ElementType::primitive(kind)
    }

    fn ints(values: &[i32]) -> Array {
        Array::from_elements(prim(PrimitiveKind::I32), values.iter().copied()).unwrap()
    }

    #[test]
    fn test_same_type_copy() {
        let src = ints(&[1, 2, 3, 4]);
        let mut dest = ints(&[0, 0, 0, 0, 0]);
        copy(&src, 1, &mut dest, 2, 3).unwrap();
        assert_eq!(dest.to_vec(), [0, 0, 2, 3, 4].map(Element::I32).to_vec());
    }

    #[test]
    fn test_widening_copy() {
        let src: Array<NativeBuffer> =
            Array::from_elements(prim(PrimitiveKind::U8), [1u8, 200]).unwrap();
        let mut dest: Array<NativeBuffer> = Array::vector(prim(PrimitiveKind::F64), 2).unwrap();
        copy_from_start(&src, &mut dest, 2).unwrap();
        assert_eq!(dest.to_vec(), vec![Element::F64(1.0), Element::F64(200.0)]);
    }

    #[test]
    fn test_incompatible_copy_writes_nothing() {
        let src: Array = Array::from_elements(prim(PrimitiveKind::I64), [1i64, 2]).unwrap();
        let mut dest = ints(&[7, 7]);
        let err = copy_from_start(&src, &mut dest, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(dest.to_vec(), [7, 7].map(Element::I32).to_vec());
    }

    #[test]
    fn test_same_named_classes_do_not_alias() {
        let object = ElementType::object();
        let base = ElementType::class("Base", &object).unwrap();
        let nested = ElementType::class("Leaf", &base).unwrap();
        let top = ElementType::class("Leaf", &object).unwrap();

        let mut src: Array = Array::vector(nested.clone(), 1).unwrap();
        src.set_value1(0, ObjectRef::new(nested, "n")).unwrap();
        let mut dest: Array = Array::vector(top, 1).unwrap();
        let err = copy(&src, 0, &mut dest, 0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(dest.get_value1(0).unwrap().is_null());
    }

    #[test]
    fn test_boxing_and_unboxing() {
        let src = ints(&[4, 5]);
        let mut boxed: Array = Array::vector(ElementType::object(), 2).unwrap();
        copy_from_start(&src, &mut boxed, 2).unwrap();
        assert_eq!(boxed.to_vec(), [4, 5].map(Element::I32).to_vec());

        let mut unboxed = ints(&[0, 0]);
        copy_from_start(&boxed, &mut unboxed, 2).unwrap();
        assert_eq!(unboxed.to_vec(), [4, 5].map(Element::I32).to_vec());
    }

    #[test]
    fn test_unboxing_failure_leaves_prefix() {
        let src: Array =
            Array::from_elements(ElementType::object(), [Element::I32(1), Element::from("x"), Element::I32(3)])
                .unwrap();
        let mut dest = ints(&[9, 9, 9]);
        let err = copy_from_start(&src, &mut dest, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CastFailure);
        assert_eq!(dest.to_vec(), [1, 9, 9].map(Element::I32).to_vec());
    }

    #[test]
    fn test_deferred_downcast() {
        let mut registry = TypeRegistry::new();
        let animal = registry.define_class("Animal", "object").unwrap();
        let dog = registry.define_class("Dog", "Animal").unwrap();
        let cat = registry.define_class("Cat", "Animal").unwrap();

        let src: Array = Array::from_elements(
            animal,
            [
                Element::from(ObjectRef::new(dog.clone(), "rex")),
                Element::Null,
                Element::from(ObjectRef::new(cat, "tom")),
            ],
        )
        .unwrap();
        let mut dogs: Array = Array::vector(dog, 3).unwrap();
        let err = copy_from_start(&src, &mut dogs, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CastFailure);
        assert_eq!(dogs.get_value1(0).unwrap(), src.get_value1(0).unwrap());
        assert!(dogs.get_value1(1).unwrap().is_null());
        assert!(dogs.get_value1(2).unwrap().is_null());
    }

    #[test]
    fn test_validation_order() {
        let src = ints(&[1, 2, 3]);
        let mut dest = ints(&[0, 0, 0]);
        let mut grid: Array = Array::create(prim(PrimitiveKind::I32), &[1, 3]).unwrap();

        assert_eq!(
            copy(&src, 0, &mut grid, 0, 1).unwrap_err().kind(),
            ErrorKind::RankMismatch
        );
        assert_eq!(
            copy(&src, -1, &mut dest, 0, 1).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            copy(&src, 0, &mut dest, -1, 1).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            copy(&src, 0, &mut dest, 0, -1).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            copy(&src, 2, &mut dest, 0, 2).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            copy(&src, 0, &mut dest, 2, 2).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        copy(&src, 3, &mut dest, 3, 0).unwrap();
    }

    #[test]
    fn test_non_zero_lower_bounds() {
        let src: Array = Array::create_with_bounds(prim(PrimitiveKind::I32), &[3], &[10]).unwrap();
        let mut dest = ints(&[5, 5, 5]);
        copy(&src, 11, &mut dest, 0, 2).unwrap();
        assert_eq!(dest.to_vec(), [0, 0, 5].map(Element::I32).to_vec());
        assert_eq!(
            copy(&src, 0, &mut dest, 0, 1).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_multi_dimensional_flat_copy() {
        let mut src: Array = Array::create(prim(PrimitiveKind::I32), &[2, 2]).unwrap();
        src.set_value2(1, 0, 3).unwrap();
        src.set_value2(1, 1, 4).unwrap();
        let mut dest: Array = Array::create(prim(PrimitiveKind::I32), &[2, 2]).unwrap();
        copy(&src, 2, &mut dest, 0, 2).unwrap();
        assert_eq!(dest.get_value2(0, 0).unwrap(), Element::I32(3));
        assert_eq!(dest.get_value2(0, 1).unwrap(), Element::I32(4));
    }

    #[test]
    fn test_copy_within_overlap() {
        let mut array = ints(&[1, 2, 3, 4, 5]);
        copy_within(&mut array, 0, 1, 4).unwrap();
        assert_eq!(array.to_vec(), [1, 1, 2, 3, 4].map(Element::I32).to_vec());
        copy_within(&mut array, 2, 0, 3).unwrap();
        assert_eq!(array.to_vec(), [2, 3, 4, 3, 4].map(Element::I32).to_vec());
        assert_eq!(
            copy_within(&mut array, 0, 3, 3).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_copy_to() {
        let src = ints(&[7, 8]);
        let mut dest: Array = Array::create_with_bounds(prim(PrimitiveKind::I32), &[4], &[5]).unwrap();
        copy_to(&src, &mut dest, 1).unwrap();
        assert_eq!(dest.to_vec(), [0, 7, 8, 0].map(Element::I32).to_vec());
        assert_eq!(
            copy_to(&src, &mut dest, 3).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        let mut grid: Array = Array::create(prim(PrimitiveKind::I32), &[2, 2]).unwrap();
        assert_eq!(
            copy_to(&src, &mut grid, 0).unwrap_err().kind(),
            ErrorKind::RankMismatch
        );
    }

    #[test]
    fn test_copy_long_downgrade() {
        let src = ints(&[1]);
        let mut dest = ints(&[0]);
        copy_long(&src, 0, &mut dest, 0, 1).unwrap();
        assert_eq!(dest.get_value1(0).unwrap(), Element::I32(1));
        assert_eq!(
            copy_long(&src, 0, &mut dest, 0, 1 << 33).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
    }
}
