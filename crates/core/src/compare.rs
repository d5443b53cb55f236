//! Ordering comparators
//!
//! A [`Comparer`] is a three-way comparison between two elements. It is
//! supplied per call to search and sort and never stored. Any
//! `Fn(&Element, &Element) -> Result<Ordering>` closure is a comparer.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::value::Element;

/// Three-way element comparison
pub trait Comparer {
    /// Order `a` relative to `b`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the two elements cannot be ordered.
    fn compare(&self, a: &Element, b: &Element) -> Result<Ordering>;
}

impl<F> Comparer for F
where
    F: Fn(&Element, &Element) -> Result<Ordering>,
{
    fn compare(&self, a: &Element, b: &Element) -> Result<Ordering> {
        self(a, b)
    }
}

/// Comparer derived from the elements' own orderable capability
///
/// Null orders before every non-null value and equal to null. Otherwise
/// `a` orders itself against `b`; if `a` is not orderable, `b`'s ordering
/// is used inverted.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparer;

impl Comparer for DefaultComparer {
    fn compare(&self, a: &Element, b: &Element) -> Result<Ordering> {
        match (a.is_null(), b.is_null()) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => return Ok(Ordering::Less),
            (false, true) => return Ok(Ordering::Greater),
            (false, false) => {}
        }
        if let Some(ordering) = a.try_compare(b) {
            return ordering;
        }
        if let Some(ordering) = b.try_compare(a) {
            return ordering.map(Ordering::reverse);
        }
        Err(Error::invalid_argument(format!(
            "neither {} nor {} is orderable",
            a.type_name(),
            b.type_name()
        )))
    }
}

/// Comparer that inverts another comparer
#[derive(Debug, Clone, Copy)]
pub struct Reversed<C>(pub C);

impl<C: Comparer> Comparer for Reversed<C> {
    fn compare(&self, a: &Element, b: &Element) -> Result<Ordering> {
        self.0.compare(a, b).map(Ordering::reverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::ElementType;
    use crate::value::ObjectRef;

    #[test]
    fn test_default_nulls_first() {
        let cmp = DefaultComparer;
        assert_eq!(cmp.compare(&Element::Null, &Element::I32(-9)).unwrap(), Ordering::Less);
        assert_eq!(cmp.compare(&Element::I32(-9), &Element::Null).unwrap(), Ordering::Greater);
        assert_eq!(cmp.compare(&Element::Null, &Element::Null).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_default_orders_values() {
        let cmp = DefaultComparer;
        assert_eq!(cmp.compare(&"b".into(), &"a".into()).unwrap(), Ordering::Greater);
        assert_eq!(cmp.compare(&Element::U64(1), &Element::U64(1)).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_default_rejects_unorderable() {
        let class = ElementType::class("Blob", &ElementType::object()).unwrap();
        let blob = Element::Object(ObjectRef::new(class, "b"));
        let err = DefaultComparer.compare(&blob, &blob.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_default_inverts_when_left_unorderable() {
        let class = ElementType::class("Blob", &ElementType::object()).unwrap();
        let blob = Element::Object(ObjectRef::new(class, "b"));
        // The right-hand value cannot order an object, so this still fails.
        let err = DefaultComparer.compare(&blob, &Element::I32(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_closure_comparer() {
        let by_abs = |a: &Element, b: &Element| -> Result<Ordering> {
            match (a, b) {
                (Element::I32(x), Element::I32(y)) => Ok(x.abs().cmp(&y.abs())),
                _ => Err(Error::invalid_argument("i32 only")),
            }
        };
        assert_eq!(by_abs.compare(&Element::I32(-5), &Element::I32(3)).unwrap(), Ordering::Greater);
        assert_eq!(
            Reversed(by_abs).compare(&Element::I32(-5), &Element::I32(3)).unwrap(),
            Ordering::Less
        );
    }
}
