//! Array element type compatibility
//!
//! Decides whether elements of one array type may be bulk-copied into an
//! array of another element type, and which conversion path applies. This
//! is a pure predicate over type handles: it says whether a copy may start,
//! not whether every element will convert (a deferred cast can still fail
//! per element).

use crate::convert::has_widening_conversion;
use crate::types::ElementType;

/// Conversion path between two array element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// Destination accepts the source directly (identity, upcast, boxing)
    Direct,
    /// Destination is a value type the source may hold boxed
    Unbox,
    /// Lossless primitive widening
    Widen,
    /// Reference downcast, checked per element at copy time
    DeferredCast,
}

/// Classify the conversion from `src` elements into `dest` slots
///
/// Rules are evaluated in order; the first match wins. `None` means the
/// types are incompatible.
pub fn classify(src: &ElementType, dest: &ElementType) -> Option<Coercion> {
    if dest.is_assignable_from(src) {
        return Some(Coercion::Direct);
    }
    if dest.is_value_type() && src.is_assignable_from(dest) {
        return Some(Coercion::Unbox);
    }
    if let (Some(from), Some(to)) = (src.primitive_kind(), dest.primitive_kind()) {
        return has_widening_conversion(from, to).then_some(Coercion::Widen);
    }
    if !src.is_value_type() && !dest.is_value_type() && src.is_assignable_from(dest) {
        return Some(Coercion::DeferredCast);
    }
    None
}

/// True if a bulk copy from `src` to `dest` element types may proceed
pub fn compatible(src: &ElementType, dest: &ElementType) -> bool {
    classify(src, dest).is_some()
}
