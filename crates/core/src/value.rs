//! Element values
//!
//! This module defines:
//! - Element: tagged union for every value an array slot can hold
//! - ObjectRef: an instance of a user-defined reference class
//!
//! ## Equality and ordering
//!
//! Different kinds are never equal: `I32(1) != I64(1)`. Ordering is only
//! defined between elements of the same kind (the "orderable capability");
//! object instances are not orderable. Floats order NaN before every other
//! value, and NaN compares equal to NaN.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::{ElementType, PrimitiveKind};

/// Instance of a user-defined reference class
///
/// The payload is an opaque label; identity is `(class, payload)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRef {
    class: ElementType,
    payload: Arc<str>,
}

impl ObjectRef {
    /// Create an instance of `class`
    pub fn new(class: ElementType, payload: impl Into<Arc<str>>) -> Self {
        ObjectRef {
            class,
            payload: payload.into(),
        }
    }

    /// Runtime class of the instance
    pub fn class(&self) -> &ElementType {
        &self.class
    }

    /// Opaque payload
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Value held by a single array slot
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Null reference
    Null,
    /// Boolean
    Bool(bool),
    /// UTF-16 code unit
    Char(u16),
    /// Signed 8-bit integer
    I8(i8),
    /// Unsigned 8-bit integer
    U8(u8),
    /// Signed 16-bit integer
    I16(i16),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Signed 32-bit integer
    I32(i32),
    /// Unsigned 32-bit integer
    U32(u32),
    /// Signed 64-bit integer
    I64(i64),
    /// Unsigned 64-bit integer
    U64(u64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// String reference
    Str(Arc<str>),
    /// User class instance
    Object(ObjectRef),
}

impl Element {
    /// Zero value of a primitive kind
    pub fn zero(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Bool => Element::Bool(false),
            PrimitiveKind::Char => Element::Char(0),
            PrimitiveKind::I8 => Element::I8(0),
            PrimitiveKind::U8 => Element::U8(0),
            PrimitiveKind::I16 => Element::I16(0),
            PrimitiveKind::U16 => Element::U16(0),
            PrimitiveKind::I32 => Element::I32(0),
            PrimitiveKind::U32 => Element::U32(0),
            PrimitiveKind::I64 => Element::I64(0),
            PrimitiveKind::U64 => Element::U64(0),
            PrimitiveKind::F32 => Element::F32(0.0),
            PrimitiveKind::F64 => Element::F64(0.0),
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Element::Null)
    }

    /// Primitive kind of this value, if it is a primitive
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            Element::Bool(_) => Some(PrimitiveKind::Bool),
            Element::Char(_) => Some(PrimitiveKind::Char),
            Element::I8(_) => Some(PrimitiveKind::I8),
            Element::U8(_) => Some(PrimitiveKind::U8),
            Element::I16(_) => Some(PrimitiveKind::I16),
            Element::U16(_) => Some(PrimitiveKind::U16),
            Element::I32(_) => Some(PrimitiveKind::I32),
            Element::U32(_) => Some(PrimitiveKind::U32),
            Element::I64(_) => Some(PrimitiveKind::I64),
            Element::U64(_) => Some(PrimitiveKind::U64),
            Element::F32(_) => Some(PrimitiveKind::F32),
            Element::F64(_) => Some(PrimitiveKind::F64),
            Element::Null | Element::Str(_) | Element::Object(_) => None,
        }
    }

    /// Runtime type of the value; `None` for null
    pub fn runtime_type(&self) -> Option<ElementType> {
        match self {
            Element::Null => None,
            Element::Str(_) => Some(ElementType::string()),
            Element::Object(obj) => Some(obj.class().clone()),
            other => other.primitive_kind().map(ElementType::primitive),
        }
    }

    /// Name of the runtime type, `"null"` for null
    pub fn type_name(&self) -> String {
        match self.runtime_type() {
            Some(t) => t.name().to_string(),
            None => "null".to_string(),
        }
    }

    /// Value equality
    ///
    /// Same as `==` except that NaN equals NaN.
    pub fn equals(&self, other: &Element) -> bool {
        match (self, other) {
            (Element::F32(a), Element::F32(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Element::F64(a), Element::F64(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self == other,
        }
    }

    /// True if this value can order itself against values of its own kind
    pub fn is_orderable(&self) -> bool {
        !matches!(self, Element::Null | Element::Object(_))
    }

    /// Orderable capability
    ///
    /// Returns `None` if this value is not orderable, `Some(Err(_))` with an
    /// `InvalidArgument` error if `other` is of a different kind, and the
    /// ordering of `self` relative to `other` otherwise. A null `other`
    /// orders before any value.
    pub fn try_compare(&self, other: &Element) -> Option<Result<Ordering>> {
        if !self.is_orderable() {
            return None;
        }
        let ordering = match (self, other) {
            (_, Element::Null) => Ok(Ordering::Greater),
            (Element::Bool(a), Element::Bool(b)) => Ok(a.cmp(b)),
            (Element::Char(a), Element::Char(b)) => Ok(a.cmp(b)),
            (Element::I8(a), Element::I8(b)) => Ok(a.cmp(b)),
            (Element::U8(a), Element::U8(b)) => Ok(a.cmp(b)),
            (Element::I16(a), Element::I16(b)) => Ok(a.cmp(b)),
            (Element::U16(a), Element::U16(b)) => Ok(a.cmp(b)),
            (Element::I32(a), Element::I32(b)) => Ok(a.cmp(b)),
            (Element::U32(a), Element::U32(b)) => Ok(a.cmp(b)),
            (Element::I64(a), Element::I64(b)) => Ok(a.cmp(b)),
            (Element::U64(a), Element::U64(b)) => Ok(a.cmp(b)),
            (Element::F32(a), Element::F32(b)) => Ok(float_order(f64::from(*a), f64::from(*b))),
            (Element::F64(a), Element::F64(b)) => Ok(float_order(*a, *b)),
            (Element::Str(a), Element::Str(b)) => Ok(a.as_ref().cmp(b.as_ref())),
            _ => Err(Error::invalid_argument(format!(
                "object must be of type {}, got {}",
                self.type_name(),
                other.type_name()
            ))),
        };
        Some(ordering)
    }

    /// Get as i32 if this is an I32 value
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Element::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as i64 if this is an I64 value
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Element::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f64 if this is an F64 value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Element::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as &str if this is a Str value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::Str(s) => Some(s),
            _ => None,
        }
    }
}

// NaN sorts first and equals itself.
fn float_order(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            _ => Ordering::Greater,
        },
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Null => f.write_str("null"),
            Element::Bool(v) => write!(f, "{}", v),
            Element::Char(v) => write!(f, "\\u{{{:04x}}}", v),
            Element::I8(v) => write!(f, "{}", v),
            Element::U8(v) => write!(f, "{}", v),
            Element::I16(v) => write!(f, "{}", v),
            Element::U16(v) => write!(f, "{}", v),
            Element::I32(v) => write!(f, "{}", v),
            Element::U32(v) => write!(f, "{}", v),
            Element::I64(v) => write!(f, "{}", v),
            Element::U64(v) => write!(f, "{}", v),
            Element::F32(v) => write!(f, "{}", v),
            Element::F64(v) => write!(f, "{}", v),
            Element::Str(s) => write!(f, "{:?}", s),
            Element::Object(o) => write!(f, "{}({})", o.class(), o.payload()),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

macro_rules! element_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(v: $ty) -> Self {
                    Element::$variant(v)
                }
            }
        )*
    };
}

element_from! {
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    ObjectRef => Object,
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Str(Arc::from(s))
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Str(Arc::from(s))
    }
}

impl<T: Into<Element>> From<Option<T>> for Element {
    fn from(v: Option<T>) -> Self {
        v.map_or(Element::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_different_kinds_never_equal() {
        assert_ne!(Element::I32(1), Element::I64(1));
        assert_ne!(Element::from("1"), Element::I32(1));
        assert!(!Element::I32(1).equals(&Element::U32(1)));
    }

    #[test]
    fn test_nan_equals_nan() {
        let nan = Element::F64(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert!(nan.equals(&Element::F64(f64::NAN)));
    }

    #[test]
    fn test_try_compare_same_kind() {
        let a = Element::I32(3);
        let b = Element::I32(7);
        assert_eq!(a.try_compare(&b).unwrap().unwrap(), Ordering::Less);
        assert_eq!(b.try_compare(&a).unwrap().unwrap(), Ordering::Greater);
        assert_eq!(
            Element::from("abc").try_compare(&"abd".into()).unwrap().unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_try_compare_mismatched_kind_is_invalid_argument() {
        let err = Element::I32(3).try_compare(&Element::I64(3)).unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_try_compare_against_null() {
        assert_eq!(
            Element::U8(0).try_compare(&Element::Null).unwrap().unwrap(),
            Ordering::Greater
        );
        assert!(Element::Null.try_compare(&Element::U8(0)).is_none());
    }

    #[test]
    fn test_objects_not_orderable() {
        let class = ElementType::class("Node", &ElementType::object()).unwrap();
        let obj = Element::Object(ObjectRef::new(class, "n1"));
        assert!(!obj.is_orderable());
        assert!(obj.try_compare(&obj.clone()).is_none());
    }

    #[test]
    fn test_float_nan_orders_first() {
        let nan = Element::F64(f64::NAN);
        let low = Element::F64(f64::NEG_INFINITY);
        assert_eq!(nan.try_compare(&low).unwrap().unwrap(), Ordering::Less);
        assert_eq!(low.try_compare(&nan).unwrap().unwrap(), Ordering::Greater);
        assert_eq!(nan.try_compare(&nan.clone()).unwrap().unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_runtime_type() {
        assert_eq!(Element::Null.runtime_type(), None);
        assert_eq!(
            Element::U16(1).runtime_type(),
            Some(ElementType::primitive(PrimitiveKind::U16))
        );
        assert_eq!(Element::from("x").runtime_type(), Some(ElementType::string()));
        assert_eq!(Element::Null.type_name(), "null");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Element::from(Some(5i32)), Element::I32(5));
        assert_eq!(Element::from(None::<i32>), Element::Null);
    }
}
