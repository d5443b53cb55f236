//! Primitive widening and element conversion
//!
//! The widening table lists, for every primitive kind, the kinds it can be
//! converted to without losing information. Every kind widens to itself.
//! No entry narrows; conversions not in the table are cast failures.

use crate::error::{Error, Result};
use crate::types::{ElementType, PrimitiveKind};
use crate::value::Element;

use PrimitiveKind::*;

/// True if values of `from` convert to `to` without loss
pub fn has_widening_conversion(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    let targets: &[PrimitiveKind] = match from {
        Bool => &[Bool, U8, I16, U16, Char, I32, U32, I64, U64, F32, F64],
        U8 => &[U8, I16, U16, Char, I32, U32, I64, U64, F32, F64],
        I8 => &[I8, I16, I32, I64, F32, F64],
        I16 => &[I16, I32, I64, F32, F64],
        U16 | Char => &[U16, Char, I32, U32, I64, U64, F32, F64],
        I32 => &[I32, I64, F32, F64],
        U32 => &[U32, U64, F32, F64],
        I64 => &[I64, F32, F64],
        U64 => &[U64, F32, F64],
        F32 => &[F32, F64],
        F64 => &[F64],
    };
    targets.contains(&to)
}

/// Widen a primitive value to `to`
///
/// Returns `None` if `value` is not a primitive or the table has no entry.
pub fn widen(value: &Element, to: PrimitiveKind) -> Option<Element> {
    let from = value.primitive_kind()?;
    if !has_widening_conversion(from, to) {
        return None;
    }
    if from == to {
        return Some(value.clone());
    }
    if to.is_float() {
        let wide = match *value {
            Element::Bool(v) => f64::from(u8::from(v)),
            Element::Char(v) | Element::U16(v) => f64::from(v),
            Element::I8(v) => f64::from(v),
            Element::U8(v) => f64::from(v),
            Element::I16(v) => f64::from(v),
            Element::I32(v) => f64::from(v),
            Element::U32(v) => f64::from(v),
            Element::I64(v) => v as f64,
            Element::U64(v) => v as f64,
            Element::F32(v) => f64::from(v),
            _ => return None,
        };
        return Some(match to {
            F32 => Element::F32(wide as f32),
            _ => Element::F64(wide),
        });
    }
    // Integer targets: every table entry is lossless, so go through i128.
    let wide: i128 = match *value {
        Element::Bool(v) => i128::from(u8::from(v)),
        Element::Char(v) | Element::U16(v) => i128::from(v),
        Element::I8(v) => i128::from(v),
        Element::U8(v) => i128::from(v),
        Element::I16(v) => i128::from(v),
        Element::I32(v) => i128::from(v),
        Element::U32(v) => i128::from(v),
        Element::I64(v) => i128::from(v),
        Element::U64(v) => i128::from(v),
        _ => return None,
    };
    let converted = match to {
        Bool => Element::Bool(wide != 0),
        Char => Element::Char(u16::try_from(wide).ok()?),
        I8 => Element::I8(i8::try_from(wide).ok()?),
        U8 => Element::U8(u8::try_from(wide).ok()?),
        I16 => Element::I16(i16::try_from(wide).ok()?),
        U16 => Element::U16(u16::try_from(wide).ok()?),
        I32 => Element::I32(i32::try_from(wide).ok()?),
        U32 => Element::U32(u32::try_from(wide).ok()?),
        I64 => Element::I64(i64::try_from(wide).ok()?),
        U64 => Element::U64(u64::try_from(wide).ok()?),
        F32 | F64 => return None,
    };
    Some(converted)
}

/// Convert an element read from a `from`-typed slot into a `to`-typed slot
///
/// - null converts to null for reference targets and fails for value targets
/// - a value whose runtime type is assignable to `to` is stored unchanged
///   (identity, upcast, boxing, unboxing, checked downcast)
/// - a primitive with a widening entry is widened
///
/// # Errors
///
/// Returns `CastFailure` for any other combination. Values are never truncated.
pub fn convert_element(value: &Element, from: &ElementType, to: &ElementType) -> Result<Element> {
    let runtime = match value.runtime_type() {
        Some(runtime) => runtime,
        None if to.is_value_type() => return Err(Error::cast_failure(from.name(), to.name())),
        None => return Ok(Element::Null),
    };
    if to.is_assignable_from(&runtime) {
        return Ok(value.clone());
    }
    if let Some(kind) = to.primitive_kind() {
        if let Some(widened) = widen(value, kind) {
            return Ok(widened);
        }
    }
    Err(Error::cast_failure(from.name(), to.name()))
}
