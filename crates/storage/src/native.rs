//! Native value-slot buffer.
//!
//! Primitive element types are stored in a plain `Vec` of the native Rust
//! type (`Vec<i32>` for `i32` arrays and so on); bulk copies become
//! `copy_from_slice` / `copy_within`. Reference element types fall back to
//! tagged-union slots.

use rankarray_core::{Element, ElementType, PrimitiveKind};

use crate::traits::{clone_within, StorageEngine};

macro_rules! native_buffer {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        /// Buffer of native value slots.
        #[derive(Debug, Clone, PartialEq)]
        pub enum NativeBuffer {
            $(
                #[doc = concat!("`", stringify!($ty), "` slots")]
                $variant(Vec<$ty>),
            )*
            /// Reference slots
            Refs(Vec<Element>),
        }

        impl StorageEngine for NativeBuffer {
            fn allocate(element_type: &ElementType, slot_count: usize) -> Self {
                match element_type.primitive_kind() {
                    $(
                        Some(PrimitiveKind::$variant) => {
                            NativeBuffer::$variant(vec![<$ty>::default(); slot_count])
                        }
                    )*
                    None => NativeBuffer::Refs(vec![Element::Null; slot_count]),
                }
            }

            fn backend_id(&self) -> &'static str {
                "native"
            }

            fn slot_count(&self) -> usize {
                match self {
                    $( NativeBuffer::$variant(v) => v.len(), )*
                    NativeBuffer::Refs(v) => v.len(),
                }
            }

            fn raw_get(&self, offset: usize) -> Element {
                match self {
                    $( NativeBuffer::$variant(v) => Element::$variant(v[offset]), )*
                    NativeBuffer::Refs(v) => v[offset].clone(),
                }
            }

            fn raw_set(&mut self, offset: usize, element: Element) {
                match (self, element) {
                    $( (NativeBuffer::$variant(v), Element::$variant(x)) => v[offset] = x, )*
                    (NativeBuffer::Refs(v), element) => v[offset] = element,
                    (_, element) => debug_assert!(
                        false,
                        "unconverted {} element written to a native slot",
                        element.type_name()
                    ),
                }
            }

            fn raw_bulk_copy(
                src: &Self,
                src_offset: usize,
                dst: &mut Self,
                dst_offset: usize,
                count: usize,
            ) {
                let from = src_offset..src_offset + count;
                let to = dst_offset..dst_offset + count;
                match (src, dst) {
                    $(
                        (NativeBuffer::$variant(a), NativeBuffer::$variant(b)) => {
                            b[to].copy_from_slice(&a[from])
                        }
                    )*
                    (NativeBuffer::Refs(a), NativeBuffer::Refs(b)) => {
                        b[to].clone_from_slice(&a[from])
                    }
                    _ => debug_assert!(false, "bulk copy between different slot kinds"),
                }
            }

            fn raw_copy_within(&mut self, src_offset: usize, dst_offset: usize, count: usize) {
                match self {
                    $(
                        NativeBuffer::$variant(v) => {
                            v.copy_within(src_offset..src_offset + count, dst_offset)
                        }
                    )*
                    NativeBuffer::Refs(v) => clone_within(v, src_offset, dst_offset, count),
                }
            }

            fn raw_swap(&mut self, a: usize, b: usize) {
                match self {
                    $( NativeBuffer::$variant(v) => v.swap(a, b), )*
                    NativeBuffer::Refs(v) => v.swap(a, b),
                }
            }
        }
    };
}

native_buffer! {
    Bool(bool),
    Char(u16),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}
