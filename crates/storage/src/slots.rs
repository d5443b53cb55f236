//! Tagged-union slot buffer.
//!
//! Every slot is an [`Element`]. This is the default backend: it handles
//! every element type uniformly at the cost of one enum per slot.

use rankarray_core::{Element, ElementType};

use crate::traits::{clone_within, StorageEngine};

/// Buffer of tagged-union slots.
///
/// # Example
///
/// ```
/// use rankarray_core::{Element, ElementType, PrimitiveKind};
/// use rankarray_storage::{SlotBuffer, StorageEngine};
///
/// let mut buf = SlotBuffer::allocate(&ElementType::primitive(PrimitiveKind::I32), 3);
/// buf.raw_set(1, Element::I32(7));
/// assert_eq!(buf.raw_get(0), Element::I32(0));
/// assert_eq!(buf.raw_get(1), Element::I32(7));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotBuffer {
    slots: Vec<Element>,
}

impl SlotBuffer {
    /// View the slots
    pub fn as_slice(&self) -> &[Element] {
        &self.slots
    }
}

impl StorageEngine for SlotBuffer {
    fn allocate(element_type: &ElementType, slot_count: usize) -> Self {
        SlotBuffer {
            slots: vec![element_type.default_element(); slot_count],
        }
    }

    fn backend_id(&self) -> &'static str {
        "slots"
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn raw_get(&self, offset: usize) -> Element {
        self.slots[offset].clone()
    }

    fn raw_set(&mut self, offset: usize, element: Element) {
        self.slots[offset] = element;
    }

    fn raw_bulk_copy(src: &Self, src_offset: usize, dst: &mut Self, dst_offset: usize, count: usize) {
        dst.slots[dst_offset..dst_offset + count]
            .clone_from_slice(&src.slots[src_offset..src_offset + count]);
    }

    fn raw_copy_within(&mut self, src_offset: usize, dst_offset: usize, count: usize) {
        clone_within(&mut self.slots, src_offset, dst_offset, count);
    }

    fn raw_fill(&mut self, offset: usize, count: usize, element: &Element) {
        self.slots[offset..offset + count].fill(element.clone());
    }

    fn raw_swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }
}
