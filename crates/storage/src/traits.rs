//! Storage engine trait definitions.

use rankarray_core::{Element, ElementType};

/// Flat, typed slot buffer.
///
/// Every array owns exactly one buffer holding `Π length[d]` slots, indexed
/// by a 0-based relative offset. The engine layer validates every offset and
/// count before calling into the buffer, and converts every element to the
/// buffer's element type before writing, so implementations perform no
/// checks of their own. Out-of-range offsets panic like slice indexing.
///
/// Implementations are free to choose the slot representation: tagged
/// unions, boxed references or native value slots.
pub trait StorageEngine: Clone + std::fmt::Debug + Send + Sync {
    /// Allocate `slot_count` slots, each holding the default value of
    /// `element_type`.
    fn allocate(element_type: &ElementType, slot_count: usize) -> Self;

    /// Unique backend identifier.
    fn backend_id(&self) -> &'static str;

    /// Number of slots.
    fn slot_count(&self) -> usize;

    /// Read the slot at `offset`.
    fn raw_get(&self, offset: usize) -> Element;

    /// Overwrite the slot at `offset`.
    fn raw_set(&mut self, offset: usize, element: Element);

    /// Copy `count` slots between two buffers of the same element type.
    fn raw_bulk_copy(src: &Self, src_offset: usize, dst: &mut Self, dst_offset: usize, count: usize);

    /// Copy `count` slots within one buffer; ranges may overlap.
    fn raw_copy_within(&mut self, src_offset: usize, dst_offset: usize, count: usize);

    /// Overwrite `count` slots starting at `offset` with `element`.
    fn raw_fill(&mut self, offset: usize, count: usize, element: &Element) {
        for slot in offset..offset + count {
            self.raw_set(slot, element.clone());
        }
    }

    /// Exchange two slots.
    fn raw_swap(&mut self, a: usize, b: usize) {
        if a != b {
            let first = self.raw_get(a);
            let second = self.raw_get(b);
            self.raw_set(a, second);
            self.raw_set(b, first);
        }
    }
}

/// Overlap-safe copy within a slice of non-`Copy` slots.
pub(crate) fn clone_within<T: Clone>(slots: &mut [T], src: usize, dst: usize, count: usize) {
    if src == dst || count == 0 {
        return;
    }
    if src < dst {
        for i in (0..count).rev() {
            slots[dst + i] = slots[src + i].clone();
        }
    } else {
        for i in 0..count {
            slots[dst + i] = slots[src + i].clone();
        }
    }
}
