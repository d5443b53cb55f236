//! Row-major iteration
//!
//! One cursor serves every rank. It keeps a flat position in
//! `0..total_length_long()`; the logical coordinates of the current element
//! come from mixed-radix decomposition of that position through the bounds
//! table, and `current` resolves its element from those coordinates. Rank 1 and rank 2 need no special handling: a zero-length
//! dimension anywhere makes the total zero, so the cursor is exhausted
//! before it starts.

use rankarray_core::{Element, Error, Result};
use rankarray_storage::{SlotBuffer, StorageEngine};

use crate::array::Array;
use crate::bounds::Indices;

/// Forward-only cursor over an array
///
/// `current` is only valid after `move_next` has returned `true`, and
/// until it returns `false`. `reset` rewinds to before the first element.
#[derive(Debug, Clone)]
pub struct ArrayCursor<'a, S: StorageEngine = SlotBuffer> {
    array: &'a Array<S>,
    // None before the first element; Some(total) once exhausted.
    position: Option<u64>,
}

impl<'a, S: StorageEngine> ArrayCursor<'a, S> {
    /// Cursor positioned before the first element
    pub fn new(array: &'a Array<S>) -> Self {
        ArrayCursor {
            array,
            position: None,
        }
    }

    /// Advance to the next element; `false` once past the last
    pub fn move_next(&mut self) -> bool {
        let total = self.array.long_length();
        let next = match self.position {
            None => 0,
            Some(position) if position < total => position + 1,
            Some(_) => total,
        };
        self.position = Some(next);
        next < total
    }

    /// Rewind to before the first element
    pub fn reset(&mut self) {
        self.position = None;
    }

    fn valid_position(&self) -> Result<u64> {
        match self.position {
            None => Err(Error::invalid_state("enumeration has not started")),
            Some(position) if position >= self.array.long_length() => {
                Err(Error::invalid_state("enumeration already finished"))
            }
            Some(position) => Ok(position),
        }
    }

    /// Element under the cursor
    ///
    /// # Errors
    ///
    /// Returns `InvalidState` before the first `move_next` or after
    /// exhaustion.
    pub fn current(&self) -> Result<Element> {
        let position = self.valid_position()?;
        let bounds = self.array.bounds();
        let offset = bounds.to_relative(&bounds.coordinates(position)?)?;
        debug_assert_eq!(offset as u64, position, "row-major position must equal the offset");
        Ok(self.array.storage().raw_get(offset))
    }

    /// Logical indices of the element under the cursor
    pub fn current_indices(&self) -> Result<Indices> {
        let position = self.valid_position()?;
        self.array.bounds().coordinates(position)
    }
}

/// Iterator over an array's elements in row-major order
#[derive(Debug, Clone)]
pub struct Elements<'a, S: StorageEngine = SlotBuffer> {
    array: &'a Array<S>,
    next: usize,
    end: usize,
}

impl<'a, S: StorageEngine> Iterator for Elements<'a, S> {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.next >= self.end {
            return None;
        }
        let element = self.array.storage().raw_get(self.next);
        self.next += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl<S: StorageEngine> ExactSizeIterator for Elements<'_, S> {}

impl<S: StorageEngine> Array<S> {
    /// Cursor positioned before the first element
    pub fn cursor(&self) -> ArrayCursor<'_, S> {
        ArrayCursor::new(self)
    }

    /// Iterate over all elements in row-major order
    pub fn elements(&self) -> Elements<'_, S> {
        Elements {
            array: self,
            next: 0,
            end: self.storage().slot_count(),
        }
    }
}

impl<'a, S: StorageEngine> IntoIterator for &'a Array<S> {
    type Item = Element;
    type IntoIter = Elements<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements()
    }
}
