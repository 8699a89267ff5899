//! Flat backing buffer for attribute columns.
//!
//! Containers only ever grow a column, move slots down during compaction and
//! truncate it afterwards, so a `Vec` behind a slice interface is enough. Both
//! scalar and object columns keep their values in a [`VecStorage`].

use core::fmt::{self, Debug};
use core::ops::Range;

/// `Vec`-backed storage for attribute values.
#[derive(Clone, PartialEq)]
pub struct VecStorage<V>(Vec<V>);

impl<V> Debug for VecStorage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VecStorage")
            .field("len", &self.0.len())
            .finish()
    }
}

impl<V> VecStorage<V> {
    /// Current length in elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entire read-only buffer.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.0
    }

    /// Entire mutable buffer.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.0
    }
}

impl<V: Clone> VecStorage<V> {
    /// Construct a buffer of `len`, filled with `fill`.
    pub fn with_len(len: usize, fill: V) -> Self {
        Self(vec![fill; len])
    }

    /// Resize to `new_len`, filling new cells with `fill`.
    pub fn resize(&mut self, new_len: usize, fill: V) {
        self.0.resize(new_len, fill);
    }

    /// Clone the elements of `src` onto the range starting at `dest`.
    ///
    /// Overlapping ranges are only supported for `dest <= src.start`.
    ///
    /// # Panics
    /// Panics if either range falls outside the buffer.
    pub fn clone_within(&mut self, src: Range<usize>, dest: usize) {
        debug_assert!(dest <= src.start || dest >= src.end);
        for (i, from) in src.enumerate() {
            let to = dest + i;
            if from != to {
                let value = self.0[from].clone();
                self.0[to] = value;
            }
        }
    }
}

impl<V: Copy> VecStorage<V> {
    /// Copy the elements of `src` to the range starting at `dest`.
    ///
    /// # Panics
    /// Panics if either range falls outside the buffer.
    #[inline]
    pub fn copy_within(&mut self, src: Range<usize>, dest: usize) {
        self.0.copy_within(src, dest);
    }
}
