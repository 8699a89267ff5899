//! Strong, zero-cost handles for mesh entities.
//!
//! Every live vertex, edge, face and loop is addressed by the index of its
//! slot in the owning [`EntityContainer`](crate::data::container::EntityContainer).
//! Each kind gets its own newtype so that an `EdgeId` can never be passed
//! where a `VertexId` is expected.
//!
//! Handles are stable across `create`, `destroy` and attribute changes; only
//! [`Mesh::compact_data`](crate::mesh::Mesh::compact_data) renumbers them.
//!
//! # Memory layout
//! All handle types are `repr(transparent)` over `u32`, so slices of handles can
//! be handed to external consumers through `bytemuck` without copying.

use std::fmt;

/// Common behavior of the four handle types.
pub trait Handle: Copy + Eq + Ord + std::hash::Hash + fmt::Debug + fmt::Display {
    /// Builds a handle from a slot index.
    ///
    /// # Panics
    /// Panics if `index` does not fit in a `u32`.
    fn from_index(index: usize) -> Self;

    /// Slot index of this handle.
    fn index(self) -> usize;
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Copy,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            bytemuck::Pod,
            bytemuck::Zeroable,
        )]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from a raw slot index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                $name(raw)
            }

            /// Returns the raw slot index.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Handle for $name {
            #[inline]
            fn from_index(index: usize) -> Self {
                $name(u32::try_from(index).expect(concat!(stringify!($name), " index overflows u32")))
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        /// Displays as `Name(raw)`.
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        /// Prints only the raw index.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_handle!(
    /// Handle of a [`Vertex`](crate::topology::vertex::Vertex).
    VertexId
);
define_handle!(
    /// Handle of an [`Edge`](crate::topology::edge::Edge).
    EdgeId
);
define_handle!(
    /// Handle of a [`Face`](crate::topology::face::Face).
    FaceId
);
define_handle!(
    /// Handle of a [`Loop`](crate::topology::face_loop::Loop).
    LoopId
);
