//! Loop: one face corner, binding `(face, edge, source vertex)`.
//!
//! A loop sits on two cycles at once: the face cycle (`next`/`prev`) that
//! orders the face boundary, and the radial cycle (`radial_next`/`radial_prev`)
//! that collects every loop using the same edge. Per-corner data (split
//! normals, texture coordinates) lives in attributes of the loop container.

use crate::topology::entity::{Entity, EntityKind, MeshRemap};
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};

/// A face corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loop {
    pub(crate) face: FaceId,
    pub(crate) edge: EdgeId,
    pub(crate) vertex: VertexId,
    pub(crate) next: LoopId,
    pub(crate) prev: LoopId,
    pub(crate) radial_next: LoopId,
    pub(crate) radial_prev: LoopId,
}

impl Loop {
    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// Edge from this corner's vertex to the next corner's vertex.
    #[inline]
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// Source vertex of the corner.
    #[inline]
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    #[inline]
    pub fn next(&self) -> LoopId {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> LoopId {
        self.prev
    }

    #[inline]
    pub fn radial_next(&self) -> LoopId {
        self.radial_next
    }

    #[inline]
    pub fn radial_prev(&self) -> LoopId {
        self.radial_prev
    }
}

impl Entity for Loop {
    type Id = LoopId;
    const KIND: EntityKind = EntityKind::Loop;

    fn detached(id: LoopId) -> Self {
        Loop {
            face: FaceId::new(u32::MAX),
            edge: EdgeId::new(u32::MAX),
            vertex: VertexId::new(u32::MAX),
            next: id,
            prev: id,
            radial_next: id,
            radial_prev: id,
        }
    }

    fn remap(&mut self, remap: &MeshRemap) {
        self.face = remap.face(self.face);
        self.edge = remap.edge(self.edge);
        self.vertex = remap.vertex(self.vertex);
        self.next = remap.loop_id(self.next);
        self.prev = remap.loop_id(self.prev);
        self.radial_next = remap.loop_id(self.radial_next);
        self.radial_prev = remap.loop_id(self.radial_prev);
    }
}
