//! Edge: an undirected vertex pair threaded on two disk cycles.
//!
//! Each endpoint owns one `(next, prev)` link pair; side `0` belongs to
//! `vertices[0]`, side `1` to `vertices[1]`. A wire edge (no incident face)
//! has `loop_id == None`. Edges requested through
//! [`Mesh::create_edge`](crate::mesh::Mesh::create_edge) are marked explicit
//! and outlive the faces built on them.

use crate::topology::entity::{Entity, EntityKind, MeshRemap};
use crate::topology::handle::{EdgeId, LoopId, VertexId};

const UNSET: VertexId = VertexId::new(u32::MAX);

/// An edge of the mesh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub(crate) vertices: [VertexId; 2],
    pub(crate) next: [EdgeId; 2],
    pub(crate) prev: [EdgeId; 2],
    pub(crate) loop_id: Option<LoopId>,
    pub(crate) explicit: bool,
}

impl Edge {
    /// Both endpoints, in creation order.
    #[inline]
    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    /// Endpoint `0` or `1`.
    #[inline]
    pub fn vertex(&self, side: usize) -> VertexId {
        self.vertices[side]
    }

    /// Which side of the edge `v` sits on.
    #[inline]
    pub fn side_of(&self, v: VertexId) -> Option<usize> {
        if self.vertices[0] == v {
            Some(0)
        } else if self.vertices[1] == v {
            Some(1)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, v: VertexId) -> bool {
        self.side_of(v).is_some()
    }

    /// The endpoint that is not `v`.
    #[inline]
    pub fn other_vertex(&self, v: VertexId) -> Option<VertexId> {
        self.side_of(v).map(|s| self.vertices[1 - s])
    }

    /// Next edge around `v`'s disk cycle.
    #[inline]
    pub fn disk_next(&self, v: VertexId) -> Option<EdgeId> {
        self.side_of(v).map(|s| self.next[s])
    }

    /// Previous edge around `v`'s disk cycle.
    #[inline]
    pub fn disk_prev(&self, v: VertexId) -> Option<EdgeId> {
        self.side_of(v).map(|s| self.prev[s])
    }

    /// One incident loop, `None` for a wire edge.
    #[inline]
    pub fn first_loop(&self) -> Option<LoopId> {
        self.loop_id
    }

    #[inline]
    pub fn is_wire(&self) -> bool {
        self.loop_id.is_none()
    }

    /// Whether the edge was asked for by the caller rather than made as a
    /// side effect of a face operator.
    #[inline]
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

impl Entity for Edge {
    type Id = EdgeId;
    const KIND: EntityKind = EntityKind::Edge;

    fn detached(id: EdgeId) -> Self {
        Edge {
            vertices: [UNSET; 2],
            next: [id; 2],
            prev: [id; 2],
            loop_id: None,
            explicit: false,
        }
    }

    fn remap(&mut self, remap: &MeshRemap) {
        for side in 0..2 {
            self.vertices[side] = remap.vertex(self.vertices[side]);
            self.next[side] = remap.edge(self.next[side]);
            self.prev[side] = remap.edge(self.prev[side]);
        }
        self.loop_id = self.loop_id.map(|l| remap.loop_id(l));
    }
}
