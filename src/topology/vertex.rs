//! Vertex: a mesh corner point, anchoring its disk cycle.

use crate::topology::entity::{Entity, EntityKind, MeshRemap};
use crate::topology::handle::{EdgeId, VertexId};

/// A vertex of the mesh.
///
/// Positions and any other per-vertex data live in attributes of the vertex
/// container; the struct only carries the disk-cycle anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    pub(crate) edge: Option<EdgeId>,
}

impl Vertex {
    /// One arbitrary incident edge, `None` if the vertex is isolated.
    #[inline]
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// True if no edge touches this vertex.
    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.edge.is_none()
    }
}

impl Entity for Vertex {
    type Id = VertexId;
    const KIND: EntityKind = EntityKind::Vertex;

    fn detached(_id: VertexId) -> Self {
        Vertex { edge: None }
    }

    fn remap(&mut self, remap: &MeshRemap) {
        self.edge = self.edge.map(|e| remap.edge(e));
    }
}
