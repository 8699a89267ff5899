//! Face: a polygon, anchoring its face cycle.

use crate::topology::entity::{Entity, EntityKind, MeshRemap};
use crate::topology::handle::{FaceId, LoopId};

/// A face of the mesh.
///
/// The ordered boundary is the face cycle walked from `loop_id` through
/// [`Loop::next`](crate::topology::face_loop::Loop::next). Every live face has
/// an anchor; `None` only appears on dead slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub(crate) loop_id: Option<LoopId>,
}

impl Face {
    /// Anchor loop of the boundary.
    #[inline]
    pub fn first_loop(&self) -> Option<LoopId> {
        self.loop_id
    }
}

impl Entity for Face {
    type Id = FaceId;
    const KIND: EntityKind = EntityKind::Face;

    fn detached(_id: FaceId) -> Self {
        Face { loop_id: None }
    }

    fn remap(&mut self, remap: &MeshRemap) {
        self.loop_id = self.loop_id.map(|l| remap.loop_id(l));
    }
}
