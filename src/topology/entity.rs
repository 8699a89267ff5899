//! Entity base: the behavior shared by vertices, edges, faces and loops.
//!
//! An entity is a plain struct of links stored in an
//! [`EntityContainer`](crate::data::container::EntityContainer). Its identity is
//! the slot index (a [`Handle`]); its lifecycle is owned by the container's
//! alive flags and free list.

use crate::topology::handle::{EdgeId, FaceId, Handle, LoopId, VertexId};
use std::fmt;

/// The four entity kinds of the mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EntityKind {
    Vertex,
    Edge,
    Face,
    Loop,
}

impl EntityKind {
    /// Returns a stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Vertex => "vertex",
            EntityKind::Edge => "edge",
            EntityKind::Face => "face",
            EntityKind::Loop => "loop",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topology entity stored in an `EntityContainer`.
pub trait Entity: Clone + fmt::Debug {
    /// Handle type addressing this entity kind.
    type Id: Handle;

    /// Kind tag, used in errors and logs.
    const KIND: EntityKind;

    /// Entity in its neutral state: no incident entities, every cycle link
    /// pointing back at `id`.
    fn detached(id: Self::Id) -> Self;

    /// Release hook run by `destroy`: drops every link.
    fn release(&mut self, id: Self::Id) {
        *self = Self::detached(id);
    }

    /// Rewrites every link through the compaction remaps.
    fn remap(&mut self, remap: &MeshRemap);
}

/// Old-slot to new-slot table produced by compacting one container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Remap {
    new_index: Vec<u32>,
}

impl Remap {
    const DEAD: u32 = u32::MAX;

    pub(crate) fn with_slots(slots: usize) -> Self {
        Self {
            new_index: vec![Self::DEAD; slots],
        }
    }

    pub(crate) fn insert(&mut self, old: usize, new: usize) {
        self.new_index[old] = new as u32;
    }

    /// New handle of the entity that lived at `old` before compaction, or
    /// `None` if that slot was dead.
    pub fn get<H: Handle>(&self, old: H) -> Option<H> {
        match self.new_index.get(old.index()) {
            Some(&n) if n != Self::DEAD => Some(H::from_index(n as usize)),
            _ => None,
        }
    }

    /// Maps a link of a live entity. Live entities only ever link live
    /// entities, so a miss is structural corruption.
    #[inline]
    pub(crate) fn apply<H: Handle>(&self, old: H) -> H {
        let n = self.new_index[old.index()];
        assert!(n != Self::DEAD, "live entity links dead slot {old:?}");
        H::from_index(n as usize)
    }

    /// Number of slots the table was built for.
    pub fn len(&self) -> usize {
        self.new_index.len()
    }

    /// True if the table covers no slot.
    pub fn is_empty(&self) -> bool {
        self.new_index.is_empty()
    }
}

/// Remaps for all four containers, returned by `Mesh::compact_data`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshRemap {
    pub vertices: Remap,
    pub edges: Remap,
    pub faces: Remap,
    pub loops: Remap,
}

impl MeshRemap {
    #[inline]
    pub(crate) fn vertex(&self, v: VertexId) -> VertexId {
        self.vertices.apply(v)
    }

    #[inline]
    pub(crate) fn edge(&self, e: EdgeId) -> EdgeId {
        self.edges.apply(e)
    }

    #[inline]
    pub(crate) fn face(&self, f: FaceId) -> FaceId {
        self.faces.apply(f)
    }

    #[inline]
    pub(crate) fn loop_id(&self, l: LoopId) -> LoopId {
        self.loops.apply(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_maps_live_and_skips_dead() {
        let mut r = Remap::with_slots(3);
        r.insert(0, 0);
        r.insert(2, 1);
        assert_eq!(r.get(VertexId::new(0)), Some(VertexId::new(0)));
        assert_eq!(r.get(VertexId::new(1)), None);
        assert_eq!(r.get(VertexId::new(2)), Some(VertexId::new(1)));
        assert_eq!(r.get(VertexId::new(9)), None);
        assert_eq!(r.len(), 3);
    }

    #[test]
    #[should_panic(expected = "dead slot")]
    fn applying_to_dead_slot_panics() {
        let r = Remap::with_slots(1);
        let _ = r.apply(EdgeId::new(0));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EntityKind::Loop.to_string(), "loop");
        assert_eq!(EntityKind::Vertex.as_str(), "vertex");
    }
}
