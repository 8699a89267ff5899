//! Construction operators: vertices, edges and faces.

use super::Mesh;
use crate::mesh_error::MeshBrepError;
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use hashbrown::HashSet;
use itertools::Itertools;

impl Mesh {
    /// Create an isolated vertex. Its attribute values are whatever the slot
    /// holds (defaults for a fresh slot, stale values for a reused one).
    pub fn create_vertex(&mut self) -> VertexId {
        self.vertices.create()
    }

    /// Create an isolated vertex at `position`.
    pub fn create_vertex_at(&mut self, position: [f64; 3]) -> Result<VertexId, MeshBrepError> {
        let v = self.vertices.create();
        if let Err(e) = self.set_position(v, position) {
            self.vertices.destroy(v);
            return Err(e);
        }
        Ok(v)
    }

    /// Return the edge between `a` and `b`, creating a wire edge if there is
    /// none. The edge is marked explicit either way, so removing the faces
    /// built on it later leaves it in place.
    ///
    /// # Errors
    /// `InvalidHandle` if either vertex is dead, `DegenerateEdge` if `a == b`.
    pub fn create_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId, MeshBrepError> {
        self.vertices.check(a)?;
        self.vertices.check(b)?;
        if a == b {
            return Err(MeshBrepError::DegenerateEdge(a));
        }
        let e = self.edge_or_new(a, b);
        self.edges.entity_mut(e).explicit = true;
        Ok(e)
    }

    /// The edge between two live, distinct vertices, allocated if missing.
    pub(crate) fn edge_or_new(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        match self.find_edge(a, b) {
            Some(e) => e,
            None => self.new_edge(a, b),
        }
    }

    /// Allocate edge `(a, b)` and thread it on both disk cycles.
    pub(crate) fn new_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let e = self.edges.create();
        self.edges.entity_mut(e).vertices = [a, b];
        self.disk_append(e, a);
        self.disk_append(e, b);
        e
    }

    /// Destroy a wire edge, unthreading it from both disk cycles.
    pub(crate) fn kill_wire_edge(&mut self, e: EdgeId) {
        debug_assert!(self.edges.entity(e).loop_id.is_none());
        let [a, b] = self.edges.entity(e).vertices;
        self.disk_remove(e, a);
        self.disk_remove(e, b);
        self.edges.destroy(e);
    }

    /// Create a face through `vertices`, in winding order.
    ///
    /// Existing edges between consecutive vertices are reused, missing ones
    /// created. One loop per corner is appended at the tail of its edge's
    /// radial cycle, so faces sharing an edge appear there in creation order.
    ///
    /// # Errors
    /// - `TooFewVertices` for fewer than three corners,
    /// - `DuplicateVertex` if a vertex repeats,
    /// - `InvalidHandle` if a vertex is dead.
    ///
    /// Every argument is checked before the first allocation, so a failed call
    /// leaves the mesh untouched.
    pub fn create_face(&mut self, vertices: &[VertexId]) -> Result<FaceId, MeshBrepError> {
        if vertices.len() < 3 {
            return Err(MeshBrepError::TooFewVertices {
                found: vertices.len(),
            });
        }
        let mut seen = HashSet::with_capacity(vertices.len());
        for &v in vertices {
            self.vertices.check(v)?;
            if !seen.insert(v) {
                return Err(MeshBrepError::DuplicateVertex(v));
            }
        }

        let mut corners = std::mem::take(&mut self.scratch.loops);
        debug_assert!(corners.is_empty());
        for (&a, &b) in vertices.iter().circular_tuple_windows() {
            let e = self.edge_or_new(a, b);
            let l = self.loops.create();
            let lp = self.loops.entity_mut(l);
            lp.vertex = a;
            lp.edge = e;
            corners.push(l);
        }
        let f = self.link_face(&corners);
        corners.clear();
        self.scratch.loops = corners;

        log::trace!("create_face {f} with {} corners", vertices.len());
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after create_face");
        Ok(f)
    }

    /// Allocate the face and thread `corners` (vertex and edge already set)
    /// on the face cycle and their radial cycles.
    fn link_face(&mut self, corners: &[LoopId]) -> FaceId {
        let f = self.faces.create();
        let n = corners.len();
        for (i, &l) in corners.iter().enumerate() {
            let lp = self.loops.entity_mut(l);
            lp.face = f;
            lp.next = corners[(i + 1) % n];
            lp.prev = corners[(i + n - 1) % n];
        }
        for &l in corners {
            let e = self.loops.entity(l).edge;
            self.radial_append(l, e);
        }
        self.faces.entity_mut(f).loop_id = Some(corners[0]);
        f
    }
}
