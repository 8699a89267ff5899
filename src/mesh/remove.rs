//! Cascading removal.
//!
//! Removing a vertex removes its edges, removing an edge removes the faces
//! using it. Each cascade collects its targets into a scratch buffer before
//! the first write, so no cycle is walked while it is being edited.

use super::Mesh;
use crate::mesh_error::MeshBrepError;
use crate::topology::handle::{EdgeId, FaceId, VertexId};

impl Mesh {
    /// Remove face `f` and its loops.
    ///
    /// Boundary edges that no other face uses are removed as well, so that
    /// removing a freshly created face leaves its vertices isolated again.
    /// Explicit edges (see [`create_edge`](Self::create_edge)) stay as wires.
    /// Vertices are never removed.
    pub fn remove_face(&mut self, f: FaceId) -> Result<(), MeshBrepError> {
        self.faces.check(f)?;
        let mut boundary = std::mem::take(&mut self.scratch.edges);
        boundary.extend(self.face_edges(f));

        self.kill_face(f);
        let mut pruned = 0usize;
        for &e in &boundary {
            let Some(edge) = self.edges.get(e) else {
                continue;
            };
            if edge.is_wire() && !edge.is_explicit() {
                self.kill_wire_edge(e);
                pruned += 1;
            }
        }

        boundary.clear();
        self.scratch.edges = boundary;
        log::trace!("remove_face {f}: pruned {pruned} wire edges");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after remove_face");
        Ok(())
    }

    /// Remove edge `e` and every face using it. Endpoints stay.
    pub fn remove_edge(&mut self, e: EdgeId) -> Result<(), MeshBrepError> {
        self.edges.check(e)?;
        self.kill_edge(e);
        log::trace!("remove_edge {e}");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after remove_edge");
        Ok(())
    }

    /// Remove vertex `v`, every edge incident to it and every face using
    /// those edges.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), MeshBrepError> {
        self.vertices.check(v)?;
        let mut incident = std::mem::take(&mut self.scratch.edges);
        incident.extend(self.vertex_edges(v));
        for &e in &incident {
            if self.edges.is_alive(e) {
                self.kill_edge(e);
            }
        }
        let degree = incident.len();
        incident.clear();
        self.scratch.edges = incident;

        self.vertices.destroy(v);
        log::trace!("remove_vertex {v}: removed {degree} edges");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after remove_vertex");
        Ok(())
    }

    /// Unlink every loop of `f` from its radial cycle and destroy the loops
    /// and the face. Edges are left in place, possibly as wires.
    fn kill_face(&mut self, f: FaceId) {
        let mut ring = std::mem::take(&mut self.scratch.loops);
        ring.extend(self.face_loops(f));
        for &l in &ring {
            self.radial_remove(l);
            self.loops.destroy(l);
        }
        ring.clear();
        self.scratch.loops = ring;
        self.faces.destroy(f);
    }

    fn kill_edge(&mut self, e: EdgeId) {
        let mut faces = std::mem::take(&mut self.scratch.faces);
        faces.extend(self.edge_faces(e));
        for &f in &faces {
            if self.faces.is_alive(f) {
                self.kill_face(f);
            }
        }
        faces.clear();
        self.scratch.faces = faces;
        self.kill_wire_edge(e);
    }
}
