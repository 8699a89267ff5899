//! Adjacency queries. All of them treat a dead handle as having no
//! neighbors.

use super::Mesh;
use crate::topology::cycles::{DiskCycle, FaceCycle, RadialCycle};
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use itertools::Itertools;

impl Mesh {
    /// Edges incident to `v`, walking its disk cycle from the anchor.
    pub fn vertex_edges(&self, v: VertexId) -> DiskCycle<'_> {
        let start = self.vertices.get(v).and_then(|x| x.edge);
        DiskCycle::new(&self.edges, v, start)
    }

    /// Number of edges incident to `v`.
    pub fn vertex_degree(&self, v: VertexId) -> usize {
        self.vertex_edges(v).count()
    }

    /// Distinct faces touching `v`, in disk order.
    pub fn vertex_faces(&self, v: VertexId) -> Vec<FaceId> {
        self.vertex_edges(v)
            .flat_map(|e| self.edge_faces(e))
            .unique()
            .collect()
    }

    /// Loops using `e`, walking its radial cycle from the anchor.
    pub fn edge_loops(&self, e: EdgeId) -> RadialCycle<'_> {
        let start = self.edges.get(e).and_then(|x| x.loop_id);
        RadialCycle::new(&self.loops, start)
    }

    /// Faces using `e`, one per radial loop.
    pub fn edge_faces(&self, e: EdgeId) -> impl Iterator<Item = FaceId> + '_ {
        self.edge_loops(e).map(|l| self.loops.entity(l).face)
    }

    /// The endpoint of `e` that is not `v`.
    pub fn edge_other_vertex(&self, e: EdgeId, v: VertexId) -> Option<VertexId> {
        self.edges.get(e)?.other_vertex(v)
    }

    /// Corners of `f` in winding order, starting at its anchor.
    pub fn face_loops(&self, f: FaceId) -> FaceCycle<'_> {
        let start = self.faces.get(f).and_then(|x| x.loop_id);
        FaceCycle::new(&self.loops, start)
    }

    /// Boundary vertices of `f` in winding order.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.face_loops(f).map(|l| self.loops.entity(l).vertex)
    }

    /// Boundary edges of `f` in winding order.
    pub fn face_edges(&self, f: FaceId) -> impl Iterator<Item = EdgeId> + '_ {
        self.face_loops(f).map(|l| self.loops.entity(l).edge)
    }

    /// Number of sides of `f`.
    pub fn face_len(&self, f: FaceId) -> usize {
        self.face_loops(f).count()
    }

    /// The corner of `f` whose source vertex is `v`.
    pub fn find_loop(&self, f: FaceId, v: VertexId) -> Option<LoopId> {
        self.face_loops(f).find(|&l| self.loops.entity(l).vertex == v)
    }

    /// The edge joining `a` and `b`, if any.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.vertex_edges(a)
            .find(|&e| self.edges.entity(e).other_vertex(a) == Some(b))
    }
}
