//! Euler operators: split/join edges and faces, invert winding.

use super::Mesh;
use crate::mesh_error::MeshBrepError;
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use hashbrown::HashSet;

impl Mesh {
    /// Split `e = (v0, v1)` by inserting a new vertex.
    ///
    /// `e` becomes `(v0, v_new)` and a new edge `(v_new, v1)` is created. Every
    /// face using `e` gains one loop, placed so that its winding is kept. The
    /// new vertex's attributes are left as the slot holds them; see
    /// [`split_edge_at`](Self::split_edge_at) to interpolate.
    pub fn split_edge(&mut self, e: EdgeId) -> Result<VertexId, MeshBrepError> {
        self.edges.check(e)?;
        let [v0, v1] = self.edges.entity(e).vertices;

        let v_new = self.vertices.create();
        self.set_edge_endpoint(e, v1, v_new);
        let e_new = self.new_edge(v_new, v1);
        let explicit = self.edges.entity(e).explicit;
        self.edges.entity_mut(e_new).explicit = explicit;

        let mut radial = std::mem::take(&mut self.scratch.loops);
        radial.extend(self.edge_loops(e));
        for &l in &radial {
            let forward = self.loops.entity(l).vertex == v0;
            let l_new = self.loops.create();
            self.loops.entity_mut(l_new).vertex = v_new;
            self.face_cycle_insert_after(l_new, l);
            if forward {
                // v0 -> v_new on e, then v_new -> v1 on e_new
                self.radial_append(l_new, e_new);
            } else {
                // v1 -> v_new on e_new, then v_new -> v0 on e
                debug_assert_eq!(self.loops.entity(l).vertex, v1);
                self.radial_remove(l);
                self.radial_append(l, e_new);
                self.radial_append(l_new, e);
            }
        }
        let added = radial.len();
        radial.clear();
        self.scratch.loops = radial;

        log::trace!("split_edge {e}: new vertex {v_new}, new edge {e_new}, {added} loops");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after split_edge");
        Ok(v_new)
    }

    /// [`split_edge`](Self::split_edge), then interpolate every floating
    /// vertex attribute of the new vertex at `t` along `v0 -> v1`.
    pub fn split_edge_at(&mut self, e: EdgeId, t: f64) -> Result<VertexId, MeshBrepError> {
        let [v0, v1] = self.edges.try_get(e)?.vertices;
        let v_new = self.split_edge(e)?;
        self.vertices.interpolate(v_new, v0, v1, t);
        Ok(v_new)
    }

    /// Inverse of [`split_edge`](Self::split_edge): dissolve vertex `v`, which
    /// must join `e` and exactly one other edge `keep`.
    ///
    /// `e` and `v` are destroyed; `keep` is re-targeted from `v` to the far
    /// endpoint of `e`. In every face the loop leaving `v` is destroyed and the
    /// loop entering `v` is extended over `keep`, so loops and edges that
    /// existed before a split survive a split/join round trip.
    ///
    /// Returns `Ok(false)` and leaves the mesh untouched when `v` does not have
    /// exactly two edges, when the far endpoints coincide or are already
    /// joined by an edge, when a face uses only one of the two edges, or when
    /// a face would drop below three sides.
    ///
    /// # Errors
    /// `InvalidHandle` for dead arguments, `VertexNotOnEdge` if `v` is not an
    /// endpoint of `e`.
    pub fn join_edge(&mut self, e: EdgeId, v: VertexId) -> Result<bool, MeshBrepError> {
        self.vertices.check(v)?;
        let edge = self.edges.try_get(e)?;
        let Some(a) = edge.other_vertex(v) else {
            return Err(MeshBrepError::VertexNotOnEdge { vertex: v, edge: e });
        };

        let keep = self.disk_next_at(e, v);
        if keep == e || self.disk_next_at(keep, v) != e {
            log::trace!("join_edge {e}: vertex {v} does not have exactly two edges");
            return Ok(false);
        }
        let Some(b) = self.edges.entity(keep).other_vertex(v) else {
            return Ok(false);
        };
        if a == b || self.find_edge(a, b).is_some() {
            log::trace!("join_edge {e}: endpoints {a} and {b} cannot be joined");
            return Ok(false);
        }

        // Pair each loop leaving `v` with the loop entering `v` in the same face.
        let mut pairs: Vec<(LoopId, LoopId, FaceId)> = Vec::new();
        for l in self.edge_loops(e) {
            let lp = self.loops.entity(l);
            let (leaving, entering) = if lp.vertex == v { (l, lp.prev) } else { (lp.next, l) };
            let other = if lp.vertex == v { entering } else { leaving };
            if self.loops.entity(other).edge != keep {
                log::trace!("join_edge {e}: face {} does not pass through both edges", lp.face);
                return Ok(false);
            }
            pairs.push((leaving, entering, lp.face));
        }
        if pairs.len() != self.edge_loops(keep).count() {
            log::trace!("join_edge {e}: edge {keep} has faces that skip {e}");
            return Ok(false);
        }
        for &(_, _, f) in &pairs {
            let dropped = pairs.iter().filter(|p| p.2 == f).count();
            if self.face_len(f) < dropped + 3 {
                log::trace!("join_edge {e}: face {f} would drop below 3 sides");
                return Ok(false);
            }
        }

        for (leaving, entering, _) in pairs {
            self.face_cycle_remove(leaving);
            self.radial_remove(leaving);
            self.loops.destroy(leaving);
            if self.loops.entity(entering).edge == e {
                self.radial_remove(entering);
                self.radial_append(entering, keep);
            }
        }

        let explicit = self.edges.entity(e).explicit;
        self.edges.entity_mut(keep).explicit |= explicit;
        self.disk_remove(e, a);
        self.disk_remove(e, v);
        self.edges.destroy(e);
        self.set_edge_endpoint(keep, v, a);
        self.vertices.destroy(v);

        log::trace!("join_edge: dissolved vertex {v}, edge {keep} now joins {a} and {b}");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after join_edge");
        Ok(true)
    }

    /// Split face `f` along a new edge `v1 - v2`; see
    /// [`split_face_with`](Self::split_face_with) for the side convention.
    pub fn split_face(&mut self, f: FaceId, v1: VertexId, v2: VertexId) -> Result<EdgeId, MeshBrepError> {
        self.split_face_with(f, v1, v2).map(|(e, _)| e)
    }

    /// Split face `f` along an edge `v1 - v2` (reused if it already exists)
    /// and return that edge together with the new face.
    ///
    /// Side convention: `f` keeps the corners walked forward from `v1` up to
    /// `v2`, closed by the new edge traversed `v2 -> v1`. For a
    /// counter-clockwise face that is the region to the right of `v1 -> v2`.
    /// The new face gets the corners from `v2` forward to `v1`, closed by
    /// `v1 -> v2`.
    ///
    /// # Errors
    /// `InvalidHandle` for a dead face, `VertexNotOnFace` if either vertex is
    /// not on the boundary, `AdjacentSplitVertices` if they are equal or
    /// consecutive corners.
    pub fn split_face_with(
        &mut self,
        f: FaceId,
        v1: VertexId,
        v2: VertexId,
    ) -> Result<(EdgeId, FaceId), MeshBrepError> {
        self.faces.check(f)?;
        let l1 = self
            .find_loop(f, v1)
            .ok_or(MeshBrepError::VertexNotOnFace { vertex: v1, face: f })?;
        let l2 = self
            .find_loop(f, v2)
            .ok_or(MeshBrepError::VertexNotOnFace { vertex: v2, face: f })?;
        if l1 == l2 || self.loops.entity(l1).next == l2 || self.loops.entity(l2).next == l1 {
            return Err(MeshBrepError::AdjacentSplitVertices { face: f, v1, v2 });
        }

        let e = self.edge_or_new(v1, v2);
        let f_new = self.faces.create();
        let la = self.loops.create();
        let lb = self.loops.create();
        let p1 = self.loops.entity(l1).prev;
        let p2 = self.loops.entity(l2).prev;

        {
            let a = self.loops.entity_mut(la);
            a.vertex = v1;
            a.face = f_new;
            a.next = l2;
            a.prev = p1;
        }
        {
            let b = self.loops.entity_mut(lb);
            b.vertex = v2;
            b.face = f;
            b.next = l1;
            b.prev = p2;
        }
        self.loops.entity_mut(p1).next = la;
        self.loops.entity_mut(l2).prev = la;
        self.loops.entity_mut(p2).next = lb;
        self.loops.entity_mut(l1).prev = lb;

        let mut cur = self.loops.entity(la).next;
        while cur != la {
            let lp = self.loops.entity_mut(cur);
            lp.face = f_new;
            cur = lp.next;
        }
        self.faces.entity_mut(f).loop_id = Some(lb);
        self.faces.entity_mut(f_new).loop_id = Some(la);
        self.radial_append(la, e);
        self.radial_append(lb, e);

        log::trace!("split_face {f} along {v1}-{v2}: new edge {e}, new face {f_new}");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after split_face");
        Ok((e, f_new))
    }

    /// Merge `f2` into `f1` by dissolving their common edge `e`.
    ///
    /// If the two loops on `e` start at the same vertex the faces have
    /// opposite winding, and `f2` is inverted first. `e`, its two loops and
    /// `f2` are destroyed; `f1` is returned.
    ///
    /// # Errors
    /// `InvalidHandle` for dead arguments, `SameFace` if `f1 == f2`,
    /// `EdgeNotShared` unless `e` carries exactly one loop of each face,
    /// `MultipleSharedEdges` if the faces share any other edge.
    pub fn join_face(&mut self, f1: FaceId, f2: FaceId, e: EdgeId) -> Result<FaceId, MeshBrepError> {
        self.faces.check(f1)?;
        self.faces.check(f2)?;
        self.edges.check(e)?;
        if f1 == f2 {
            return Err(MeshBrepError::SameFace(f1));
        }

        let not_shared = MeshBrepError::EdgeNotShared { edge: e, face1: f1, face2: f2 };
        let radial: Vec<LoopId> = self.edge_loops(e).collect();
        let [x, y] = radial[..] else {
            return Err(not_shared);
        };
        let (l1, l2) = match (self.loops.entity(x).face, self.loops.entity(y).face) {
            (a, b) if a == f1 && b == f2 => (x, y),
            (a, b) if a == f2 && b == f1 => (y, x),
            _ => return Err(not_shared),
        };
        let boundary: HashSet<EdgeId> = self.face_edges(f1).collect();
        if self.face_edges(f2).filter(|s| boundary.contains(s)).count() != 1 {
            return Err(MeshBrepError::MultipleSharedEdges { face1: f1, face2: f2 });
        }

        if self.loops.entity(l1).vertex == self.loops.entity(l2).vertex {
            self.invert_face(f2)?;
        }

        let (p1, n1) = (self.loops.entity(l1).prev, self.loops.entity(l1).next);
        let (p2, n2) = (self.loops.entity(l2).prev, self.loops.entity(l2).next);
        self.loops.entity_mut(p1).next = n2;
        self.loops.entity_mut(n2).prev = p1;
        self.loops.entity_mut(p2).next = n1;
        self.loops.entity_mut(n1).prev = p2;

        let mut cur = n2;
        while cur != n1 {
            let lp = self.loops.entity_mut(cur);
            lp.face = f1;
            cur = lp.next;
        }
        self.faces.entity_mut(f1).loop_id = Some(n1);

        for l in [l1, l2] {
            self.radial_remove(l);
            self.loops.destroy(l);
        }
        self.kill_wire_edge(e);
        self.faces.destroy(f2);

        log::trace!("join_face: merged {f2} into {f1} across edge {e}");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after join_face");
        Ok(f1)
    }

    /// Reverse the winding of `f` in place.
    ///
    /// Each loop keeps its edge (radial and disk cycles are untouched) and
    /// takes its old successor's vertex as source, so per-corner attributes
    /// move one corner along.
    pub fn invert_face(&mut self, f: FaceId) -> Result<(), MeshBrepError> {
        self.faces.check(f)?;
        let mut ring = std::mem::take(&mut self.scratch.loops);
        ring.extend(self.face_loops(f));

        if let Some(&first) = ring.first() {
            let first_vertex = self.loops.entity(first).vertex;
            for i in 0..ring.len() {
                let source = match ring.get(i + 1) {
                    Some(&n) => self.loops.entity(n).vertex,
                    None => first_vertex,
                };
                let lp = self.loops.entity_mut(ring[i]);
                lp.vertex = source;
                std::mem::swap(&mut lp.next, &mut lp.prev);
            }
        }

        ring.clear();
        self.scratch.loops = ring;
        log::trace!("invert_face {f}");
        crate::debug_invariants!(crate::DebugInvariants::validate_invariants(self), "after invert_face");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug_invariants::DebugInvariants;

    fn quad() -> (Mesh, Vec<VertexId>, FaceId) {
        let mut mesh = Mesh::new();
        let v: Vec<_> = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]
            .into_iter()
            .map(|p| mesh.create_vertex_at(p).unwrap())
            .collect();
        let f = mesh.create_face(&v).unwrap();
        (mesh, v, f)
    }

    #[test]
    fn split_face_keeps_right_side() {
        let (mut mesh, v, f) = quad();
        let (e, f_new) = mesh.split_face_with(f, v[0], v[2]).unwrap();
        assert_eq!(mesh.edges().get(e).unwrap().vertices(), [v[0], v[2]]);
        assert_eq!(mesh.face_vertices(f).collect::<Vec<_>>(), vec![v[2], v[0], v[1]]);
        assert_eq!(mesh.face_vertices(f_new).collect::<Vec<_>>(), vec![v[0], v[2], v[3]]);
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn split_face_rejects_bad_vertices() {
        let (mut mesh, v, f) = quad();
        let outsider = mesh.create_vertex();
        assert_eq!(
            mesh.split_face(f, v[0], outsider),
            Err(MeshBrepError::VertexNotOnFace { vertex: outsider, face: f })
        );
        assert_eq!(
            mesh.split_face(f, v[0], v[1]),
            Err(MeshBrepError::AdjacentSplitVertices { face: f, v1: v[0], v2: v[1] })
        );
        assert_eq!(
            mesh.split_face(f, v[3], v[0]),
            Err(MeshBrepError::AdjacentSplitVertices { face: f, v1: v[3], v2: v[0] })
        );
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.loop_count(), 4);
    }

    #[test]
    fn invert_face_reverses_boundary() {
        let (mut mesh, v, f) = quad();
        let edges_before: Vec<_> = mesh.face_edges(f).collect();
        mesh.invert_face(f).unwrap();
        let verts: Vec<_> = mesh.face_vertices(f).collect();
        assert_eq!(verts, vec![v[1], v[0], v[3], v[2]]);
        let mut edges_after: Vec<_> = mesh.face_edges(f).collect();
        let mut sorted_before = edges_before.clone();
        sorted_before.sort();
        edges_after.sort();
        assert_eq!(edges_after, sorted_before);
        mesh.validate_invariants().unwrap();

        mesh.invert_face(f).unwrap();
        assert_eq!(mesh.face_vertices(f).collect::<Vec<_>>(), v);
    }

    #[test]
    fn join_face_auto_inverts_opposite_winding() {
        let mut mesh = Mesh::new();
        let v: Vec<_> = (0..4).map(|_| mesh.create_vertex()).collect();
        let f1 = mesh.create_face(&[v[0], v[1], v[2]]).unwrap();
        // same direction along v0 -> v1: inconsistent winding
        let f2 = mesh.create_face(&[v[0], v[1], v[3]]).unwrap();
        let e = mesh.find_edge(v[0], v[1]).unwrap();
        let merged = mesh.join_face(f1, f2, e).unwrap();
        assert_eq!(merged, f1);
        assert_eq!(mesh.face_len(f1), 4);
        assert!(!mesh.faces().is_alive(f2));
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.loop_count(), 4);
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn join_face_argument_errors() {
        let (mut mesh, v, f) = quad();
        let e = mesh.find_edge(v[0], v[1]).unwrap();
        assert_eq!(mesh.join_face(f, f, e), Err(MeshBrepError::SameFace(f)));
        let (diag, f_new) = mesh.split_face_with(f, v[0], v[2]).unwrap();
        assert_eq!(
            mesh.join_face(f, f_new, e),
            Err(MeshBrepError::EdgeNotShared { edge: e, face1: f, face2: f_new })
        );
        assert!(mesh.join_face(f, f_new, diag).is_ok());
    }

    #[test]
    fn join_edge_refuses_wrong_valence() {
        let (mut mesh, v, _) = quad();
        let e = mesh.find_edge(v[0], v[1]).unwrap();
        let extra = mesh.create_vertex();
        mesh.create_edge(v[0], extra).unwrap();
        let loops = mesh.loop_count();
        assert_eq!(mesh.join_edge(e, v[0]), Ok(false));
        assert_eq!(mesh.loop_count(), loops);
        assert_eq!(
            mesh.join_edge(e, extra),
            Err(MeshBrepError::VertexNotOnEdge { vertex: extra, edge: e })
        );
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn join_edge_refuses_to_collapse_triangle() {
        let mut mesh = Mesh::new();
        let v: Vec<_> = (0..3).map(|_| mesh.create_vertex()).collect();
        mesh.create_face(&v).unwrap();
        let e = mesh.find_edge(v[0], v[1]).unwrap();
        assert_eq!(mesh.join_edge(e, v[0]), Ok(false));
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.edge_count(), 3);
    }

    #[test]
    fn explicit_mark_follows_split_and_join() {
        let mut mesh = Mesh::new();
        let a = mesh.create_vertex();
        let b = mesh.create_vertex();
        let e = mesh.create_edge(a, b).unwrap();
        let mid = mesh.split_edge(e).unwrap();
        let half = mesh.find_edge(mid, b).unwrap();
        assert!(mesh.edges().get(half).unwrap().is_explicit());

        assert_eq!(mesh.join_edge(half, mid), Ok(true));
        assert_eq!(mesh.find_edge(a, b), Some(e));
        assert!(mesh.edges().get(e).unwrap().is_explicit());
        mesh.validate_invariants().unwrap();
    }

    #[test]
    fn split_edge_at_interpolates_position() {
        let (mut mesh, v, _) = quad();
        let e = mesh.find_edge(v[0], v[1]).unwrap();
        let mid = mesh.split_edge_at(e, 0.5).unwrap();
        assert_eq!(mesh.position(mid), Some([0.5, 0.0, 0.0]));
        assert_eq!(mesh.vertex_degree(mid), 2);
    }
}
