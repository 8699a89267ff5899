//! Cycle primitives: insert into and remove from disk and radial cycles.
//!
//! These helpers assume live arguments; they are the building blocks of the
//! operators and never validate on their own. An empty cycle is represented by
//! the entity linking to itself.

use super::Mesh;
use crate::topology::edge::Edge;
use crate::topology::handle::{EdgeId, LoopId, VertexId};

#[inline]
fn side(edge: &Edge, v: VertexId) -> usize {
    match edge.side_of(v) {
        Some(s) => s,
        None => panic!("vertex {v} is not an endpoint of edge {:?}", edge.vertices()),
    }
}

impl Mesh {
    #[inline]
    pub(crate) fn disk_next_at(&self, e: EdgeId, v: VertexId) -> EdgeId {
        let edge = self.edges.entity(e);
        edge.next[side(edge, v)]
    }

    #[inline]
    pub(crate) fn disk_prev_at(&self, e: EdgeId, v: VertexId) -> EdgeId {
        let edge = self.edges.entity(e);
        edge.prev[side(edge, v)]
    }

    #[inline]
    fn set_disk_next(&mut self, e: EdgeId, v: VertexId, next: EdgeId) {
        let edge = self.edges.entity_mut(e);
        let s = side(edge, v);
        edge.next[s] = next;
    }

    #[inline]
    fn set_disk_prev(&mut self, e: EdgeId, v: VertexId, prev: EdgeId) {
        let edge = self.edges.entity_mut(e);
        let s = side(edge, v);
        edge.prev[s] = prev;
    }

    /// Insert `e` at the tail of `v`'s disk cycle (just before the anchor).
    pub(crate) fn disk_append(&mut self, e: EdgeId, v: VertexId) {
        match self.vertices.entity(v).edge {
            None => {
                self.set_disk_next(e, v, e);
                self.set_disk_prev(e, v, e);
                self.vertices.entity_mut(v).edge = Some(e);
            }
            Some(first) => {
                let last = self.disk_prev_at(first, v);
                self.set_disk_next(e, v, first);
                self.set_disk_prev(e, v, last);
                self.set_disk_next(last, v, e);
                self.set_disk_prev(first, v, e);
            }
        }
    }

    /// Unlink `e` from `v`'s disk cycle, moving the anchor if needed, and
    /// leave `e` self-linked on that side.
    pub(crate) fn disk_remove(&mut self, e: EdgeId, v: VertexId) {
        let next = self.disk_next_at(e, v);
        let prev = self.disk_prev_at(e, v);
        if next == e {
            self.vertices.entity_mut(v).edge = None;
        } else {
            self.set_disk_next(prev, v, next);
            self.set_disk_prev(next, v, prev);
            let vertex = self.vertices.entity_mut(v);
            if vertex.edge == Some(e) {
                vertex.edge = Some(next);
            }
        }
        self.set_disk_next(e, v, e);
        self.set_disk_prev(e, v, e);
    }

    /// Move endpoint `old` of `e` to `new`, relinking both disk cycles.
    pub(crate) fn set_edge_endpoint(&mut self, e: EdgeId, old: VertexId, new: VertexId) {
        self.disk_remove(e, old);
        let edge = self.edges.entity_mut(e);
        let s = side(edge, old);
        edge.vertices[s] = new;
        self.disk_append(e, new);
    }

    /// Set `l.edge = e` and insert `l` at the tail of `e`'s radial cycle.
    pub(crate) fn radial_append(&mut self, l: LoopId, e: EdgeId) {
        self.loops.entity_mut(l).edge = e;
        match self.edges.entity(e).loop_id {
            None => {
                let lp = self.loops.entity_mut(l);
                lp.radial_next = l;
                lp.radial_prev = l;
                self.edges.entity_mut(e).loop_id = Some(l);
            }
            Some(first) => {
                let last = self.loops.entity(first).radial_prev;
                let lp = self.loops.entity_mut(l);
                lp.radial_next = first;
                lp.radial_prev = last;
                self.loops.entity_mut(last).radial_next = l;
                self.loops.entity_mut(first).radial_prev = l;
            }
        }
    }

    /// Unlink `l` from its edge's radial cycle, moving the anchor if needed.
    pub(crate) fn radial_remove(&mut self, l: LoopId) {
        let (e, next, prev) = {
            let lp = self.loops.entity(l);
            (lp.edge, lp.radial_next, lp.radial_prev)
        };
        if next == l {
            self.edges.entity_mut(e).loop_id = None;
        } else {
            self.loops.entity_mut(prev).radial_next = next;
            self.loops.entity_mut(next).radial_prev = prev;
            let edge = self.edges.entity_mut(e);
            if edge.loop_id == Some(l) {
                edge.loop_id = Some(next);
            }
        }
        let lp = self.loops.entity_mut(l);
        lp.radial_next = l;
        lp.radial_prev = l;
    }

    /// Unlink `l` from its face cycle, moving the face anchor to `l.prev`
    /// if needed. `l` stays on its radial cycle.
    pub(crate) fn face_cycle_remove(&mut self, l: LoopId) {
        let (face, next, prev) = {
            let lp = self.loops.entity(l);
            (lp.face, lp.next, lp.prev)
        };
        self.loops.entity_mut(prev).next = next;
        self.loops.entity_mut(next).prev = prev;
        let f = self.faces.entity_mut(face);
        if f.loop_id == Some(l) {
            f.loop_id = Some(prev);
        }
        let lp = self.loops.entity_mut(l);
        lp.next = l;
        lp.prev = l;
    }

    /// Insert `l` into the face cycle right after `after`, on the same face.
    pub(crate) fn face_cycle_insert_after(&mut self, l: LoopId, after: LoopId) {
        let (face, next) = {
            let a = self.loops.entity(after);
            (a.face, a.next)
        };
        let lp = self.loops.entity_mut(l);
        lp.face = face;
        lp.prev = after;
        lp.next = next;
        self.loops.entity_mut(after).next = l;
        self.loops.entity_mut(next).prev = l;
    }
}
