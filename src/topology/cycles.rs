//! Lazy walkers over the three link cycles.
//!
//! Each walker starts at an anchor and follows one link field until it comes
//! back to the anchor. They borrow the container immutably, so the topology
//! cannot change underneath them; collect into a `Vec` first when the walk
//! feeds a mutation.

use crate::data::container::EntityContainer;
use crate::topology::edge::Edge;
use crate::topology::face_loop::Loop;
use crate::topology::handle::{EdgeId, LoopId, VertexId};

/// Edges around a vertex, following `disk_next`.
#[derive(Clone, Debug)]
pub struct DiskCycle<'a> {
    edges: &'a EntityContainer<Edge>,
    vertex: VertexId,
    start: Option<EdgeId>,
    current: Option<EdgeId>,
}

impl<'a> DiskCycle<'a> {
    pub(crate) fn new(edges: &'a EntityContainer<Edge>, vertex: VertexId, start: Option<EdgeId>) -> Self {
        Self {
            edges,
            vertex,
            start,
            current: start,
        }
    }
}

impl Iterator for DiskCycle<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let e = self.current?;
        let next = self.edges.entity(e).disk_next(self.vertex);
        self.current = next.filter(|n| Some(*n) != self.start);
        Some(e)
    }
}

/// Loops around an edge, following `radial_next`.
#[derive(Clone, Debug)]
pub struct RadialCycle<'a> {
    loops: &'a EntityContainer<Loop>,
    start: Option<LoopId>,
    current: Option<LoopId>,
}

impl<'a> RadialCycle<'a> {
    pub(crate) fn new(loops: &'a EntityContainer<Loop>, start: Option<LoopId>) -> Self {
        Self {
            loops,
            start,
            current: start,
        }
    }
}

impl Iterator for RadialCycle<'_> {
    type Item = LoopId;

    fn next(&mut self) -> Option<LoopId> {
        let l = self.current?;
        let next = self.loops.entity(l).radial_next;
        self.current = (Some(next) != self.start).then_some(next);
        Some(l)
    }
}

/// Corners of a face, following `next`.
#[derive(Clone, Debug)]
pub struct FaceCycle<'a> {
    loops: &'a EntityContainer<Loop>,
    start: Option<LoopId>,
    current: Option<LoopId>,
}

impl<'a> FaceCycle<'a> {
    pub(crate) fn new(loops: &'a EntityContainer<Loop>, start: Option<LoopId>) -> Self {
        Self {
            loops,
            start,
            current: start,
        }
    }
}

impl Iterator for FaceCycle<'_> {
    type Item = LoopId;

    fn next(&mut self) -> Option<LoopId> {
        let l = self.current?;
        let next = self.loops.entity(l).next;
        self.current = (Some(next) != self.start).then_some(next);
        Some(l)
    }
}
