//! MeshBrepError: Unified error type for mesh-brep public APIs
//!
//! Every fallible operation of the kernel (Euler operators, attribute
//! registry, validation) reports through this one enum. Invalid-but-expected
//! states such as a `join_edge` on a vertex of the wrong valence are not
//! errors; they come back as `Ok(false)`.

use crate::data::attribute_set::ScalarType;
use crate::topology::entity::EntityKind;
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use thiserror::Error;

/// Unified error type for mesh-brep operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshBrepError {
    /// A handle refers to a dead slot or lies outside the container.
    #[error("invalid {kind} handle {index}: slot is dead or out of range")]
    InvalidHandle { kind: EntityKind, index: usize },
    /// `create_face` needs at least three corners.
    #[error("a face needs at least 3 vertices, got {found}")]
    TooFewVertices { found: usize },
    /// The same vertex appears twice in a face's corner list.
    #[error("vertex {0} appears more than once in the face")]
    DuplicateVertex(VertexId),
    /// An edge would connect a vertex to itself.
    #[error("edge endpoints must differ (both are vertex {0})")]
    DegenerateEdge(VertexId),
    /// A vertex argument is not one of the edge's endpoints.
    #[error("vertex {vertex} is not an endpoint of edge {edge}")]
    VertexNotOnEdge { vertex: VertexId, edge: EdgeId },
    /// A vertex argument is not on the face's boundary.
    #[error("vertex {vertex} is not on the boundary of face {face}")]
    VertexNotOnFace { vertex: VertexId, face: FaceId },
    /// `split_face` on two vertices that are equal or consecutive on the face.
    #[error("cannot split face {face} between vertices {v1} and {v2}: they are equal or adjacent")]
    AdjacentSplitVertices {
        face: FaceId,
        v1: VertexId,
        v2: VertexId,
    },
    /// `join_face` called with the same face twice.
    #[error("cannot join face {0} with itself")]
    SameFace(FaceId),
    /// The edge does not carry exactly one loop of each face.
    #[error("edge {edge} is not shared by exactly faces {face1} and {face2}")]
    EdgeNotShared {
        edge: EdgeId,
        face1: FaceId,
        face2: FaceId,
    },
    /// The faces share more than the one edge being removed.
    #[error("faces {face1} and {face2} share more than one edge")]
    MultipleSharedEdges { face1: FaceId, face2: FaceId },
    /// Attributes must have at least one component per entity.
    #[error("attribute `{name}` must have a non-zero arity")]
    ZeroArity { name: String },
    /// An attribute of that name is already attached.
    #[error("attribute `{name}` is already attached")]
    DuplicateAttribute { name: String },
    /// Attribute lookup found the name with another type or arity.
    #[error(
        "attribute `{name}` is {found_type:?}x{found_arity}, requested {expected_type:?}x{expected_arity}"
    )]
    AttributeTypeMismatch {
        name: String,
        expected_type: ScalarType,
        expected_arity: usize,
        found_type: ScalarType,
        found_arity: usize,
    },
    /// Object attribute lookup found the name holding another value type.
    #[error("object attribute `{name}` holds `{found}`, requested `{expected}`")]
    ObjectTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Bulk write with the wrong number of components.
    #[error("slice length mismatch: expected {expected}, found {found}")]
    SliceLengthMismatch { expected: usize, found: usize },

    // ---- structural corruption (reported by validation) ----
    /// A link of a live entity points to a dead slot.
    #[error("{owner} links to dead {kind} {index}")]
    DanglingLink {
        owner: String,
        kind: EntityKind,
        index: usize,
    },
    /// Disk cycle at a vertex is not circular or not symmetric.
    #[error("disk cycle of vertex {vertex} is broken at edge {edge}")]
    BrokenDiskCycle { vertex: VertexId, edge: EdgeId },
    /// A live edge is not reachable from one of its endpoints' disk cycles.
    #[error("edge {edge} is missing from the disk cycle of vertex {vertex}")]
    EdgeNotInDiskCycle { vertex: VertexId, edge: EdgeId },
    /// Radial cycle of an edge is not circular or holds a foreign loop.
    #[error("radial cycle of edge {edge} is broken at loop {loop_id}")]
    BrokenRadialCycle { edge: EdgeId, loop_id: LoopId },
    /// Face cycle is not circular or holds a foreign loop.
    #[error("face cycle of face {face} is broken at loop {loop_id}")]
    BrokenFaceCycle { face: FaceId, loop_id: LoopId },
    /// A live face with fewer than three sides.
    #[error("face {face} has {sides} sides (minimum is 3)")]
    FaceTooSmall { face: FaceId, sides: usize },
    /// A loop's edge does not join its vertex and its successor's vertex.
    #[error("loop {loop_id}: edge {edge} does not connect the loop's vertex to the next corner")]
    LoopEdgeMismatch { loop_id: LoopId, edge: EdgeId },
    /// An edge carries more than two loops.
    #[error("non-manifold edge {edge}: {loops} incident loops")]
    NonManifoldEdge { edge: EdgeId, loops: usize },
    /// An attribute column is shorter than the container's slot range.
    #[error("attribute `{name}` on {kind} holds {found} slots, container has {expected}")]
    AttributeStorageTooShort {
        name: String,
        kind: EntityKind,
        expected: usize,
        found: usize,
    },
}
