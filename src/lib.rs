#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-brep
//!
//! mesh-brep is a boundary-representation topology kernel for polygon meshes.
//! It stores vertices, edges, faces and face corners ("loops") in columnar
//! containers and connects them through three families of intrusive circular
//! lists, so adjacency queries and local edits run in time proportional to the
//! neighborhood they touch.
//!
//! ## Features
//! - Index handles ([`VertexId`](topology::VertexId), [`EdgeId`](topology::EdgeId),
//!   [`FaceId`](topology::FaceId), [`LoopId`](topology::LoopId)) that stay
//!   stable until an explicit [`Mesh::compact_data`](mesh::Mesh::compact_data)
//! - Disk cycles (edges around a vertex), radial cycles (faces around an
//!   edge, including non-manifold fans) and face cycles (corners of a polygon)
//! - Euler operators: split/join edge, split/join face, invert face
//! - Cascading removal with slot reuse through per-kind free lists
//! - Typed attribute columns per entity kind (positions, normals, UVs, flags)
//!   with interpolation, copy and comparison helpers, plus object columns for
//!   any `Clone + PartialEq` value, copied by value
//! - Structural validation with configurable non-manifold handling
//!
//! ## Usage
//!
//! ```
//! use mesh_brep::prelude::*;
//!
//! let mut mesh = Mesh::new();
//! let v: Vec<VertexId> = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]
//!     .into_iter()
//!     .map(|p| mesh.create_vertex_at(p))
//!     .collect::<Result<_, _>>()?;
//! let quad = mesh.create_face(&v)?;
//! let diagonal = mesh.split_face(quad, v[0], v[2])?;
//! assert_eq!((mesh.face_count(), mesh.edge_count(), mesh.loop_count()), (2, 5, 6));
//!
//! let other = mesh.edge_faces(diagonal).find(|&f| f != quad).unwrap();
//! mesh.join_face(quad, other, diagonal)?;
//! assert_eq!(mesh.face_len(quad), 4);
//! # Ok::<(), mesh_brep::mesh_error::MeshBrepError>(())
//! ```
//!
//! ## Invariant checking
//! Enable the `check-invariants` feature to validate the whole mesh after
//! every operator; the first violation panics with the operator's name.

pub mod data;
pub mod debug_invariants;
pub mod mesh;
pub mod mesh_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::attribute::Attribute;
    pub use crate::data::attribute_set::{AttributeScalar, ScalarType, TaggedAttribute};
    pub use crate::data::container::EntityContainer;
    pub use crate::data::object_attribute::{AttributeObject, ObjectAttribute};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::mesh::{Mesh, MeshCapacity, POSITION};
    pub use crate::mesh_error::MeshBrepError;
    pub use crate::topology::entity::{EntityKind, MeshRemap};
    pub use crate::topology::handle::{EdgeId, FaceId, Handle, LoopId, VertexId};
    pub use crate::topology::validation::{NonManifoldHandling, ValidationOptions, validate_topology};
}
