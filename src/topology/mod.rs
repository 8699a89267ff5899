//! Top-level module for mesh topology types.
//!
//! This module provides the handle types, the four entity kinds and their
//! intrusive links:
//! - [`Vertex`] anchors a disk cycle of incident edges
//! - [`Edge`] sits on two disk cycles and anchors a radial cycle of loops
//! - [`Face`] anchors a face cycle of loops
//! - [`Loop`] sits on one face cycle and one radial cycle
//!
//! Most users go through [`Mesh`](crate::mesh::Mesh), which is the only place
//! where links are written.

pub mod cycles;
pub mod edge;
pub mod entity;
pub mod face;
pub mod face_loop;
pub mod handle;
pub mod validation;
pub mod vertex;

pub use cycles::{DiskCycle, FaceCycle, RadialCycle};
pub use edge::Edge;
pub use entity::{Entity, EntityKind, MeshRemap, Remap};
pub use face::Face;
pub use face_loop::Loop;
pub use handle::{EdgeId, FaceId, Handle, LoopId, VertexId};
pub use validation::{NonManifoldHandling, ValidationOptions, validate_topology};
pub use vertex::Vertex;
