//! The mesh facade.
//!
//! [`Mesh`] owns one [`EntityContainer`] per entity kind and is the only code
//! that writes topology links. Its operators are split by concern:
//!
//! - `links`: disk and radial cycle insertion/removal primitives
//! - `build`: `create_vertex*`, `create_edge`, `create_face`
//! - `euler`: `split_edge`, `join_edge`, `split_face`, `join_face`, `invert_face`
//! - `remove`: cascading `remove_vertex`, `remove_edge`, `remove_face`
//! - `query`: adjacency walks and lookups
//!
//! Every operator checks its arguments before the first write and either
//! returns with all cycle invariants restored or fails with the mesh untouched.
//! With the `check-invariants` feature the whole mesh is validated after each
//! operator.

mod build;
mod euler;
mod links;
mod query;
mod remove;

use crate::data::attribute::Attribute;
use crate::data::container::EntityContainer;
use crate::debug_invariants::DebugInvariants;
use crate::mesh_error::MeshBrepError;
use crate::topology::edge::Edge;
use crate::topology::entity::MeshRemap;
use crate::topology::face::Face;
use crate::topology::face_loop::Loop;
use crate::topology::handle::{EdgeId, FaceId, LoopId, VertexId};
use crate::topology::validation::{NonManifoldHandling, ValidationOptions, validate_topology};
use crate::topology::vertex::Vertex;

/// Name of the vertex position attribute (3 × `f64`) every mesh carries.
pub const POSITION: &str = "position";

/// Slot counts to pre-allocate before a bulk import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshCapacity {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    pub loops: usize,
}

impl MeshCapacity {
    /// Rough capacity for a closed mesh of `faces` polygons with
    /// `sides` corners each.
    pub fn for_polygons(faces: usize, sides: usize) -> Self {
        let loops = faces * sides;
        Self {
            vertices: loops / 2,
            edges: loops / 2 + faces,
            faces,
            loops,
        }
    }
}

/// Reusable buffers for collect-then-mutate cascades. Empty between calls.
#[derive(Clone, Debug, Default)]
struct Scratch {
    loops: Vec<LoopId>,
    edges: Vec<EdgeId>,
    faces: Vec<FaceId>,
}

/// A polygon mesh with vertex, edge, face and loop containers.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: EntityContainer<Vertex>,
    edges: EntityContainer<Edge>,
    faces: EntityContainer<Face>,
    loops: EntityContainer<Loop>,
    scratch: Scratch,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh whose vertex container carries [`POSITION`].
    pub fn new() -> Self {
        let mut vertices = EntityContainer::new();
        vertices
            .add_attribute::<f64>(POSITION, 3, 0.0)
            .expect("position attribute has a fixed non-zero arity");
        Self {
            vertices,
            edges: EntityContainer::new(),
            faces: EntityContainer::new(),
            loops: EntityContainer::new(),
            scratch: Scratch::default(),
        }
    }

    /// Empty mesh with storage pre-grown to `capacity`.
    pub fn with_capacity(capacity: MeshCapacity) -> Self {
        let mut mesh = Self::new();
        mesh.ensure_capacity(capacity);
        mesh
    }

    /// Pre-grow every container (and its attribute columns). Never shrinks.
    pub fn ensure_capacity(&mut self, capacity: MeshCapacity) {
        self.vertices.ensure_capacity(capacity.vertices);
        self.edges.ensure_capacity(capacity.edges);
        self.faces.ensure_capacity(capacity.faces);
        self.loops.ensure_capacity(capacity.loops);
    }

    // ---------------------------------------------------------------------
    // Containers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn vertices(&self) -> &EntityContainer<Vertex> {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &EntityContainer<Edge> {
        &self.edges
    }

    #[inline]
    pub fn faces(&self) -> &EntityContainer<Face> {
        &self.faces
    }

    #[inline]
    pub fn loops(&self) -> &EntityContainer<Loop> {
        &self.loops
    }

    /// Mutable vertex container: attribute management only, links stay
    /// under the facade's control.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut EntityContainer<Vertex> {
        &mut self.vertices
    }

    #[inline]
    pub fn edges_mut(&mut self) -> &mut EntityContainer<Edge> {
        &mut self.edges
    }

    #[inline]
    pub fn faces_mut(&mut self) -> &mut EntityContainer<Face> {
        &mut self.faces
    }

    #[inline]
    pub fn loops_mut(&mut self) -> &mut EntityContainer<Loop> {
        &mut self.loops
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }

    // ---------------------------------------------------------------------
    // Positions
    // ---------------------------------------------------------------------

    fn position_column(&self) -> Result<Option<&Attribute<f64>>, MeshBrepError> {
        self.vertices.attribute::<f64>(POSITION, 3)
    }

    /// Position of `v`, or `None` if `v` is dead or the mesh has no
    /// position column.
    pub fn position(&self, v: VertexId) -> Option<[f64; 3]> {
        if !self.vertices.is_alive(v) {
            return None;
        }
        let column = self.position_column().ok()??;
        let p = column.values(v);
        Some([p[0], p[1], p[2]])
    }

    /// Write the position of `v`, attaching the column if it was removed.
    pub fn set_position(&mut self, v: VertexId, position: [f64; 3]) -> Result<(), MeshBrepError> {
        self.vertices.check(v)?;
        self.vertices
            .add_attribute::<f64>(POSITION, 3, 0.0)?
            .try_set_values(v, &position)
    }

    // ---------------------------------------------------------------------
    // Export support
    // ---------------------------------------------------------------------

    /// Compact all four containers so every attribute column is dense, and
    /// rewrite every link to the new indices.
    ///
    /// This is the only operation that renumbers handles. The returned remap
    /// translates handles taken before the call.
    pub fn compact_data(&mut self) -> MeshRemap {
        let remap = MeshRemap {
            vertices: self.vertices.compact(),
            edges: self.edges.compact(),
            faces: self.faces.compact(),
            loops: self.loops.compact(),
        };
        self.vertices.remap_links(&remap);
        self.edges.remap_links(&remap);
        self.faces.remap_links(&remap);
        self.loops.remap_links(&remap);
        log::debug!(
            "compacted mesh: {} vertices, {} edges, {} faces, {} loops",
            self.vertices.len(),
            self.edges.len(),
            self.faces.len(),
            self.loops.len()
        );
        crate::debug_invariants!(self.validate_invariants(), "after compact_data");
        remap
    }

    /// Create an isolated vertex holding a copy of every attribute of `v`.
    ///
    /// Used by export adapters to split a shared vertex whose corners carry
    /// diverging per-loop attributes.
    pub fn create_virtual(&mut self, v: VertexId) -> Result<VertexId, MeshBrepError> {
        self.vertices.check(v)?;
        let copy = self.vertices.create();
        self.vertices.copy_properties(v, copy)?;
        Ok(copy)
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        if cfg!(any(debug_assertions, feature = "check-invariants")) {
            if let Err(e) = self.validate_invariants() {
                panic!("[invariants] mesh: {e}");
            }
        }
    }

    fn validate_invariants(&self) -> Result<(), MeshBrepError> {
        let options = ValidationOptions {
            non_manifold: NonManifoldHandling::Ignore,
            ..ValidationOptions::all()
        };
        validate_topology(self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_mesh_is_empty_with_positions() {
        let mesh = Mesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.vertices().has_attribute(POSITION));
        assert!(mesh.validate_invariants().is_ok());
    }

    #[test]
    fn with_capacity_pre_grows_columns() {
        let mesh = Mesh::with_capacity(MeshCapacity::for_polygons(10, 4));
        assert_eq!(mesh.loops().capacity(), 40);
        assert_eq!(mesh.vertices().capacity(), 20);
        let pos = mesh.vertices().attribute::<f64>(POSITION, 3).unwrap().unwrap();
        assert_eq!(pos.slots(), 20);
    }

    #[test]
    fn virtual_vertex_copies_attributes_by_value() {
        let mut mesh = Mesh::new();
        let v = mesh.create_vertex_at([1.0, 2.0, 3.0]).unwrap();
        let copy = mesh.create_virtual(v).unwrap();
        assert_ne!(v, copy);
        assert_eq!(mesh.position(copy), Some([1.0, 2.0, 3.0]));
        mesh.set_position(v, [0.0; 3]).unwrap();
        assert_eq!(mesh.position(copy), Some([1.0, 2.0, 3.0]));
        assert!(mesh.vertices().get(copy).unwrap().is_isolated());
    }

    #[test]
    fn position_of_dead_vertex_is_none() {
        let mut mesh = Mesh::new();
        let v = mesh.create_vertex();
        mesh.remove_vertex(v).unwrap();
        assert_eq!(mesh.position(v), None);
        assert!(mesh.set_position(v, [1.0; 3]).is_err());
    }
}
