//! Topology validation helpers.
//!
//! [`validate_topology`] walks every cycle of a [`Mesh`] with bounded loops,
//! so a corrupted mesh produces an error instead of hanging. The first
//! violation found is returned.

use crate::data::container::EntityContainer;
use crate::mesh::Mesh;
use crate::mesh_error::MeshBrepError;
use crate::topology::entity::Entity;
use crate::topology::handle::{EdgeId, Handle, LoopId, VertexId};
use hashbrown::HashSet;

/// Optional validation toggles for mesh topology checks.
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Walk every vertex's disk cycle and check that every edge is on both
    /// of its endpoints' cycles.
    pub check_disk_cycles: bool,
    /// Walk every edge's radial cycle.
    pub check_radial_cycles: bool,
    /// Walk every face cycle and check that consecutive corners match their
    /// edges.
    pub check_face_cycles: bool,
    /// Ensure every attribute column covers the container's slot range.
    pub check_attributes: bool,
    /// How to handle edges used by more than two faces.
    pub non_manifold: NonManifoldHandling,
}

impl ValidationOptions {
    /// Enable all topology validation checks.
    pub fn all() -> Self {
        Self {
            check_disk_cycles: true,
            check_radial_cycles: true,
            check_face_cycles: true,
            check_attributes: true,
            non_manifold: NonManifoldHandling::Error,
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::all()
    }
}

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    Warn,
    /// Return an error on non-manifold edges.
    Error,
}

/// Validate the link structure of `mesh`.
///
/// Dangling links (a live entity pointing at a dead slot) are always
/// checked; the remaining passes follow `options`.
pub fn validate_topology(mesh: &Mesh, options: ValidationOptions) -> Result<(), MeshBrepError> {
    check_links(mesh)?;

    if options.check_disk_cycles {
        check_disk_cycles(mesh)?;
    }

    let radial_seen = if options.check_radial_cycles {
        Some(check_radial_cycles(mesh)?)
    } else {
        None
    };
    let face_seen = if options.check_face_cycles {
        Some(check_face_cycles(mesh)?)
    } else {
        None
    };

    // every live loop must have been reached from its edge and its face
    for (l, lp) in mesh.loops().iter_entities() {
        if radial_seen.as_ref().is_some_and(|seen| !seen.contains(&l)) {
            return Err(MeshBrepError::BrokenRadialCycle {
                edge: lp.edge,
                loop_id: l,
            });
        }
        if face_seen.as_ref().is_some_and(|seen| !seen.contains(&l)) {
            return Err(MeshBrepError::BrokenFaceCycle {
                face: lp.face,
                loop_id: l,
            });
        }
    }

    validate_non_manifold(mesh, options.non_manifold)?;

    if options.check_attributes {
        check_attribute_storage(mesh.vertices())?;
        check_attribute_storage(mesh.edges())?;
        check_attribute_storage(mesh.faces())?;
        check_attribute_storage(mesh.loops())?;
    }

    Ok(())
}

fn ensure_alive<T: Entity>(
    container: &EntityContainer<T>,
    id: T::Id,
    owner: impl FnOnce() -> String,
) -> Result<(), MeshBrepError> {
    if container.is_alive(id) {
        Ok(())
    } else {
        Err(MeshBrepError::DanglingLink {
            owner: owner(),
            kind: T::KIND,
            index: id.index(),
        })
    }
}

fn check_links(mesh: &Mesh) -> Result<(), MeshBrepError> {
    for (v, vertex) in mesh.vertices().iter_entities() {
        if let Some(e) = vertex.edge {
            ensure_alive(mesh.edges(), e, || format!("vertex {v}"))?;
        }
    }
    for (e, edge) in mesh.edges().iter_entities() {
        let owner = || format!("edge {e}");
        for v in edge.vertices {
            ensure_alive(mesh.vertices(), v, owner)?;
        }
        for link in edge.next.into_iter().chain(edge.prev) {
            ensure_alive(mesh.edges(), link, owner)?;
        }
        if let Some(l) = edge.loop_id {
            ensure_alive(mesh.loops(), l, owner)?;
        }
    }
    for (f, face) in mesh.faces().iter_entities() {
        if let Some(l) = face.loop_id {
            ensure_alive(mesh.loops(), l, || format!("face {f}"))?;
        }
    }
    for (l, lp) in mesh.loops().iter_entities() {
        let owner = || format!("loop {l}");
        ensure_alive(mesh.faces(), lp.face, owner)?;
        ensure_alive(mesh.edges(), lp.edge, owner)?;
        ensure_alive(mesh.vertices(), lp.vertex, owner)?;
        for link in [lp.next, lp.prev, lp.radial_next, lp.radial_prev] {
            ensure_alive(mesh.loops(), link, owner)?;
        }
    }
    Ok(())
}

fn check_disk_cycles(mesh: &Mesh) -> Result<(), MeshBrepError> {
    let edges = mesh.edges();
    let limit = edges.slot_count() + 1;
    let mut seen: HashSet<(VertexId, EdgeId)> = HashSet::with_capacity(edges.len() * 2);

    for (v, vertex) in mesh.vertices().iter_entities() {
        let Some(start) = vertex.edge else {
            continue;
        };
        let broken = |edge| MeshBrepError::BrokenDiskCycle { vertex: v, edge };
        let mut cur = start;
        let mut steps = 0usize;
        loop {
            let edge = edges.get(cur).ok_or_else(|| broken(cur))?;
            let next = edge.disk_next(v).ok_or_else(|| broken(cur))?;
            let back = edges.get(next).and_then(|n| n.disk_prev(v));
            if back != Some(cur) || !seen.insert((v, cur)) {
                return Err(broken(cur));
            }
            cur = next;
            if cur == start {
                break;
            }
            steps += 1;
            if steps > limit {
                return Err(broken(cur));
            }
        }
    }

    for (e, edge) in edges.iter_entities() {
        for v in edge.vertices {
            if !seen.contains(&(v, e)) {
                return Err(MeshBrepError::EdgeNotInDiskCycle { vertex: v, edge: e });
            }
        }
    }
    Ok(())
}

fn check_radial_cycles(mesh: &Mesh) -> Result<HashSet<LoopId>, MeshBrepError> {
    let loops = mesh.loops();
    let limit = loops.slot_count() + 1;
    let mut seen = HashSet::with_capacity(loops.len());

    for (e, edge) in mesh.edges().iter_entities() {
        let Some(start) = edge.loop_id else {
            continue;
        };
        let broken = |loop_id| MeshBrepError::BrokenRadialCycle { edge: e, loop_id };
        let mut cur = start;
        let mut steps = 0usize;
        loop {
            let lp = loops.get(cur).ok_or_else(|| broken(cur))?;
            let back = loops.get(lp.radial_next).map(|n| n.radial_prev);
            if lp.edge != e || back != Some(cur) || !seen.insert(cur) {
                return Err(broken(cur));
            }
            cur = lp.radial_next;
            if cur == start {
                break;
            }
            steps += 1;
            if steps > limit {
                return Err(broken(cur));
            }
        }
    }
    Ok(seen)
}

fn check_face_cycles(mesh: &Mesh) -> Result<HashSet<LoopId>, MeshBrepError> {
    let loops = mesh.loops();
    let limit = loops.slot_count() + 1;
    let mut seen = HashSet::with_capacity(loops.len());

    for (f, face) in mesh.faces().iter_entities() {
        let Some(start) = face.loop_id else {
            return Err(MeshBrepError::FaceTooSmall { face: f, sides: 0 });
        };
        let broken = |loop_id| MeshBrepError::BrokenFaceCycle { face: f, loop_id };
        let mut cur = start;
        let mut sides = 0usize;
        loop {
            let lp = loops.get(cur).ok_or_else(|| broken(cur))?;
            let next = loops.get(lp.next).ok_or_else(|| broken(cur))?;
            if lp.face != f || next.prev != cur || !seen.insert(cur) {
                return Err(broken(cur));
            }
            let joins = mesh
                .edges()
                .get(lp.edge)
                .and_then(|edge| edge.other_vertex(lp.vertex));
            if joins != Some(next.vertex) {
                return Err(MeshBrepError::LoopEdgeMismatch {
                    loop_id: cur,
                    edge: lp.edge,
                });
            }
            sides += 1;
            cur = lp.next;
            if cur == start {
                break;
            }
            if sides > limit {
                return Err(broken(cur));
            }
        }
        if sides < 3 {
            return Err(MeshBrepError::FaceTooSmall { face: f, sides });
        }
    }
    Ok(seen)
}

fn validate_non_manifold(mesh: &Mesh, handling: NonManifoldHandling) -> Result<(), MeshBrepError> {
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }
    let limit = mesh.loops().slot_count() + 1;
    for e in mesh.edges().iter() {
        let loops = mesh.edge_loops(e).take(limit).count();
        if loops > 2 {
            match handling {
                NonManifoldHandling::Ignore => {}
                NonManifoldHandling::Warn => {
                    log::warn!("non-manifold edge {e}: {loops} incident loops");
                }
                NonManifoldHandling::Error => {
                    return Err(MeshBrepError::NonManifoldEdge { edge: e, loops });
                }
            }
        }
    }
    Ok(())
}

fn check_attribute_storage<T: Entity>(container: &EntityContainer<T>) -> Result<(), MeshBrepError> {
    let expected = container.slot_count();
    for column in container.attributes().iter() {
        if column.slots() < expected {
            return Err(MeshBrepError::AttributeStorageTooShort {
                name: column.name().to_string(),
                kind: T::KIND,
                expected,
                found: column.slots(),
            });
        }
    }
    Ok(())
}
