#![allow(dead_code)]
use mesh_brep::prelude::*;

/// Unit square in the z = 0 plane, counter-clockwise.
pub const SQUARE: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
];

/// Create one vertex per position.
pub fn vertices_at(mesh: &mut Mesh, positions: &[[f64; 3]]) -> Vec<VertexId> {
    positions
        .iter()
        .map(|&p| mesh.create_vertex_at(p).expect("position column is f64x3"))
        .collect()
}

/// A mesh holding the unit square as a single quad.
pub fn square() -> (Mesh, Vec<VertexId>, FaceId) {
    let mut mesh = Mesh::new();
    let v = vertices_at(&mut mesh, &SQUARE);
    let f = mesh.create_face(&v).expect("square face");
    (mesh, v, f)
}

/// Two triangles `(v0, v1, v2)` and `(v1, v0, v3)` sharing edge v0-v1 with
/// consistent winding.
pub fn two_triangles() -> (Mesh, Vec<VertexId>, [FaceId; 2]) {
    let mut mesh = Mesh::new();
    let v = vertices_at(
        &mut mesh,
        &[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.5, -1.0, 0.0],
        ],
    );
    let f0 = mesh.create_face(&[v[0], v[1], v[2]]).expect("upper triangle");
    let f1 = mesh.create_face(&[v[1], v[0], v[3]]).expect("lower triangle");
    (mesh, v, [f0, f1])
}

/// `wings` triangles fanned around the spine edge `(a, b)`.
pub fn fan(wings: usize) -> (Mesh, EdgeId, Vec<FaceId>) {
    let mut mesh = Mesh::new();
    let a = mesh.create_vertex_at([0.0, 0.0, 0.0]).expect("spine start");
    let b = mesh.create_vertex_at([0.0, 0.0, 1.0]).expect("spine end");
    let faces = (0..wings)
        .map(|i| {
            let angle = i as f64 * std::f64::consts::TAU / wings as f64;
            let tip = mesh
                .create_vertex_at([angle.cos(), angle.sin(), 0.5])
                .expect("wing tip");
            mesh.create_face(&[a, b, tip]).expect("wing")
        })
        .collect();
    let spine = mesh.find_edge(a, b).expect("spine edge");
    (mesh, spine, faces)
}

/// `n x n` grid of unit quads, counter-clockwise. Vertices are row-major.
pub fn grid(n: usize) -> (Mesh, Vec<VertexId>, Vec<FaceId>) {
    let mut mesh = Mesh::with_capacity(MeshCapacity::for_polygons(n * n, 4));
    let mut v = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            v.push(
                mesh.create_vertex_at([i as f64, j as f64, 0.0])
                    .expect("grid vertex"),
            );
        }
    }
    let at = |i: usize, j: usize| v[j * (n + 1) + i];
    let mut faces = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let quad = [at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)];
            faces.push(mesh.create_face(&quad).expect("grid quad"));
        }
    }
    (mesh, v, faces)
}

/// Full structural validation, tolerating non-manifold edges.
pub fn assert_valid(mesh: &Mesh) {
    let opts = ValidationOptions {
        non_manifold: NonManifoldHandling::Ignore,
        ..ValidationOptions::all()
    };
    if let Err(e) = validate_topology(mesh, opts) {
        panic!("mesh failed validation: {e}");
    }
}

/// Global counting identities: every loop sits on one face, every edge on
/// two disk cycles.
pub fn assert_counts_consistent(mesh: &Mesh) {
    let corners: usize = mesh.faces().iter().map(|f| mesh.face_len(f)).sum();
    assert_eq!(corners, mesh.loop_count(), "face cycles vs loop count");
    let radial: usize = mesh.edges().iter().map(|e| mesh.edge_loops(e).count()).sum();
    assert_eq!(radial, mesh.loop_count(), "radial cycles vs loop count");
    let degrees: usize = mesh.vertices().iter().map(|v| mesh.vertex_degree(v)).sum();
    assert_eq!(degrees, 2 * mesh.edge_count(), "disk cycles vs edge count");
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Boundary vertex cycle of `f`, rotated to start at its smallest handle so
/// that two equal cycles compare equal regardless of anchor.
pub fn canonical_cycle(mesh: &Mesh, f: FaceId) -> Vec<VertexId> {
    let mut cycle: Vec<_> = mesh.face_vertices(f).collect();
    if let Some(min_at) = cycle.iter().enumerate().min_by_key(|(_, v)| **v).map(|(i, _)| i) {
        cycle.rotate_left(min_at);
    }
    cycle
}
