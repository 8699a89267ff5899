use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_brep::mesh::{Mesh, MeshCapacity};
use mesh_brep::topology::handle::{FaceId, VertexId};

fn build_grid(n: usize) -> (Mesh, Vec<VertexId>, Vec<FaceId>) {
    let mut mesh = Mesh::with_capacity(MeshCapacity::for_polygons(n * n, 4));
    let mut v = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            v.push(
                mesh.create_vertex_at([i as f64, j as f64, 0.0])
                    .expect("position column"),
            );
        }
    }
    let mut faces = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let at = |i: usize, j: usize| v[j * (n + 1) + i];
            let quad = [at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)];
            faces.push(mesh.create_face(&quad).expect("grid quad"));
        }
    }
    (mesh, v, faces)
}

fn bench_build_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_grid");

    for &n in &[16usize, 64usize] {
        group.bench_with_input(BenchmarkId::new("create_face", n), &n, |b, &n| {
            b.iter(|| {
                let (mesh, _, _) = build_grid(n);
                black_box(mesh.loop_count());
            });
        });

        group.bench_with_input(BenchmarkId::new("triangulate", n), &n, |b, &n| {
            b.iter(|| {
                let (mut mesh, _, faces) = build_grid(n);
                for f in faces {
                    let ring: Vec<_> = mesh.face_vertices(f).collect();
                    mesh.split_face(f, ring[0], ring[2]).expect("diagonal");
                }
                black_box(mesh.face_count());
            });
        });

        group.bench_with_input(BenchmarkId::new("vertex_faces", n), &n, |b, &n| {
            let (mesh, v, _) = build_grid(n);
            b.iter(|| {
                let total: usize = v.iter().map(|&x| mesh.vertex_faces(x).len()).sum();
                black_box(total);
            });
        });

        group.bench_with_input(BenchmarkId::new("churn_and_compact", n), &n, |b, &n| {
            b.iter(|| {
                let (mut mesh, _, faces) = build_grid(n);
                for &f in faces.iter().step_by(3) {
                    mesh.remove_face(f).expect("live face");
                }
                black_box(mesh.compact_data());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_grid);
criterion_main!(benches);
