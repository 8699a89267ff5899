mod util;

use mesh_brep::prelude::*;
use proptest::prelude::*;
use util::*;

#[derive(Clone, Debug)]
enum Op {
    SplitEdge(usize, f64),
    JoinEdge(usize),
    SplitFace(usize, usize, usize),
    JoinFace(usize),
    InvertFace(usize),
    RemoveFace(usize),
    RemoveEdge(usize),
    Compact,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), 0.0f64..=1.0).prop_map(|(i, t)| Op::SplitEdge(i, t)),
        3 => any::<usize>().prop_map(Op::JoinEdge),
        3 => (any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(f, a, b)| Op::SplitFace(f, a, b)),
        3 => any::<usize>().prop_map(Op::JoinFace),
        1 => any::<usize>().prop_map(Op::InvertFace),
        1 => any::<usize>().prop_map(Op::RemoveFace),
        1 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => Just(Op::Compact),
    ]
}

fn pick<T: Copy>(items: &[T], i: usize) -> Option<T> {
    (!items.is_empty()).then(|| items[i % items.len()])
}

/// Apply `op`; rejected arguments are fine, corrupting the mesh is not.
fn apply(mesh: &mut Mesh, op: &Op) {
    let edges = mesh.edges().handles();
    let faces = mesh.faces().handles();
    match *op {
        Op::SplitEdge(i, t) => {
            if let Some(e) = pick(&edges, i) {
                mesh.split_edge_at(e, t).unwrap();
            }
        }
        Op::JoinEdge(i) => {
            if let Some(e) = pick(&edges, i) {
                let [a, b] = mesh.edges().get(e).unwrap().vertices();
                let v = if i % 2 == 0 { a } else { b };
                let _ = mesh.join_edge(e, v).unwrap();
            }
        }
        Op::SplitFace(f, a, b) => {
            if let Some(f) = pick(&faces, f) {
                let ring: Vec<_> = mesh.face_vertices(f).collect();
                let (v1, v2) = (ring[a % ring.len()], ring[b % ring.len()]);
                match mesh.split_face(f, v1, v2) {
                    Ok(_) | Err(MeshBrepError::AdjacentSplitVertices { .. }) => {}
                    Err(e) => panic!("split_face failed: {e}"),
                }
            }
        }
        Op::JoinFace(i) => {
            if let Some(e) = pick(&edges, i) {
                let pair: Vec<_> = mesh.edge_faces(e).collect();
                if let [f1, f2] = pair[..] {
                    match mesh.join_face(f1, f2, e) {
                        Ok(_)
                        | Err(MeshBrepError::SameFace(_))
                        | Err(MeshBrepError::MultipleSharedEdges { .. }) => {}
                        Err(err) => panic!("join_face failed: {err}"),
                    }
                }
            }
        }
        Op::InvertFace(i) => {
            if let Some(f) = pick(&faces, i) {
                mesh.invert_face(f).unwrap();
            }
        }
        Op::RemoveFace(i) => {
            if let Some(f) = pick(&faces, i) {
                mesh.remove_face(f).unwrap();
            }
        }
        Op::RemoveEdge(i) => {
            if let Some(e) = pick(&edges, i) {
                mesh.remove_edge(e).unwrap();
            }
        }
        Op::Compact => {
            mesh.compact_data();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_operator_sequences_keep_cycles_closed(ops in prop::collection::vec(op(), 1..40)) {
        let (mut mesh, _, _) = grid(3);
        for op in &ops {
            apply(&mut mesh, op);
            assert_valid(&mesh);
            assert_counts_consistent(&mesh);
        }
    }

    #[test]
    fn split_then_join_is_identity(i in any::<usize>(), t in 0.0f64..=1.0) {
        let (mut mesh, _, faces) = grid(2);
        let edges = mesh.edges().handles();
        let e = edges[i % edges.len()];
        let before: Vec<_> = faces.iter().map(|&f| canonical_cycle(&mesh, f)).collect();
        let counts = (mesh.vertex_count(), mesh.edge_count(), mesh.loop_count());

        let mid = mesh.split_edge_at(e, t).unwrap();
        let [_, far] = mesh.edges().get(e).unwrap().vertices();
        prop_assert_eq!(far, mid);
        let e_new = mesh.vertex_edges(mid).find(|&x| x != e).unwrap();
        prop_assert_eq!(mesh.join_edge(e_new, mid), Ok(true));

        let after: Vec<_> = faces.iter().map(|&f| canonical_cycle(&mesh, f)).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(counts, (mesh.vertex_count(), mesh.edge_count(), mesh.loop_count()));
        assert_valid(&mesh);
    }
}
