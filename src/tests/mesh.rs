use std::collections::HashSet;

use crate::{Coords, EdgeId, FaceId, Idx, Mesh, OUTER_FACE, VertexId, mesh::Edge, predicates::{self, SegmentIntersection}};

use super::util;

fn v(index: usize) -> VertexId { Idx::new(index) }
fn e(index: usize) -> EdgeId { Idx::new(index) }
fn f(index: usize) -> FaceId { Idx::new(index) }

fn seed_mesh() -> Mesh<f64> {
    let points = [(0., 10.), (10., 0.), (0., 0.), (2., 2.), (6., 0.5)];
    Mesh::new(points.iter().map(|&(x, y)| Coords::new(x, y)).collect())
}

fn is_clockwise(mesh: &Mesh<f64>, face: FaceId) -> bool {
    let [a, b, c] = mesh.triangle(face);
    predicates::is_clockwise(a, b, c)
}

#[test]
fn seed_triangle() {
    let mesh = seed_mesh();

    assert_eq!(mesh.face_count(), 1);
    assert_eq!(mesh.edge_count(), 3);
    assert_eq!(mesh.vertices_of_face(f(0)), [v(0), v(1), v(2)]);
    assert_eq!(mesh.edges_of_face(f(0)), [e(0), e(1), e(2)]);
    assert_eq!(mesh.faces_around_vertex(v(0)).as_slice(), &[Some(f(0)), OUTER_FACE]);
    assert!(mesh.faces_around_vertex(v(3)).is_empty());
    assert_eq!(mesh.other_face(e(1), f(0)), OUTER_FACE);
    assert!(mesh.neighbors(f(0)).is_empty());
    assert!(is_clockwise(&mesh, f(0)));
    mesh.validate().expect("Invalid mesh");
}

#[test]
fn split_face() {
    let mut mesh = seed_mesh();

    let sub = mesh.split_face(v(3), f(0), [v(0), v(1), v(2)]);
    assert_eq!(sub, [f(0), f(1), f(2)]);
    assert_eq!(mesh.face_count(), 3);
    assert_eq!(mesh.edge_count(), 6);
    mesh.validate().expect("Invalid mesh");

    assert_eq!(mesh.vertices_of_face(f(0)), [v(0), v(1), v(3)]);
    for face in sub {
        assert!(mesh.vertices_of_face(face).contains(&v(3)));
        assert!(is_clockwise(&mesh, face), "{} is not clockwise", face);
        assert_eq!(mesh.neighbors(face).len(), 2);
    }

    let fan = mesh.faces_around_vertex(v(3));
    assert_eq!(fan.as_slice(), &[Some(f(0)), Some(f(2)), Some(f(1))]);

    // The face on the edge v1 -> v2 has v4 inside
    assert_eq!(predicates::classify_point(Coords::new(6., 0.5), mesh.triangle(f(1))), predicates::PointClass::Inside);
    let corners = mesh.vertices_of_face(f(1));
    mesh.split_face(v(4), f(1), corners);
    assert_eq!(mesh.face_count(), 5);
    assert_eq!(mesh.edge_count(), 9);
    mesh.validate().expect("Invalid mesh");
    for face in mesh.faces() {
        assert!(is_clockwise(&mesh, face), "{} is not clockwise", face);
    }
}

#[derive(Debug, PartialEq)]
struct Tables {
    edges: Vec<Edge>,
    face_edges: Vec<EdgeId>,
    vertex_edges: Vec<Option<EdgeId>>,
}

fn tables(mesh: &Mesh<f64>) -> Tables {
    Tables {
        edges: mesh.edges().map(|e| *mesh.edge(e)).collect(),
        face_edges: (0..mesh.face_count()).map(|face| mesh.face_edge(f(face))).collect(),
        vertex_edges: (0..mesh.vertex_count()).map(|vertex| mesh.vertex_edge(v(vertex))).collect(),
    }
}

fn edge_between(mesh: &Mesh<f64>, a: VertexId, b: VertexId) -> EdgeId {
    mesh.edges().find(|&e| mesh.edge(e).touches(a) && mesh.edge(e).touches(b)).expect("No such edge")
}

#[test]
fn flip_same_face_is_declined() {
    let mut mesh = seed_mesh();
    mesh.split_face(v(3), f(0), [v(0), v(1), v(2)]);

    let before = tables(&mesh);
    assert!(!mesh.flip_edge(f(1), f(1), e(4)));
    assert_eq!(before, tables(&mesh));
    mesh.validate().expect("Invalid mesh");
}

#[test]
fn flip_between_identical_vertex_sets_is_declined() {
    // v3 sits on the hull edge v1 -> v2, so the split leaves f1 without area
    let points = [(0., 10.), (10., 0.), (0., 0.), (5., 0.)];
    let mut mesh = Mesh::new(points.iter().map(|&(x, y)| Coords::new(x, y)).collect());
    mesh.split_face(v(3), f(0), [v(0), v(1), v(2)]);
    assert!(mesh.flip_edge(f(0), f(1), edge_between(&mesh, v(1), v(3))));

    // One of the flipped faces now repeats the vertices of f2
    let mut expected = mesh.vertices_of_face(f(2));
    expected.sort();
    let twin = [f(0), f(1)].into_iter()
        .find(|&face| {
            let mut vertices = mesh.vertices_of_face(face);
            vertices.sort();
            vertices == expected
        })
        .expect("No face repeats the vertices of f2");

    let before = tables(&mesh);
    assert!(!mesh.flip_edge(twin, f(2), edge_between(&mesh, v(0), v(3))));
    assert_eq!(before, tables(&mesh));
}

#[test]
fn validate_rejects_flat_faces() {
    let points = [(0., 10.), (10., 0.), (0., 0.), (5., 0.)];
    let mut mesh = Mesh::new(points.iter().map(|&(x, y)| Coords::new(x, y)).collect());
    mesh.split_face(v(3), f(0), [v(0), v(1), v(2)]);
    assert!(mesh.validate().is_err());

    mesh.remove_face(f(1));
    mesh.validate().expect("Only live faces are checked for orientation");
}

#[test]
fn flip_twice_restores_diagonal() {
    let delaunay = util::delaunay_mesh(&util::random_points(60, 7));
    let mesh = delaunay.mesh();
    let mut flips = 0;

    for e in mesh.edges() {
        let edge = *mesh.edge(e);
        let (face_a, face_b) = match (edge.right(), edge.left()) {
            (Some(a), Some(b)) => (a, b),
            _ => continue,
        };
        let opposite_a = mesh.opposite_vertex(face_a, e);
        let opposite_b = mesh.opposite_vertex(face_b, e);
        let diagonal = [mesh.point(opposite_a), mesh.point(opposite_b)];
        if predicates::segment_intersection(diagonal, [mesh.point(edge.begin()), mesh.point(edge.end())]) != SegmentIntersection::ProperCross {
            continue;
        }

        let mut flipped = mesh.clone();
        assert!(flipped.flip_edge(face_a, face_b, e));
        flipped.validate().expect("Invalid mesh after flip");
        let new_edge = *flipped.edge(e);
        assert_eq!(HashSet::from([new_edge.begin(), new_edge.end()]), HashSet::from([opposite_a, opposite_b]));
        for face in [face_a, face_b] {
            assert!(is_clockwise(&flipped, face), "{} is not clockwise after flipping {}", face, e);
            assert!(flipped.vertices_of_face(face).contains(&opposite_a));
            assert!(flipped.vertices_of_face(face).contains(&opposite_b));
        }

        assert!(flipped.flip_edge(face_a, face_b, e));
        flipped.validate().expect("Invalid mesh after flipping back");
        let restored = *flipped.edge(e);
        assert_eq!(HashSet::from([restored.begin(), restored.end()]), HashSet::from([edge.begin(), edge.end()]));
        flips += 1;
    }

    assert!(flips > 0);
}

#[test]
fn faces_around_vertex() {
    let delaunay = util::delaunay_mesh(&util::random_points(80, 3));
    let mesh = delaunay.mesh();

    for vertex in (0..mesh.vertex_count()).map(v) {
        let fan = mesh.faces_around_vertex(vertex);
        let listed: HashSet<FaceId> = fan.iter().flatten().copied().collect();
        let touching: HashSet<FaceId> = mesh.faces().filter(|&face| mesh.vertices_of_face(face).contains(&vertex)).collect();
        assert_eq!(listed, touching, "Wrong fan around {}", vertex);
        assert_eq!(listed.len(), fan.iter().flatten().count(), "Repeated face around {}", vertex);

        // Only the enclosing vertices are on the hull
        assert_eq!(fan.contains(&OUTER_FACE), vertex.usize() < 3);

        // Consecutive faces share an edge incident to the vertex
        for i in 0..fan.len() {
            if let (Some(a), Some(b)) = (fan[i], fan[(i + 1) % fan.len()]) {
                assert!(mesh.neighbors(a).iter().any(|&(other, e)| other == b && mesh.edge(e).touches(vertex)), "{} and {} are not adjacent around {}", a, b, vertex);
            }
        }
    }
}

#[test]
fn neighbors_are_symmetric() {
    let delaunay = util::delaunay_mesh(&util::random_points(50, 11));
    let mesh = delaunay.mesh();

    for face in mesh.faces() {
        for (other, e) in mesh.neighbors(face) {
            assert_eq!(mesh.other_face(e, other), Some(face));
            assert!(mesh.neighbors(other).contains(&(face, e)));
        }
    }
}

#[test]
fn removed_faces_are_skipped() {
    let mut mesh = seed_mesh();
    mesh.split_face(v(3), f(0), [v(0), v(1), v(2)]);
    mesh.remove_face(f(1));

    assert!(mesh.is_removed(f(1)));
    assert_eq!(mesh.faces().collect::<Vec<_>>(), vec![f(0), f(2)]);
    assert!(!mesh.faces_around_vertex(v(3)).contains(&Some(f(1))));
    assert!(mesh.neighbors(f(0)).iter().all(|&(other, _)| other != f(1)));
    mesh.validate().expect("Removing a face must not break the tables");
}

#[test]
fn capacity_bounds() {
    assert_eq!(Mesh::<f64>::edge_capacity(3), 3);
    assert_eq!(Mesh::<f64>::face_capacity(3), 2);
    assert_eq!(Mesh::<f64>::edge_capacity(10), 24);
    assert_eq!(Mesh::<f64>::face_capacity(10), 16);
}
