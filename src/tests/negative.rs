use crate::{Boundary, Coords, DelaunayMesh, Triangulate, TriangulationError, TriangulationOptions, triangulate};

#[test]
fn not_enough_points() {
    let points = vec![[0f64, 0.], [1., 1.]];
    match points.triangulate_default() {
        Err(TriangulationError::NotEnoughPoints(2)) => {}
        result => panic!("Expected too few points, got {:?}", result.map(|t| t.into_triangles())),
    }
}

#[test]
fn collinear_points() {
    let points = vec![[0f64, 0.], [1., 1.], [2., 2.], [-3., -3.]];
    assert!(matches!(points.triangulate_default(), Err(TriangulationError::InvalidInput(_))));

    let coincident = vec![[1f64, 1.], [1., 1.], [1., 1.]];
    assert!(matches!(coincident.triangulate_default(), Err(TriangulationError::InvalidInput(_))));
}

#[test]
fn non_finite_point() {
    let points = vec![[0f64, 0.], [1., 0.], [f64::NAN, 1.]];
    assert!(matches!(points.triangulate_default(), Err(TriangulationError::InvalidInput(_))));

    let points = vec![[0f32, 0.], [1., 0.], [0., f32::INFINITY]];
    assert!(matches!(points.triangulate_default(), Err(TriangulationError::InvalidInput(_))));
}

#[test]
fn duplicate_point() {
    let points = vec![[0f64, 0.], [1., 0.], [0., 1.], [0., 0.]];
    match points.triangulate_default() {
        Err(TriangulationError::DuplicatePoint { point: 6, existing: 3 }) => {}
        result => panic!("Expected a duplicate point, got {:?}", result.map(|t| t.into_triangles())),
    }
}

#[test]
fn invalid_boundaries() {
    let points = vec![[0f64, 0.], [1., 0.], [0., 1.]];
    let options = TriangulationOptions::default();

    let out_of_range = triangulate(&points, &[Boundary::Vertex(3)], &options);
    assert!(matches!(out_of_range, Err(TriangulationError::InvalidInput(_))));

    let empty = triangulate(&points, &[Boundary::Ring(Vec::new())], &options);
    assert!(matches!(empty, Err(TriangulationError::InvalidInput(_))));
}

#[test]
fn invalid_margin() {
    let points = vec![[0f64, 0.], [1., 0.], [0., 1.]];
    for margin in [0., -1., f64::NAN, f64::INFINITY] {
        let result = triangulate(&points, &[], &TriangulationOptions::new().margin(margin));
        assert!(matches!(result, Err(TriangulationError::InvalidInput(_))), "Margin {} was accepted", margin);
    }
}

#[test]
fn counterclockwise_seed() {
    let points = vec![Coords::new(0f64, 0.), Coords::new(10., 0.), Coords::new(0., 10.), Coords::new(1., 1.)];
    assert!(matches!(DelaunayMesh::new(points), Err(TriangulationError::InvalidInput(_))));
}

#[test]
fn seed_only() {
    let points = vec![Coords::new(0f64, 10.), Coords::new(10., 0.), Coords::new(0., 0.)];
    assert!(matches!(DelaunayMesh::new(points), Err(TriangulationError::NotEnoughPoints(3))));
}

#[test]
fn error_messages() {
    let error = TriangulationError::DuplicatePoint { point: 6, existing: 3 };
    assert_eq!(error.to_string(), "Point v6 coincides with vertex v3");
    assert_eq!(TriangulationError::NotEnoughPoints(2).to_string(), "Point set only contains 2 points");
}
