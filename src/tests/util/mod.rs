mod point_sets;
pub use point_sets::*;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Coords, DelaunayMesh, enclosing};

/// `count` points uniformly distributed in `[0, 1000)²`, reproducible from `seed`
pub fn random_points(count: usize, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| [rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)])
        .collect()
}

/// `points` prefixed with their enclosing triangle, with every point inserted
pub fn delaunay_mesh(points: &[[f64; 2]]) -> DelaunayMesh<f64> {
    let mut mesh = seeded_mesh(points);
    mesh.insert_remaining().expect("Insertion failed");
    mesh
}

/// `points` prefixed with their enclosing triangle, before any insertion
pub fn seeded_mesh(points: &[[f64; 2]]) -> DelaunayMesh<f64> {
    let coords: Vec<Coords<f64>> = points.iter().map(Coords::from_point).collect();
    let mut prefixed = enclosing::enclosing_triangle(&coords, 5.).to_vec();
    prefixed.extend(coords);
    DelaunayMesh::new(prefixed).expect("Invalid mesh input")
}
