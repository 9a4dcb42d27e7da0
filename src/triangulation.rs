use log::debug;
use num_traits::{Zero, real::Real};

use crate::{Boundary, Coords, DelaunayMesh, Point, TriangleList, TriangleWinding, TriangulationError, enclosing, inputs::point, predicates};

/// Number of synthetic vertices prepended to the input points
pub const ENCLOSING_VERTEX_COUNT: usize = 3;

/// Settings for [triangulate]
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationOptions {
    margin: f64,
    prune_boundaries: bool,
    winding: TriangleWinding,
    strip_enclosing: bool,
}

impl Default for TriangulationOptions {
    fn default() -> Self {
        Self {
            margin: 5.,
            prune_boundaries: true,
            winding: TriangleWinding::Clockwise,
            strip_enclosing: false,
        }
    }
}

impl TriangulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Distance between the bounding box of the input and the enclosing triangle (default `5`)
    pub fn margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Remove the faces around the enclosing vertices and single vertex boundaries (default `true`)
    pub fn prune_boundaries(mut self, prune_boundaries: bool) -> Self {
        self.prune_boundaries = prune_boundaries;
        self
    }

    /// The vertex order of output triangles (default [TriangleWinding::Clockwise])
    pub fn winding(mut self, winding: TriangleWinding) -> Self {
        self.winding = winding;
        self
    }

    /// Output indices into the caller's points instead of the prefixed points, dropping
    /// triangles which touch the enclosing triangle (default `false`)
    pub fn strip_enclosing(mut self, strip_enclosing: bool) -> Self {
        self.strip_enclosing = strip_enclosing;
        self
    }

    pub fn get_margin(&self) -> f64 { self.margin }
    pub fn get_prune_boundaries(&self) -> bool { self.prune_boundaries }
    pub fn get_winding(&self) -> TriangleWinding { self.winding }
    pub fn get_strip_enclosing(&self) -> bool { self.strip_enclosing }
}

/// The result of [triangulate]
pub struct Triangulation<C: Real> {
    mesh: DelaunayMesh<C>,
    triangles: Vec<[usize; 3]>,
}

impl<C: Real> Triangulation<C> {
    /// The finished mesh, including the enclosing triangle and pruned faces
    pub fn mesh(&self) -> &DelaunayMesh<C> { &self.mesh }

    /// The input points, prefixed with the 3 enclosing triangle vertices
    pub fn points(&self) -> &[Coords<C>] { self.mesh.mesh().points() }

    /// The output triangles as point indices
    pub fn triangles(&self) -> &[[usize; 3]] { &self.triangles }

    pub fn into_triangles(self) -> Vec<[usize; 3]> { self.triangles }

    /// Append the output triangles to `list`
    pub fn extend_list<L: TriangleList>(&self, list: &mut L) {
        for &[v0, v1, v2] in &self.triangles {
            list.push_triangle(v0, v1, v2);
        }
    }
}

/// Build the Delaunay triangulation of `points`.
///
/// The points are prefixed with an enclosing triangle, so unless
/// [strip_enclosing](TriangulationOptions::strip_enclosing) is set, index `i` in the output
/// refers to `points[i - 3]`. Boundary indices refer to `points` directly.
pub fn triangulate<P: Point>(points: &[P], boundaries: &[Boundary], options: &TriangulationOptions) -> Result<Triangulation<P::Coordinate>, TriangulationError> {
    let coords = validate_points(points)?;
    validate_boundaries(boundaries, coords.len())?;

    let margin = <P::Coordinate as num_traits::NumCast>::from(options.margin)
        .filter(|&margin| point::is_finite(margin) && margin > <P::Coordinate as Zero>::zero())
        .ok_or_else(|| TriangulationError::invalid_input(format!("Margin {} is not a positive finite coordinate", options.margin)))?;

    let enclosing = enclosing::enclosing_triangle(&coords, margin);
    debug!("Triangulating {} points inside {} {} {}", coords.len(), enclosing[0], enclosing[1], enclosing[2]);

    let mut prefixed = Vec::with_capacity(coords.len() + ENCLOSING_VERTEX_COUNT);
    prefixed.extend_from_slice(&enclosing);
    prefixed.extend(coords);

    let mut mesh = DelaunayMesh::new(prefixed)?;
    mesh.insert_remaining()?;
    if cfg!(debug_assertions) {
        mesh.mesh().validate()?;
    }

    if options.prune_boundaries {
        let groups: Vec<Boundary> = (0..ENCLOSING_VERTEX_COUNT).map(Boundary::Vertex)
            .chain(boundaries.iter().map(|boundary| boundary.shifted(ENCLOSING_VERTEX_COUNT)))
            .collect();
        mesh.prune_boundaries(&groups);
    }

    let mut triangles: Vec<[usize; 3]> = Vec::new();
    mesh.flatten_into(&mut triangles, options.winding);
    if options.strip_enclosing {
        triangles = triangles.into_iter()
            .filter(|triangle| triangle.iter().all(|&v| v >= ENCLOSING_VERTEX_COUNT))
            .map(|triangle| triangle.map(|v| v - ENCLOSING_VERTEX_COUNT))
            .collect();
    }
    debug!("Triangulation produced {} triangles", triangles.len());

    Ok(Triangulation {
        mesh,
        triangles,
    })
}

fn validate_points<P: Point>(points: &[P]) -> Result<Vec<Coords<P::Coordinate>>, TriangulationError> {
    if points.len() < 3 {
        return Err(TriangulationError::NotEnoughPoints(points.len()));
    }

    let coords: Vec<_> = points.iter().map(Coords::from_point).collect();
    if let Some(index) = coords.iter().position(|p| !p.is_finite()) {
        return Err(TriangulationError::invalid_input(format!("Point {} has a non-finite coordinate", index)));
    }

    let first = coords[0];
    let collinear = match coords.iter().find(|&&p| p != first) {
        Some(&second) => coords.iter().all(|&p| predicates::orientation(first, second, p) == <P::Coordinate as Zero>::zero()),
        None => true,
    };
    if collinear {
        return Err(TriangulationError::invalid_input("All points are collinear"));
    }

    Ok(coords)
}

fn validate_boundaries(boundaries: &[Boundary], point_count: usize) -> Result<(), TriangulationError> {
    for (group, boundary) in boundaries.iter().enumerate() {
        let indices = boundary.indices();
        if indices.is_empty() {
            return Err(TriangulationError::invalid_input(format!("Boundary {} is empty", group)));
        }
        if let Some(index) = indices.iter().find(|&&index| index >= point_count) {
            return Err(TriangulationError::invalid_input(format!("Boundary {} refers to point {} of {}", group, index, point_count)));
        }
    }
    Ok(())
}

/// Triangulation entry point on point slices
pub trait Triangulate {
    type Coordinate: Real;

    fn triangulate(&self, boundaries: &[Boundary], options: &TriangulationOptions) -> Result<Triangulation<Self::Coordinate>, TriangulationError>;

    /// Triangulate without boundaries using the default [TriangulationOptions]
    fn triangulate_default(&self) -> Result<Triangulation<Self::Coordinate>, TriangulationError> {
        self.triangulate(&[], &TriangulationOptions::default())
    }
}

impl<P: Point> Triangulate for [P] {
    type Coordinate = P::Coordinate;

    fn triangulate(&self, boundaries: &[Boundary], options: &TriangulationOptions) -> Result<Triangulation<Self::Coordinate>, TriangulationError> {
        triangulate(self, boundaries, options)
    }
}
