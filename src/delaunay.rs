use std::collections::VecDeque;

use log::{debug, trace, warn};
use num_traits::real::Real;

use crate::{Boundary, Coords, TriangleList, TriangleWinding, TriangulationError, idx::Idx, mesh::{EdgeId, FaceId, Mesh, VertexId}, predicates::{self, PointClass, SegmentIntersection}};

#[cfg(feature = "debugging")]
use std::fmt;
#[cfg(feature = "debugging")]
use crate::debug;

/// Where a point falls in the current mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Inside the face or on its boundary, with the face's clockwise vertices
    Face(FaceId, [VertexId; 3]),
    /// Exactly on an existing vertex
    Vertex(VertexId),
}

enum Pivot {
    Found(Location),
    Cross(EdgeId, FaceId),
    Lost,
}

/// A [Mesh] built up one vertex at a time while keeping the Delaunay property.
///
/// Vertices `0`, `1` and `2` form the clockwise enclosing triangle seeding the mesh, every other
/// point must lie strictly inside it. Vertex `3` is the fixed point from which points are located,
/// and the remaining vertices are inserted in index order by [insert](DelaunayMesh::insert).
pub struct DelaunayMesh<C: Real> {
    mesh: Mesh<C>,
    fixed_point: VertexId,
    next_vertex: VertexId,
    #[cfg(feature = "debugging")]
    svg_context: Option<debug::svg::SvgContext>,
    #[cfg(feature = "debugging")]
    current_step: u32,
    #[cfg(feature = "debugging")]
    current_substep: u32,
}

impl<C: Real> DelaunayMesh<C> {
    /// Seed a mesh with the enclosing triangle `points[0..3]`.
    ///
    /// At least one point besides the enclosing triangle is required. Fails if any
    /// coordinate is not finite or the enclosing triangle is not strictly clockwise.
    pub fn new(points: Vec<Coords<C>>) -> Result<Self, TriangulationError> {
        if points.len() < 4 {
            return Err(TriangulationError::NotEnoughPoints(points.len()));
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(TriangulationError::invalid_input(format!("Point {} has a non-finite coordinate", index)));
        }
        if !predicates::is_clockwise(points[0], points[1], points[2]) {
            return Err(TriangulationError::invalid_input(format!("Enclosing triangle {}, {}, {} is not clockwise", points[0], points[1], points[2])));
        }

        #[cfg(feature = "debugging")]
        let svg_context = debug::svg::SvgContext::from_env(&points);

        Ok(Self {
            mesh: Mesh::new(points),
            fixed_point: Idx::new(3),
            next_vertex: Idx::new(3),
            #[cfg(feature = "debugging")]
            svg_context,
            #[cfg(feature = "debugging")]
            current_step: 0,
            #[cfg(feature = "debugging")]
            current_substep: 0,
        })
    }

    pub fn mesh(&self) -> &Mesh<C> { &self.mesh }

    /// The vertex every point location starts from
    pub fn fixed_point(&self) -> VertexId { self.fixed_point }

    /// The vertex the next call to [insert](DelaunayMesh::insert) expects, if any remain
    pub fn next_vertex(&self) -> Option<VertexId> {
        if self.next_vertex.usize() < self.mesh.vertex_count() {
            Some(self.next_vertex)
        } else {
            None
        }
    }

    /// Find the face containing `p` by walking along the segment from the fixed point to `p`.
    ///
    /// When the segment runs exactly through a vertex the walk restarts from that vertex's fan.
    /// Before the fixed point is part of the mesh, and whenever the walk leaves the mesh or
    /// loops, every face is scanned instead. Fails if `p` is outside the mesh.
    pub fn locate(&self, p: Coords<C>) -> Result<Location, TriangulationError> {
        let anchor = self.fixed_point;
        if self.mesh.vertex_edge(anchor).is_none() {
            return self.scan(p);
        }
        let segment = [self.mesh.point(anchor), p];

        let (mut entered, face) = match self.pivot(anchor, p) {
            Pivot::Found(location) => return Ok(location),
            Pivot::Cross(e, face) => (e, face),
            Pivot::Lost => {
                warn!("No edge around {} leads towards {}, scanning all faces", anchor, p);
                return self.scan(p);
            }
        };
        let mut current = self.mesh.other_face(entered, face);

        for _ in 0..=self.mesh.face_count() {
            let face = match current {
                Some(face) => face,
                None => {
                    warn!("Walk towards {} left the mesh through {}, scanning all faces", p, entered);
                    return self.scan(p);
                }
            };
            let vertices = self.mesh.vertices_of_face(face);
            if let Some(location) = self.classify(p, face, vertices) {
                return Ok(location);
            }

            let mut exits = self.mesh.edges_of_face(face).into_iter().filter(|&e| e != entered);
            let (first, second) = match (exits.next(), exits.next()) {
                (Some(first), Some(second)) => (first, second),
                _ => break,
            };
            let exit = match (
                predicates::segment_intersection(segment, self.edge_segment(first)),
                predicates::segment_intersection(segment, self.edge_segment(second)),
            ) {
                (SegmentIntersection::ProperCross, _) => first,
                (_, SegmentIntersection::ProperCross) => second,
                (SegmentIntersection::CollinearOrTouch, SegmentIntersection::CollinearOrTouch) => {
                    // Both exits meet at the corner opposite the entry, the segment runs through it
                    let corner = self.mesh.opposite_vertex(face, entered);
                    trace!("Walk towards {} passes through {}", p, corner);
                    match self.pivot(corner, p) {
                        Pivot::Found(location) => return Ok(location),
                        Pivot::Cross(e, fan_face) => {
                            entered = e;
                            current = self.mesh.other_face(e, fan_face);
                            continue;
                        }
                        Pivot::Lost => break,
                    }
                }
                (SegmentIntersection::CollinearOrTouch, _) => first,
                (_, SegmentIntersection::CollinearOrTouch) => second,
                _ => break,
            };

            trace!("Walk towards {} crosses {} out of {}", p, exit, face);
            entered = exit;
            current = self.mesh.other_face(exit, face);
        }

        warn!("Walk towards {} did not reach its face, scanning all faces", p);
        self.scan(p)
    }

    /// Search the fan around `v` for `p`, or for the edge across which the segment from `v`
    /// to `p` leaves the fan. Proper crossings are preferred over touching edges.
    fn pivot(&self, v: VertexId, p: Coords<C>) -> Pivot {
        let segment = [self.mesh.point(v), p];
        let mut crossing = None;
        let mut touching = None;
        for face in self.mesh.faces_around_vertex(v).into_iter().flatten() {
            if let Some(location) = self.classify(p, face, self.mesh.vertices_of_face(face)) {
                return Pivot::Found(location);
            }
            let far = match self.mesh.edges_of_face(face).into_iter().find(|&e| !self.mesh.edge(e).touches(v)) {
                Some(e) => e,
                None => continue,
            };
            match predicates::segment_intersection(segment, self.edge_segment(far)) {
                SegmentIntersection::ProperCross if crossing.is_none() => crossing = Some((far, face)),
                SegmentIntersection::CollinearOrTouch if touching.is_none() => touching = Some((far, face)),
                _ => {}
            }
        }

        match crossing.or(touching) {
            Some((e, face)) => Pivot::Cross(e, face),
            None => Pivot::Lost,
        }
    }

    fn edge_segment(&self, e: EdgeId) -> [Coords<C>; 2] {
        let edge = self.mesh.edge(e);
        [self.mesh.point(edge.begin()), self.mesh.point(edge.end())]
    }

    fn classify(&self, p: Coords<C>, face: FaceId, vertices: [VertexId; 3]) -> Option<Location> {
        let triangle = vertices.map(|v| self.mesh.point(v));
        match predicates::classify_point(p, triangle) {
            class if class.is_contained() => Some(Location::Face(face, vertices)),
            PointClass::CoincidentWithVertex => vertices.iter().copied()
                .find(|&v| self.mesh.point(v) == p)
                .map(Location::Vertex),
            _ => None,
        }
    }

    fn scan(&self, p: Coords<C>) -> Result<Location, TriangulationError> {
        if let Some(location) = self.mesh.faces().find_map(|face| self.classify(p, face, self.mesh.vertices_of_face(face))) {
            return Ok(location);
        }

        if self.is_enclosed(p) {
            Err(TriangulationError::internal(format!("No face contains {}", p)))
        } else {
            Err(TriangulationError::invalid_input(format!("Point {} lies outside the enclosing triangle", p)))
        }
    }

    fn is_enclosed(&self, p: Coords<C>) -> bool {
        let enclosing = [0, 1, 2].map(|v| self.mesh.point(Idx::new(v)));
        predicates::classify_point(p, enclosing) == PointClass::Inside
    }

    /// Insert the next vertex: locate its face, split the face and restore the Delaunay property.
    ///
    /// Fails if the point is not strictly inside the enclosing triangle or coincides with an
    /// inserted vertex. Panics if `v` is not [next_vertex](DelaunayMesh::next_vertex).
    pub fn insert(&mut self, v: VertexId) -> Result<(), TriangulationError> {
        assert!(v == self.next_vertex && v.usize() < self.mesh.vertex_count(), "Expected to insert {}, got {}", self.next_vertex, v);

        let p = self.mesh.point(v);
        if !self.is_enclosed(p) {
            return Err(TriangulationError::invalid_input(format!("Point {} at {} is not strictly inside the enclosing triangle", v, p)));
        }
        let (face, vertices) = match self.locate(p)? {
            Location::Face(face, vertices) => (face, vertices),
            Location::Vertex(existing) => return Err(TriangulationError::DuplicatePoint {
                point: v.usize(),
                existing: existing.usize(),
            }),
        };

        let faces = self.mesh.split_face(v, face, vertices);
        self.next_vertex = v + 1;

        #[cfg(feature = "debugging")]
        self.output_svg(debug::svg::SvgMeshStyle::highlight_faces(&faces), debug::svg::SvgOutputLevel::AllSteps);

        let flips = self.legalize(v);
        debug!("Inserted {} at {} into {} ({} flips)", v, p, faces[0], flips);

        #[cfg(feature = "debugging")]
        {
            self.output_svg(debug::svg::SvgMeshStyle::highlight_vertex(v), debug::svg::SvgOutputLevel::MajorSteps);
            self.advance_step();
        }

        Ok(())
    }

    /// Insert every vertex not yet in the mesh, in index order
    pub fn insert_remaining(&mut self) -> Result<(), TriangulationError> {
        while let Some(v) = self.next_vertex() {
            self.insert(v)?;
        }
        Ok(())
    }

    /// Flip edges around the freshly inserted `v` until every face touching it is Delaunay.
    ///
    /// Returns the number of flips performed.
    pub fn legalize(&mut self, v: VertexId) -> usize {
        let p = self.mesh.point(v);
        let mut pending: VecDeque<FaceId> = self.mesh.faces_around_vertex(v).into_iter().flatten().collect();
        let mut flips = 0;

        while let Some(face) = pending.pop_front() {
            // Every pending face touches `v`, so exactly one of its edges faces away from it
            let shared = match self.mesh.edges_of_face(face).into_iter().find(|&e| !self.mesh.edge(e).touches(v)) {
                Some(e) => e,
                None => continue,
            };
            let adjacent = match self.mesh.other_face(shared, face) {
                Some(adjacent) => adjacent,
                None => continue,
            };

            if predicates::in_circle(p, self.mesh.triangle(adjacent)) && self.mesh.flip_edge(face, adjacent, shared) {
                flips += 1;
                pending.push_front(adjacent);
                pending.push_front(face);

                #[cfg(feature = "debugging")]
                self.output_svg(debug::svg::SvgMeshStyle::highlight_faces(&[face, adjacent]), debug::svg::SvgOutputLevel::AllSteps);
            }
        }

        flips
    }

    /// Remove every face touching `v`. Does nothing if `v` is not in the mesh.
    pub fn prune_single_vertex_hole(&mut self, v: VertexId) {
        let fan = self.mesh.faces_around_vertex(v);
        trace!("Pruning {} faces around {}", fan.iter().flatten().count(), v);
        for face in fan.into_iter().flatten() {
            self.mesh.remove_face(face);
        }
    }

    /// Prune every boundary group.
    ///
    /// Indices refer to mesh vertices. Groups of a single index are removed whether given as a
    /// [Boundary::Vertex] or a one element [Boundary::Ring]; longer rings are skipped with a
    /// warning.
    pub fn prune_boundaries(&mut self, boundaries: &[Boundary]) {
        for boundary in boundaries {
            match boundary.indices() {
                &[index] => self.prune_single_vertex_hole(Idx::new(index)),
                indices => warn!("Skipping boundary ring of {} vertices, only single vertex holes are pruned", indices.len()),
            }
        }

        #[cfg(feature = "debugging")]
        self.output_svg(debug::svg::SvgMeshStyle::default(), debug::svg::SvgOutputLevel::ResultOnly);
    }

    /// Append every remaining face to `list` as a triangle of vertex indices in `winding` order
    pub fn flatten_into<L: TriangleList>(&self, list: &mut L, winding: TriangleWinding) {
        for face in self.mesh.faces() {
            let [v0, v1, v2] = winding.orient(self.mesh.vertices_of_face(face));
            list.push_triangle(v0.usize(), v1.usize(), v2.usize());
        }
    }

    /// Every remaining face as clockwise vertex indices
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        let mut triangles = Vec::with_capacity(self.mesh.face_count());
        self.flatten_into(&mut triangles, TriangleWinding::Clockwise);
        triangles
    }

    /// `true` if no inserted vertex lies strictly inside the circumcircle of a remaining face.
    ///
    /// Checks every face against every vertex.
    pub fn is_delaunay(&self) -> bool {
        let inserted: Vec<VertexId> = (0..self.mesh.vertex_count())
            .map(Idx::new)
            .filter(|&v| self.mesh.vertex_edge(v).is_some())
            .collect();

        self.mesh.faces().all(|face| {
            let vertices = self.mesh.vertices_of_face(face);
            let triangle = self.mesh.triangle(face);
            inserted.iter()
                .filter(|&&v| !vertices.contains(&v))
                .all(|&v| predicates::in_circle_determinant(self.mesh.point(v), triangle) >= C::zero())
        })
    }
}

#[cfg(feature = "debugging")]
impl<C: Real> DelaunayMesh<C> {
    fn output_svg(&mut self, style: debug::svg::SvgMeshStyle, level: debug::svg::SvgOutputLevel) {
        if let Some(svg_context) = &self.svg_context {
            if svg_context.output_level >= level {
                // Make the directory for this step if this is the first svg
                if self.current_substep == 0 {
                    let path = svg_context.output_path.join(format!("{:03}", self.current_step));
                    if std::fs::create_dir_all(path).is_err() {
                        return;
                    }
                }

                let mut svg = debug::svg::SvgOutput::new(svg_context, style);
                let _ = svg.append_element(&self.mesh, &());

                let path: std::path::PathBuf = format!("{:03}", self.current_step).into();
                let path = path.join(format!("{:03}.svg", self.current_substep));
                let _ = svg.save(path);

                self.current_substep += 1;
            }
        }
    }

    fn advance_step(&mut self) {
        if let Some(svg_context) = &self.svg_context {
            if svg_context.output_level >= debug::svg::SvgOutputLevel::MajorSteps {
                let path = svg_context.output_path.join(format!("{:03}", self.current_step)).join("state.txt");
                if let Ok(f) = std::fs::File::create(path) {
                    let mut w = std::io::BufWriter::new(&f);
                    let _ = mesh_fmt(&mut w, &self.mesh);
                }

                self.current_step += 1;
                self.current_substep = 0;
            }
        }
    }
}

#[cfg(feature = "debugging")]
fn mesh_fmt<C: Real, W: std::io::Write>(w: &mut W, mesh: &Mesh<C>) -> std::io::Result<()> {
    writeln!(w, "Vertices:")?;
    for v in (0..mesh.vertex_count()).map(VertexId::new) {
        match mesh.vertex_edge(v) {
            Some(e) => writeln!(w, "  {} {} ({})", v, mesh.point(v), e)?,
            None => writeln!(w, "  {} {} (not inserted)", v, mesh.point(v))?,
        }
    }
    writeln!(w, "Edges:")?;
    for e in mesh.edges() {
        writeln!(w, "  {}: {}", e, mesh.edge(e))?;
    }
    writeln!(w, "Faces:")?;
    for f in (0..mesh.face_count()).map(FaceId::new) {
        let [v0, v1, v2] = mesh.vertices_of_face(f);
        let removed = if mesh.is_removed(f) { " (removed)" } else { "" };
        writeln!(w, "  {}: {} {} {} seed {}{}", f, v0, v1, v2, mesh.face_edge(f), removed)?;
    }
    Ok(())
}

#[cfg(feature = "debugging")]
impl<C: Real> debug::svg::SvgElement for Mesh<C> {
    fn write_svg(&self, svg_output: &mut debug::svg::SvgOutput<'_>, _state: &()) -> fmt::Result {
        use svg_fmt::*;
        use fmt::Write;

        use debug::svg::SvgElementStyle;

        for f in (0..self.face_count()).map(FaceId::new) {
            let fill = match svg_output.style.face_style(f, self.is_removed(f)) {
                SvgElementStyle::Hide => continue,
                SvgElementStyle::Standard => rgb(220, 235, 255),
                SvgElementStyle::Highlight => rgb(255, 200, 120),
            };
            let corners = self.triangle(f).map(|p| p.to_f32());
            writeln!(svg_output, "{}",
                polygon(&corners[..])
                    .fill(Fill::Color(fill))
                    .stroke(Stroke::Color(blue(), svg_output.context.percent(0.2)))
            )?;
            if svg_output.style.add_labels {
                let x = (corners[0][0] + corners[1][0] + corners[2][0]) / 3.0;
                let y = (corners[0][1] + corners[1][1] + corners[2][1]) / 3.0;
                writeln!(svg_output, "{}",
                    text(x, y, f.to_string())
                        .size(svg_output.context.percent(1.0))
                        .align(Align::Center)
                )?;
            }
        }

        for v in (0..self.vertex_count()).map(VertexId::new) {
            if self.vertex_edge(v).is_none() {
                continue;
            }
            let [x, y] = self.point(v).to_f32();
            let color = match svg_output.style.vertex_style(v) {
                SvgElementStyle::Hide => continue,
                SvgElementStyle::Standard => black(),
                SvgElementStyle::Highlight => red(),
            };
            writeln!(svg_output, "{}",
                debug::svg::circle(x, y, svg_output.context.percent(0.4))
                    .fill(Fill::Color(color))
            )?;
            if svg_output.style.add_labels {
                let gap = svg_output.context.percent(1.0);
                writeln!(svg_output, "{}",
                    text(x - gap, y, v.to_string())
                        .color(black())
                        .align(Align::Right)
                        .size(svg_output.context.percent(1.0))
                )?;
            }
        }
        Ok(())
    }
}
