//! The doubly connected edge list holding the triangulation.
//!
//! Unlike a half-edge structure, each undirected edge is a single [Edge] record carrying
//! one `next`/`prev` pair:
//!
//! * `next` is the successor of the edge when walking its **right** face clockwise
//! * `prev` is the successor of the edge when walking its **left** face clockwise
//!
//! Which of the two applies for a given face is decided by [Mesh::is_clockwise]; every
//! traversal goes through [Mesh::successor] so the orientation test lives in one place.

use std::{collections::HashMap, fmt};

use log::{trace, warn};
use num_traits::real::Real;
use smallvec::SmallVec;

use crate::{Coords, errors::InternalError, idx::{Idx, IdxDisplay, SliceExt, VecExt}, predicates};

pub type VertexId = Idx<Vertex>;
pub type EdgeId = Idx<Edge>;
pub type FaceId = Idx<Face>;

/// The unbounded region outside the convex hull of the mesh.
///
/// Face references are `Option<FaceId>`, with the outer face never stored as a table row.
pub const OUTER_FACE: Option<FaceId> = None;

/// The faces incident on a vertex, in counter-clockwise order
pub type FaceFan = SmallVec<[Option<FaceId>; 8]>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Vertex {
    edge: Option<EdgeId>,
}

impl Vertex {
    /// Any one edge incident on the vertex, or `None` if the vertex is not in the mesh yet
    pub fn edge(&self) -> Option<EdgeId> { self.edge }
}

impl IdxDisplay for Vertex {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "v{}", idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    begin: VertexId,
    end: VertexId,
    left: Option<FaceId>,
    right: Option<FaceId>,
    next: EdgeId,
    prev: EdgeId,
}

impl Edge {
    pub fn begin(&self) -> VertexId { self.begin }
    pub fn end(&self) -> VertexId { self.end }
    pub fn left(&self) -> Option<FaceId> { self.left }
    pub fn right(&self) -> Option<FaceId> { self.right }
    pub fn next(&self) -> EdgeId { self.next }
    pub fn prev(&self) -> EdgeId { self.prev }

    pub fn touches(&self, v: VertexId) -> bool {
        self.begin == v || self.end == v
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let face = |face: Option<FaceId>| face.map_or_else(|| "outer".to_owned(), |face| face.to_string());
        write!(f, "{} -> {} [L {} | R {}] next {} prev {}", self.begin, self.end, face(self.left), face(self.right), self.next, self.prev)
    }
}

impl IdxDisplay for Edge {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "e{}", idx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    edge: EdgeId,
    removed: bool,
}

impl Face {
    /// The representative edge from which the face boundary is reconstructed
    pub fn edge(&self) -> EdgeId { self.edge }
    pub fn is_removed(&self) -> bool { self.removed }
}

impl IdxDisplay for Face {
    fn fmt(f: &mut fmt::Formatter<'_>, idx: usize) -> fmt::Result {
        write!(f, "f{}", idx)
    }
}

/// Vertex, edge and face tables of a triangulated point set.
///
/// The tables are allocated once for the final vertex count and only ever grow by appending.
/// Removing a face leaves a tombstone in its slot.
#[derive(Debug, Clone)]
pub struct Mesh<C: Real> {
    points: Vec<Coords<C>>,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl<C: Real> Mesh<C> {
    /// Maximum number of edges of a triangulation of `vertex_count` points
    pub fn edge_capacity(vertex_count: usize) -> usize {
        (3 * vertex_count).saturating_sub(6).max(3)
    }

    /// Maximum number of faces (outer face included) of a triangulation of `vertex_count` points
    pub fn face_capacity(vertex_count: usize) -> usize {
        (2 * vertex_count).saturating_sub(4).max(2)
    }

    /// Create a mesh over `points`, seeded with the single triangle formed by the first
    /// three points.
    ///
    /// The seed triangle must be listed in clockwise order. No other vertex is part of the
    /// mesh until [split_face](Mesh::split_face) inserts it.
    pub fn new(points: Vec<Coords<C>>) -> Self {
        let vertex_count = points.len();
        assert!(vertex_count >= 3, "A mesh requires at least 3 points, got {}", vertex_count);
        assert!(predicates::is_clockwise(points[0], points[1], points[2]), "The seed triangle must be clockwise");

        let mut vertices = Vec::with_capacity(vertex_count);
        vertices.resize(vertex_count, Vertex::default());
        let mut edges = Vec::with_capacity(Self::edge_capacity(vertex_count));
        let mut faces = Vec::with_capacity(Self::face_capacity(vertex_count));

        let face = faces.push_get_index(Face { edge: Idx::new(0), removed: false });
        for i in 0..3 {
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;
            edges.push(Edge {
                begin: Idx::new(i),
                end: Idx::new(j),
                left: OUTER_FACE,
                right: Some(face),
                next: Idx::new(j),
                prev: Idx::new(k),
            });
            vertices[i].edge = Some(Idx::new(i));
        }

        Self {
            points,
            vertices,
            edges,
            faces,
        }
    }

    pub fn point(&self, v: VertexId) -> Coords<C> { self.points[v.usize()] }
    pub fn points(&self) -> &[Coords<C>] { &self.points }

    pub fn vertex(&self, v: VertexId) -> &Vertex { &self.vertices[v] }
    pub fn edge(&self, e: EdgeId) -> &Edge { &self.edges[e] }
    pub fn face(&self, f: FaceId) -> &Face { &self.faces[f] }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    /// Number of occupied edge slots
    pub fn edge_count(&self) -> usize { self.edges.len() }
    /// Number of occupied face slots, removed faces included
    pub fn face_count(&self) -> usize { self.faces.len() }

    pub fn vertex_edge(&self, v: VertexId) -> Option<EdgeId> { self.vertices[v].edge }
    pub fn face_edge(&self, f: FaceId) -> EdgeId { self.faces[f].edge }
    pub fn is_removed(&self, f: FaceId) -> bool { self.faces[f].removed }

    /// Every face which has not been removed, in table order
    pub fn faces(&self) -> impl Iterator<Item=FaceId> + '_ {
        self.faces.iter_index().filter(move |&f| !self.faces[f].removed)
    }

    /// Every edge, in table order
    pub fn edges(&self) -> impl Iterator<Item=EdgeId> {
        self.edges.iter_index()
    }

    /// `true` if `face` is the right face of `e`, i.e. walking `face` clockwise traverses
    /// `e` from its beginning to its end vertex.
    #[inline]
    pub fn is_clockwise(&self, e: EdgeId, face: FaceId) -> bool {
        self.edges[e].right == Some(face)
    }

    /// The edge following `e` when walking the boundary of `face` clockwise
    #[inline]
    pub fn successor(&self, e: EdgeId, face: FaceId) -> EdgeId {
        if self.is_clockwise(e, face) {
            self.edges[e].next
        } else {
            self.edges[e].prev
        }
    }

    fn set_successor(&mut self, e: EdgeId, face: FaceId, successor: EdgeId) {
        if self.is_clockwise(e, face) {
            self.edges[e].next = successor;
        } else {
            self.edges[e].prev = successor;
        }
    }

    fn replace_face(&mut self, e: EdgeId, old: FaceId, new: FaceId) {
        let edge = &mut self.edges[e];
        if edge.right == Some(old) {
            edge.right = Some(new);
        } else {
            debug_assert_eq!(edge.left, Some(old), "{} does not border {}", e, old);
            edge.left = Some(new);
        }
    }

    /// The face across `e` from `face`, which may be the [OUTER_FACE]
    pub fn other_face(&self, e: EdgeId, face: FaceId) -> Option<FaceId> {
        let edge = &self.edges[e];
        if edge.right == Some(face) {
            edge.left
        } else {
            edge.right
        }
    }

    /// The three vertices of `face`, in clockwise order
    pub fn vertices_of_face(&self, face: FaceId) -> [VertexId; 3] {
        let e0 = self.faces[face].edge;
        let edge = &self.edges[e0];
        let (v0, v1) = if self.is_clockwise(e0, face) {
            (edge.begin, edge.end)
        } else {
            (edge.end, edge.begin)
        };
        let e1 = &self.edges[self.successor(e0, face)];
        let v2 = if e1.begin == v1 { e1.end } else { e1.begin };
        [v0, v1, v2]
    }

    /// The three edges of `face`, in clockwise order.
    ///
    /// Edge `i` connects vertex `i` and vertex `i + 1` of [vertices_of_face](Mesh::vertices_of_face).
    pub fn edges_of_face(&self, face: FaceId) -> [EdgeId; 3] {
        let e0 = self.faces[face].edge;
        let e1 = self.successor(e0, face);
        let e2 = self.successor(e1, face);
        [e0, e1, e2]
    }

    /// The coordinates of the vertices of `face`, in clockwise order
    pub fn triangle(&self, face: FaceId) -> [Coords<C>; 3] {
        let [v0, v1, v2] = self.vertices_of_face(face);
        [self.point(v0), self.point(v1), self.point(v2)]
    }

    /// The vertex of `face` which is not an endpoint of `e`
    pub fn opposite_vertex(&self, face: FaceId, e: EdgeId) -> VertexId {
        let edge = self.edges[e];
        let vertices = self.vertices_of_face(face);
        match vertices.iter().copied().find(|&v| !edge.touches(v)) {
            Some(v) => v,
            None => panic!("{} has no vertex opposite to {}", face, e),
        }
    }

    /// The faces incident on `v`, in counter-clockwise order, starting from the right face
    /// of the vertex's edge.
    ///
    /// The [OUTER_FACE] is listed if `v` is on the hull. Removed faces are skipped.
    pub fn faces_around_vertex(&self, v: VertexId) -> FaceFan {
        let mut fan = FaceFan::new();
        let start = match self.vertices[v].edge {
            Some(e) => e,
            None => return fan,
        };

        let mut e = start;
        for _ in 0..=self.edges.len() {
            let edge = &self.edges[e];
            let (face, next) = if edge.begin == v {
                (edge.right, edge.prev)
            } else {
                (edge.left, edge.next)
            };
            if face.map_or(true, |face| !self.faces[face].removed) {
                fan.push(face);
            }
            e = next;
            if e == start {
                return fan;
            }
        }
        panic!("The edges around {} do not form a closed fan", v)
    }

    /// The non-outer faces sharing an edge with `face`, together with that shared edge
    pub fn neighbors(&self, face: FaceId) -> SmallVec<[(FaceId, EdgeId); 3]> {
        self.edges_of_face(face).iter()
            .filter_map(|&e| self.other_face(e, face).map(|other| (other, e)))
            .filter(|&(other, _)| !self.faces[other].removed)
            .collect()
    }

    /// Insert `v` into `face` by connecting it to the three corners `vertices`, which must be
    /// the result of [vertices_of_face](Mesh::vertices_of_face) for `face`.
    ///
    /// `face` keeps its id for the sub-triangle on the edge `vertices[0] -> vertices[1]`,
    /// two new face ids are allocated for the others. Returns the three sub-triangles.
    pub fn split_face(&mut self, v: VertexId, face: FaceId, vertices: [VertexId; 3]) -> [FaceId; 3] {
        debug_assert!(self.vertices[v].edge.is_none(), "{} is already part of the mesh", v);
        assert!(self.edges.len() + 3 <= Self::edge_capacity(self.vertices.len()), "Edge table is full");
        assert!(self.faces.len() + 2 <= Self::face_capacity(self.vertices.len()), "Face table is full");

        let boundary = self.edges_of_face(face);
        debug_assert!((0..3).all(|i| {
            let edge = &self.edges[boundary[i]];
            edge.touches(vertices[i]) && edge.touches(vertices[(i + 1) % 3])
        }), "Vertices {:?} do not match the boundary of {}", vertices, face);

        let first_spoke = self.edges.next_index();
        let spoke = |i: usize| first_spoke + (i % 3);
        let first_face = self.faces.next_index();
        let sub = [face, first_face, first_face + 1];

        // Close each boundary edge's cycle through the spoke at its clockwise end
        for i in 0..3 {
            self.set_successor(boundary[i], face, spoke(i + 1));
            self.replace_face(boundary[i], face, sub[i]);
        }

        for i in 0..3 {
            self.edges.push(Edge {
                begin: v,
                end: vertices[i],
                left: Some(sub[(i + 2) % 3]),
                right: Some(sub[i]),
                next: boundary[i],
                prev: spoke(i + 2),
            });
        }
        for _ in 1..3 {
            self.faces.push(Face { edge: spoke(2), removed: false });
        }
        self.vertices[v].edge = Some(spoke(0));

        trace!("Split {} at {} into {}, {}, {}", face, v, sub[0], sub[1], sub[2]);
        sub
    }

    /// Replace the diagonal `e` shared by `face_a` and `face_b` with the diagonal joining their
    /// opposite vertices.
    ///
    /// Returns `false` without touching the mesh if both faces have the same vertex set.
    /// That is the only configuration rejected; other flips that would produce a
    /// non-manifold mesh are not detected.
    pub fn flip_edge(&mut self, face_a: FaceId, face_b: FaceId, e: EdgeId) -> bool {
        let edge = self.edges[e];
        debug_assert!(edge.left.is_some() && edge.right.is_some(), "{} is a hull edge", e);

        let vertices_a = self.vertices_of_face(face_a);
        let vertices_b = self.vertices_of_face(face_b);
        let mut sorted_a = vertices_a;
        let mut sorted_b = vertices_b;
        sorted_a.sort();
        sorted_b.sort();
        if sorted_a == sorted_b {
            warn!("Declined to flip {}: {} and {} have the same vertices", e, face_a, face_b);
            return false;
        }

        let opposite_a = self.opposite_vertex(face_a, e);
        let opposite_b = self.opposite_vertex(face_b, e);

        // The edges of both faces, named from the position of `e`:
        // face_a is (e, upper, before), face_b is (e, lower, after) in clockwise order
        let upper = self.successor(e, face_a);
        let lower = self.successor(e, face_b);
        let before = self.successor(upper, face_a);
        let after = self.successor(lower, face_b);

        let (begin_edge, end_edge) = if self.is_clockwise(e, face_a) {
            (lower, upper)
        } else {
            (upper, lower)
        };
        self.vertices[edge.begin].edge = Some(begin_edge);
        self.vertices[edge.end].edge = Some(end_edge);

        self.set_successor(upper, face_a, e);
        self.set_successor(lower, face_b, e);

        self.set_successor(before, face_a, lower);
        self.replace_face(before, face_a, face_b);
        self.set_successor(after, face_b, upper);
        self.replace_face(after, face_b, face_a);

        self.edges[e] = Edge {
            begin: opposite_a,
            end: opposite_b,
            left: Some(face_b),
            right: Some(face_a),
            next: after,
            prev: before,
        };
        self.faces[face_a].edge = e;
        self.faces[face_b].edge = e;

        trace!("Flipped {} between {} and {} to {} -> {}", e, face_a, face_b, opposite_a, opposite_b);
        true
    }

    /// Mark `face` as removed. Its slot is never reused and its edges are left untouched.
    pub fn remove_face(&mut self, face: FaceId) {
        self.faces[face].removed = true;
    }

    /// Check the structural invariants of the tables:
    ///
    /// * the tables stay within the triangulation bounds of the vertex count
    /// * every face (removed or not) is a closed cycle of 3 distinct edges over 3 distinct vertices
    /// * every live face is strictly clockwise and no two live faces share a vertex set
    /// * every edge is listed by the boundaries of both of its faces
    /// * every vertex edge reference touches its vertex
    pub fn validate(&self) -> Result<(), InternalError> {
        let vertex_count = self.vertices.len();
        if self.edges.len() > Self::edge_capacity(vertex_count) {
            return Err(InternalError::new(format!("{} edges exceed the bound for {} vertices", self.edges.len(), vertex_count)));
        }
        if self.faces.len() > Self::face_capacity(vertex_count) {
            return Err(InternalError::new(format!("{} faces exceed the bound for {} vertices", self.faces.len(), vertex_count)));
        }

        for f in self.faces.iter_index() {
            let edges = self.edges_of_face(f);
            if edges[0] == edges[1] || edges[1] == edges[2] || edges[0] == edges[2] {
                return Err(InternalError::new(format!("{} has repeated edges {:?}", f, edges)));
            }
            if let Some(&e) = edges.iter().find(|&&e| self.edges[e].left != Some(f) && self.edges[e].right != Some(f)) {
                return Err(InternalError::new(format!("{} lists {} which does not border it", f, e)));
            }
            if self.successor(edges[2], f) != edges[0] {
                return Err(InternalError::new(format!("The boundary of {} is not a closed triangle", f)));
            }
            let vertices = self.vertices_of_face(f);
            if vertices[0] == vertices[1] || vertices[1] == vertices[2] || vertices[0] == vertices[2] {
                return Err(InternalError::new(format!("{} has repeated vertices {:?}", f, vertices)));
            }
            for i in 0..3 {
                let edge = &self.edges[edges[i]];
                if !edge.touches(vertices[i]) || !edge.touches(vertices[(i + 1) % 3]) {
                    return Err(InternalError::new(format!("{} ({}) does not join {} and {} of {}", edges[i], edge, vertices[i], vertices[(i + 1) % 3], f)));
                }
            }
        }

        let mut vertex_sets = HashMap::with_capacity(self.faces.len());
        for f in self.faces() {
            let [p0, p1, p2] = self.triangle(f);
            if !predicates::is_clockwise(p0, p1, p2) {
                return Err(InternalError::new(format!("{} {:?} is not strictly clockwise", f, self.vertices_of_face(f))));
            }
            let mut key = self.vertices_of_face(f);
            key.sort();
            if let Some(other) = vertex_sets.insert(key, f) {
                return Err(InternalError::new(format!("{} and {} share the vertices {:?}", other, f, key)));
            }
        }

        for e in self.edges.iter_index() {
            let edge = &self.edges[e];
            if edge.begin == edge.end {
                return Err(InternalError::new(format!("{} is a loop at {}", e, edge.begin)));
            }
            if edge.left == edge.right {
                return Err(InternalError::new(format!("{} has the same face on both sides", e)));
            }
            for face in edge.left.iter().chain(edge.right.iter()) {
                if !self.edges_of_face(*face).contains(&e) {
                    return Err(InternalError::new(format!("{} borders {} but is not on its boundary", e, face)));
                }
            }
        }

        for v in self.vertices.iter_index() {
            if let Some(e) = self.vertices[v].edge {
                if !self.edges[e].touches(v) {
                    return Err(InternalError::new(format!("{} references {} which does not touch it", v, e)));
                }
            }
        }

        Ok(())
    }
}
