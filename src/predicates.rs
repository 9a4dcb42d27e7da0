//! Geometric predicates driving every topological decision of the mesh.
//!
//! All comparisons are exact: a determinant is zero only if it evaluates to exactly
//! zero. Near-degenerate inputs are therefore classified by the floating point
//! result as-is.

use num_traits::real::Real;

use crate::Coords;

/// Where a point lies relative to a triangle
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PointClass {
    Outside,
    Inside,
    /// On the closed segment of one of the triangle's edges (excluding its endpoints)
    OnEdge,
    /// Exactly equal to one of the triangle's vertices
    CoincidentWithVertex,
}

impl PointClass {
    /// `true` for [Inside](PointClass::Inside) and [OnEdge](PointClass::OnEdge), the classes
    /// which allow the triangle to receive the point.
    pub fn is_contained(self) -> bool {
        matches!(self, PointClass::Inside | PointClass::OnEdge)
    }
}

/// How two segments relate to each other
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum SegmentIntersection {
    /// The segments have no point in common
    Disjoint,
    /// The segments cross at a single point interior to both
    ProperCross,
    /// The segments overlap along a line, or an endpoint of one lies on the other
    CollinearOrTouch,
    /// The segments share an endpoint (takes precedence over every other class)
    SharedEndpoint,
}

/// Twice the signed area of the triangle `(a, b, p)`.
///
/// Positive if `p` lies to the left of the directed line `a -> b` (counter-clockwise turn),
/// negative to the right, and zero if the three points are collinear.
#[inline]
pub fn orientation<C: Real>(a: Coords<C>, b: Coords<C>, p: Coords<C>) -> C {
    (b.x() - a.x()) * (p.y() - a.y()) - (p.x() - a.x()) * (b.y() - a.y())
}

/// `true` if `a`, `b`, `c` are listed in clockwise order (strictly)
pub fn is_clockwise<C: Real>(a: Coords<C>, b: Coords<C>, c: Coords<C>) -> bool {
    orientation(a, b, c) < C::zero()
}

/// Inclusive test of `p` against the axis-aligned box spanned by `a` and `b`
pub fn in_bounding_box<C: Real>(p: Coords<C>, a: Coords<C>, b: Coords<C>) -> bool {
    let within = |v: C, e0: C, e1: C| (e0 <= v && v <= e1) || (e0 >= v && v >= e1);
    within(p.x(), a.x(), b.x()) && within(p.y(), a.y(), b.y())
}

/// `true` if the axis-aligned boxes of the two segments do not overlap
pub fn bounding_boxes_disjoint<C: Real>(s0: [Coords<C>; 2], s1: [Coords<C>; 2]) -> bool {
    let [a0, a1] = s0;
    let [b0, b1] = s1;
    a0.x().max(a1.x()) < b0.x().min(b1.x()) ||
    a0.x().min(a1.x()) > b0.x().max(b1.x()) ||
    a0.y().max(a1.y()) < b0.y().min(b1.y()) ||
    a0.y().min(a1.y()) > b0.y().max(b1.y())
}

/// Classify `p` against the triangle `t`.
///
/// Vertex coincidence is checked first. Then one determinant per edge `t[i] -> t[i + 1]`
/// is evaluated: a zero determinant with `p` inside that edge's bounding box means
/// [OnEdge](PointClass::OnEdge), three determinants of the same strict sign mean
/// [Inside](PointClass::Inside). The winding of `t` does not matter.
pub fn classify_point<C: Real>(p: Coords<C>, t: [Coords<C>; 3]) -> PointClass {
    if t.iter().any(|&v| v == p) {
        return PointClass::CoincidentWithVertex;
    }

    let mut all_positive = true;
    let mut all_negative = true;
    for i in 0..3 {
        let a = t[i];
        let b = t[(i + 1) % 3];
        let det = orientation(a, b, p);
        if det == C::zero() && in_bounding_box(p, a, b) {
            return PointClass::OnEdge;
        }
        if !(det > C::zero()) {
            all_positive = false;
        }
        if !(det < C::zero()) {
            all_negative = false;
        }
    }

    if all_positive || all_negative {
        PointClass::Inside
    } else {
        PointClass::Outside
    }
}

/// Classify how segment `a` and segment `b` intersect.
pub fn segment_intersection<C: Real>(a: [Coords<C>; 2], b: [Coords<C>; 2]) -> SegmentIntersection {
    let [a0, a1] = a;
    let [b0, b1] = b;

    if a0 == b0 || a0 == b1 || a1 == b0 || a1 == b1 {
        return SegmentIntersection::SharedEndpoint;
    }

    let zero = C::zero();
    let det0 = orientation(a0, a1, b0);
    let det1 = orientation(a0, a1, b1);

    // Either both segments are on the same line, or an endpoint of `b` is on the line of `a`
    if det0 == zero || det1 == zero {
        return if bounding_boxes_disjoint(a, b) {
            SegmentIntersection::Disjoint
        } else {
            SegmentIntersection::CollinearOrTouch
        };
    }

    if (det0 < zero) != (det1 < zero) {
        let det2 = orientation(b0, b1, a0);
        let det3 = orientation(b0, b1, a1);
        if det2 == zero || det3 == zero {
            SegmentIntersection::CollinearOrTouch
        } else if (det2 < zero) != (det3 < zero) {
            SegmentIntersection::ProperCross
        } else {
            SegmentIntersection::Disjoint
        }
    } else {
        SegmentIntersection::Disjoint
    }
}

fn determinant3<C: Real>(m: [[C; 3]; 3]) -> C {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) -
    m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]) +
    m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// The in-circle determinant of `p` against the circumcircle of `t`, normalized for the
/// winding of `t`.
///
/// Negative if `p` is strictly inside the circle, positive if strictly outside and zero if the
/// four points are cocircular.
pub fn in_circle_determinant<C: Real>(p: Coords<C>, t: [Coords<C>; 3]) -> C {
    let [c0, c1, c2] = t;
    // Rows are translated by c0, with the third column lifted onto the paraboloid
    let row = |c: Coords<C>| {
        let dx = c.x() - c0.x();
        let dy = c.y() - c0.y();
        [dx, dy, dx * (c.x() + c0.x()) + dy * (c.y() + c0.y())]
    };
    let det = determinant3([row(c1), row(c2), row(p)]);

    let one = C::one();
    let winding = determinant3([
        [c0.x(), c0.y(), one],
        [c1.x(), c1.y(), one],
        [c2.x(), c2.y(), one],
    ]);

    if winding < C::zero() {
        -det
    } else {
        det
    }
}

/// `true` if `p` violates the empty circumcircle condition of `t`.
///
/// Cocircular points count as inside, so a cocircular quadrilateral always has its
/// diagonal flipped once. Changing this tie-break changes which diagonal is kept, never
/// the validity of the triangulation.
pub fn in_circle<C: Real>(p: Coords<C>, t: [Coords<C>; 3]) -> bool {
    in_circle_determinant(p, t) <= C::zero()
}
