/// The order the vertices in a triangle are listed in
///
/// Mesh faces are natively clockwise.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TriangleWinding {
    Counterclockwise,
    Clockwise,
}

impl Default for TriangleWinding {
    fn default() -> Self {
        TriangleWinding::Clockwise
    }
}

impl TriangleWinding {
    /// Reorder a clockwise triangle into this winding, keeping the first vertex in place
    pub fn orient<T>(self, [v0, v1, v2]: [T; 3]) -> [T; 3] {
        match self {
            TriangleWinding::Clockwise => [v0, v1, v2],
            TriangleWinding::Counterclockwise => [v0, v2, v1],
        }
    }
}
