/// A group of input points describing a region to exclude from the output.
///
/// Indices refer to the caller's point slice (not counting the enclosing triangle).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// An isolated point whose incident triangles are removed
    Vertex(usize),
    /// A closed ring of points enclosing a hole.
    ///
    /// A ring of a single point is pruned like [Boundary::Vertex]. Longer rings are validated but
    /// not excised; see [crate::TriangulationOptions::prune_boundaries].
    Ring(Vec<usize>),
}

impl Boundary {
    pub fn indices(&self) -> &[usize] {
        match self {
            Boundary::Vertex(index) => std::slice::from_ref(index),
            Boundary::Ring(indices) => indices,
        }
    }

    pub(crate) fn shifted(&self, offset: usize) -> Self {
        match self {
            Boundary::Vertex(index) => Boundary::Vertex(index + offset),
            Boundary::Ring(indices) => Boundary::Ring(indices.iter().map(|i| i + offset).collect()),
        }
    }
}

impl From<usize> for Boundary {
    fn from(index: usize) -> Self {
        Boundary::Vertex(index)
    }
}

impl From<Vec<usize>> for Boundary {
    fn from(mut indices: Vec<usize>) -> Self {
        if indices.len() == 1 {
            Boundary::Vertex(indices.remove(0))
        } else {
            Boundary::Ring(indices)
        }
    }
}

impl From<&[usize]> for Boundary {
    fn from(indices: &[usize]) -> Self {
        indices.to_vec().into()
    }
}
