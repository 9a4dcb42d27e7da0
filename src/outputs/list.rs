/// A list of triangles represented as triplets of point indices
pub trait TriangleList {
    /// Add a new triangle to the list
    fn push_triangle(&mut self, v0: usize, v1: usize, v2: usize);

    /// The number of triangles in the list
    fn triangle_count(&self) -> usize;

    /// Returns `true` if the collection contains no triangles
    fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }
}

/// Flat `[a0, b0, c0, a1, b1, c1, ...]` layout
impl TriangleList for Vec<usize> {
    fn push_triangle(&mut self, v0: usize, v1: usize, v2: usize) {
        self.extend_from_slice(&[v0, v1, v2]);
    }

    fn triangle_count(&self) -> usize {
        self.len() / 3
    }
}

impl TriangleList for Vec<[usize; 3]> {
    fn push_triangle(&mut self, v0: usize, v1: usize, v2: usize) {
        self.push([v0, v1, v2]);
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }
}

impl TriangleList for Vec<(usize, usize, usize)> {
    fn push_triangle(&mut self, v0: usize, v1: usize, v2: usize) {
        self.push((v0, v1, v2));
    }

    fn triangle_count(&self) -> usize {
        self.len()
    }
}

impl<L: TriangleList> TriangleList for &mut L {
    fn push_triangle(&mut self, v0: usize, v1: usize, v2: usize) {
        (**self).push_triangle(v0, v1, v2)
    }

    fn triangle_count(&self) -> usize {
        (**self).triangle_count()
    }
}
