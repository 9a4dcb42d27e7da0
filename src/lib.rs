mod idx;
pub mod predicates;
pub mod mesh;
mod delaunay;
pub mod enclosing;
mod triangulation;
mod inputs;
mod outputs;
mod errors;

#[cfg(feature = "debugging")]
pub mod debug;

#[cfg(any(test, feature = "benchmarking"))]
pub mod tests;

pub use errors::{InternalError, TriangulationError};
pub use idx::{Idx, IdxDisplay};
pub use mesh::{EdgeId, FaceId, Mesh, OUTER_FACE, VertexId};
pub use delaunay::{DelaunayMesh, Location};
pub use triangulation::{ENCLOSING_VERTEX_COUNT, Triangulate, Triangulation, TriangulationOptions, triangulate};

pub use inputs::*;
pub use outputs::*;

pub use num_traits::real::Real;
