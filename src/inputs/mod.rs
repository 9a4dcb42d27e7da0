pub(crate) mod point;
pub use point::{Point, Coords};
mod boundary;
pub use boundary::Boundary;
