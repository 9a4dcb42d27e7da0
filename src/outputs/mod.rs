mod list;
pub use list::TriangleList;
mod triangle_winding;
pub use triangle_winding::TriangleWinding;
