use num_traits::real::Real;

use crate::Coords;

/// A triangle strictly containing every point of `points`, listed clockwise as
/// `[top left, bottom right, bottom left]`.
///
/// The bounding box of `points` is grown by `margin` on every side. The triangle's legs run along
/// the left and bottom sides of the grown box and its hypotenuse has slope -1 through the grown
/// box's upper right corner.
///
/// `points` must not be empty and `margin` must be positive.
pub fn enclosing_triangle<C: Real>(points: &[Coords<C>], margin: C) -> [Coords<C>; 3] {
    debug_assert!(!points.is_empty());
    debug_assert!(margin > C::zero());

    let mut x_min = points[0].x();
    let mut x_max = x_min;
    let mut y_min = points[0].y();
    let mut y_max = y_min;
    for p in &points[1..] {
        x_min = x_min.min(p.x());
        x_max = x_max.max(p.x());
        y_min = y_min.min(p.y());
        y_max = y_max.max(p.y());
    }

    let left = x_min - margin;
    let bottom = y_min - margin;
    let right = x_max + margin;
    let top = y_max + margin;
    let diagonal = right + top;

    [
        Coords::new(left, diagonal - left),
        Coords::new(diagonal - bottom, bottom),
        Coords::new(left, bottom),
    ]
}
