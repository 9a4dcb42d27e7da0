use core::fmt;
use std::fmt::Debug;

use num_traits::real::Real;

/// A two-dimensional input point.
///
/// The coordinate type must implement [num_traits::real::Real], reexported as [crate::Real].
pub trait Point {
    /// The type of the individual `x` and `y` coordinates
    type Coordinate: Real;

    /// The x [Point::Coordinate] value
    fn x(&self) -> Self::Coordinate;
    /// The y [Point::Coordinate] value
    fn y(&self) -> Self::Coordinate;
}

/// The coordinates of a mesh vertex, copied out of the caller's [Point]s.
#[derive(Clone, Copy, PartialEq)]
pub struct Coords<C: Real>([C; 2]);

impl<C: Real> Coords<C> {
    pub fn new(x: C, y: C) -> Self { Self([x, y]) }

    pub fn from_point<P: Point<Coordinate=C>>(p: &P) -> Self {
        Self([p.x(), p.y()])
    }

    pub fn x(&self) -> C { self.0[0] }
    pub fn y(&self) -> C { self.0[1] }

    pub fn is_finite(&self) -> bool {
        is_finite(self.x()) && is_finite(self.y())
    }

    #[cfg(feature = "debugging")]
    pub(crate) fn to_f32(self) -> [f32; 2] {
        [self.x().to_f32().unwrap_or(f32::NAN), self.y().to_f32().unwrap_or(f32::NAN)]
    }
}

/// `true` if `c` converts to a finite `f64`
pub(crate) fn is_finite<C: Real>(c: C) -> bool {
    c.to_f64().map_or(false, f64::is_finite)
}

impl<C: Real> fmt::Debug for Coords<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Coords");
        if let Some(x) = self.x().to_f64() {
            tuple.field(&x);
        }
        if let Some(y) = self.y().to_f64() {
            tuple.field(&y);
        }
        tuple.finish()
    }
}

impl<C: Real> fmt::Display for Coords<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(x), Some(y)) = (self.x().to_f64(), self.y().to_f64()) {
            write!(f, "({}, {})", x, y)
        } else {
            write!(f, "Coords<{}>", std::any::type_name::<C>())
        }
    }
}

impl<C: Real> Point for Coords<C> {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self.0[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self.0[1]
    }
}

impl<C: Debug + Real> Point for [C; 2] {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self[1]
    }
}

/// The z coordinate is carried by some inputs but never used
impl<C: Debug + Real> Point for [C; 3] {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self[1]
    }
}

impl<C: Debug + Real> Point for (C, C) {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self.0
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self.1
    }
}

impl<P: Point> Point for &P {
    type Coordinate = P::Coordinate;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        (**self).x()
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        (**self).y()
    }
}
