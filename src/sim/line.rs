//! Infinite line through two points
//!
//! Lines are computed values, built on demand during collision detection.
//! The implicit form `a*x + b*y + c = 0` is cached at construction for
//! distance queries.

use super::vector::{Point, Vector};

/// An infinite line through `p1` and `p2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    p1: Point,
    p2: Point,
    coeffs: Coefficients,
}

/// Implicit form `a*x + b*y + c = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coefficients {
    a: f32,
    b: f32,
    c: f32,
}

impl Coefficients {
    fn through(p1: Point, p2: Point) -> Self {
        Self {
            a: p1.y() - p2.y(),
            b: p2.x() - p1.x(),
            c: p1.x() * (p2.y() - p1.y()) - p1.y() * (p2.x() - p1.x()),
        }
    }
}

impl Line {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self {
            p1,
            p2,
            coeffs: Coefficients::through(p1, p2),
        }
    }

    #[inline]
    pub fn p1(&self) -> Point {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// Direction of the line, `p2 - p1`
    #[inline]
    pub fn collinear_vector(&self) -> Vector {
        self.p2 - self.p1
    }

    /// A normal of the line (not normalized)
    #[inline]
    pub fn orthogonal_vector(&self) -> Vector {
        self.collinear_vector().orthogonal()
    }

    /// Line through the origin along the normal direction.
    ///
    /// Only its direction is meaningful: it does not pass through either of
    /// this line's points.
    pub fn orthogonal_line(&self) -> Line {
        let w = self.orthogonal_vector();
        Line::new(Point::ORIGIN, Point::ORIGIN + w)
    }

    /// Perpendicular distance from `p` to the line.
    ///
    /// A degenerate line (coincident points) measures the distance to `p1`.
    pub fn distance_to_point(&self, p: Point) -> f32 {
        let Coefficients { a, b, c } = self.coeffs;
        let norm = (a * a + b * b).sqrt();
        if norm <= f32::EPSILON {
            return self.p1.distance_to(p);
        }
        (a * p.x() + b * p.y() + c).abs() / norm
    }

    /// The parallel line passing through `p`
    pub fn parallel_through(&self, p: Point) -> Line {
        let shift = Vector::from_points(self.p1, p);
        Line::new(self.p1 + shift, self.p2 + shift)
    }
}
