//! Vector and point algebra
//!
//! Both types wrap `glam::Vec2` but stay distinct: a `Point` is a position,
//! a `Vector` is a displacement or velocity. `Point + Vector` is a `Point`,
//! `Point - Point` is a `Vector`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::line::Line;
use crate::almost_zero;

/// A 2D displacement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector(Vec2);

impl Vector {
    pub const ZERO: Self = Self(Vec2::ZERO);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Vector pointing from `from` to `to`
    #[inline]
    pub fn from_points(from: Point, to: Point) -> Self {
        to - from
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn dot(self, other: Vector) -> f32 {
        self.0.dot(other.0)
    }

    #[inline]
    pub fn squared_modulus(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn modulus(self) -> f32 {
        self.squared_modulus().sqrt()
    }

    /// Both components within `EPSILON` of zero
    #[inline]
    pub fn is_zero(self) -> bool {
        almost_zero(self.0.x) && almost_zero(self.0.y)
    }

    /// Same modulus, opposite direction
    #[inline]
    pub fn turn_around(self) -> Self {
        -self
    }

    /// Positive dot product
    #[inline]
    pub fn looks_in_same_direction(self, other: Vector) -> bool {
        self.dot(other) > 0.0
    }

    /// Orthogonal projection of `self` onto `onto`.
    ///
    /// Projecting onto a (near) zero vector gives the zero vector.
    pub fn project_on(self, onto: Vector) -> Self {
        let denom = onto.squared_modulus();
        if onto.is_zero() || denom <= f32::EPSILON {
            return Self::ZERO;
        }
        onto * (onto.dot(self) / denom)
    }

    /// Projection onto the direction of a line
    #[inline]
    pub fn project_on_line(self, line: &Line) -> Self {
        self.project_on(line.collinear_vector())
    }

    /// A vector perpendicular to `self` (not normalized).
    ///
    /// Uses `(-y/x, 1)` in general and switches to `(1, -x/y)` when `x` is
    /// almost zero. A (near) zero input has no direction and yields zero.
    pub fn orthogonal(self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let Vec2 { x, y } = self.0;
        if almost_zero(x) {
            Self::new(1.0, -x / y)
        } else {
            Self::new(-y / x, 1.0)
        }
    }

    /// Rescale to modulus `|target|`, pointing the opposite way when
    /// `target` is negative. A (near) zero vector cannot be rescaled and
    /// stays zero.
    pub fn scale_to(self, target: f32) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        let modulus = self.modulus();
        if target > 0.0 {
            self * (target / modulus)
        } else {
            (self * (-target / modulus)).turn_around()
        }
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Vector {
        Vector(-self.0)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: f32) -> Vector {
        Vector(self.0 * rhs)
    }
}

/// A 2D position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point(Vec2);

impl Point {
    pub const ORIGIN: Self = Self(Vec2::ZERO);

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> f32 {
        self.0.y
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        self.0
    }

    #[inline]
    pub fn distance_to(self, other: Point) -> f32 {
        self.0.distance(other.0)
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point((self.0 + other.0) * 0.5)
    }
}

impl From<Vec2> for Point {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point(self.0 + rhs.as_vec2())
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.0 += rhs.as_vec2();
    }
}

impl Sub for Point {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector(self.0 - rhs.0)
    }
}
