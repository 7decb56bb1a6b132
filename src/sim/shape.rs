//! Shape types for collision detection
//!
//! A closed set of shapes: circles (pucks, mallets) and line segments
//! (walls, goals, rackets). Each shape remembers its recent positions so a
//! move can be rolled back.

use super::collision::{CollisionGeometry, detect};
use super::history::PositionHistory;
use super::line::Line;
use super::vector::{Point, Vector};
use crate::error::{EngineError, ensure_finite};

/// A circle with a bounded position history
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point,
    radius: f32,
    history: PositionHistory<Point>,
}

impl Circle {
    pub fn new(center: Point, radius: f32) -> Result<Self, EngineError> {
        ensure_finite(center.x(), "circle center x")?;
        ensure_finite(center.y(), "circle center y")?;
        ensure_finite(radius, "circle radius")?;
        if radius <= 0.0 {
            return Err(EngineError::InvalidRadius(radius));
        }
        Ok(Self {
            center,
            radius,
            history: PositionHistory::new(),
        })
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Center before the most recent move, if remembered
    pub fn previous_center(&self) -> Option<Point> {
        self.history.peek()
    }

    fn translate(&mut self, v: Vector) {
        self.history.push(self.center);
        self.center += v;
    }

    fn rollback(&mut self) -> bool {
        match self.history.pop() {
            Some(center) => {
                self.center = center;
                true
            }
            None => false,
        }
    }
}

/// A line segment with a bounded position history
#[derive(Debug, Clone)]
pub struct LineSegment {
    p1: Point,
    p2: Point,
    history: PositionHistory<(Point, Point)>,
}

impl LineSegment {
    pub fn new(p1: Point, p2: Point) -> Result<Self, EngineError> {
        if !p1.is_finite() || !p2.is_finite() {
            return Err(EngineError::NonFinite("segment endpoint"));
        }
        if (p2 - p1).is_zero() {
            return Err(EngineError::DegenerateSegment);
        }
        Ok(Self {
            p1,
            p2,
            history: PositionHistory::new(),
        })
    }

    #[inline]
    pub fn p1(&self) -> Point {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// The infinite line carrying this segment
    pub fn line(&self) -> Line {
        Line::new(self.p1, self.p2)
    }

    pub fn center(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    pub fn length(&self) -> f32 {
        self.p1.distance_to(self.p2)
    }

    fn translate(&mut self, v: Vector) {
        self.history.push((self.p1, self.p2));
        self.p1 += v;
        self.p2 += v;
    }

    fn rollback(&mut self) -> bool {
        match self.history.pop() {
            Some((p1, p2)) => {
                self.p1 = p1;
                self.p2 = p2;
                true
            }
            None => false,
        }
    }
}

/// Any collidable shape
#[derive(Debug, Clone)]
pub enum Shape {
    Circle(Circle),
    Segment(LineSegment),
}

impl Shape {
    pub fn circle(center: Point, radius: f32) -> Result<Self, EngineError> {
        Circle::new(center, radius).map(Shape::Circle)
    }

    pub fn segment(p1: Point, p2: Point) -> Result<Self, EngineError> {
        LineSegment::new(p1, p2).map(Shape::Segment)
    }

    /// Translate by `v`, remembering the pre-move position
    pub fn translate(&mut self, v: Vector) {
        match self {
            Shape::Circle(c) => c.translate(v),
            Shape::Segment(s) => s.translate(v),
        }
    }

    /// Restore the most recent remembered position.
    ///
    /// Returns `false` when there is nothing to restore.
    pub fn rollback(&mut self) -> bool {
        match self {
            Shape::Circle(c) => c.rollback(),
            Shape::Segment(s) => s.rollback(),
        }
    }

    /// Number of remembered positions
    pub fn history_len(&self) -> usize {
        match self {
            Shape::Circle(c) => c.history.len(),
            Shape::Segment(s) => s.history.len(),
        }
    }

    /// Anchor before the most recent move, without popping it
    pub fn previous_position(&self) -> Option<Point> {
        match self {
            Shape::Circle(c) => c.previous_center(),
            Shape::Segment(s) => s.history.peek().map(|(p1, p2)| p1.midpoint(p2)),
        }
    }

    /// Center of a circle, midpoint of a segment
    pub fn anchor(&self) -> Point {
        match self {
            Shape::Circle(c) => c.center(),
            Shape::Segment(s) => s.center(),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(c) => Some(c),
            Shape::Segment(_) => None,
        }
    }

    pub fn as_segment(&self) -> Option<&LineSegment> {
        match self {
            Shape::Segment(s) => Some(s),
            Shape::Circle(_) => None,
        }
    }

    /// Every coordinate and the radius are finite
    pub fn is_finite(&self) -> bool {
        match self {
            Shape::Circle(c) => c.center().is_finite() && c.radius().is_finite(),
            Shape::Segment(s) => s.p1().is_finite() && s.p2().is_finite(),
        }
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        matches!(self, Shape::Circle(_))
    }

    /// Collision geometry between `self` (first) and `other` (second)
    pub fn collision_geometry(&self, other: &Shape) -> Option<CollisionGeometry> {
        detect(self, other)
    }
}
