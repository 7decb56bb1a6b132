//! Collision detection and response
//!
//! Detection turns a pair of shapes into a `CollisionGeometry`: the collision
//! line (the tangent surface at contact) plus a fallback vector per shape
//! that separates the two by the penetration depth and a small margin.
//!
//! Response decomposes each velocity along the collision line (tangential,
//! kept) and along its normal (reflected, or exchanged elastically when two
//! circles meet).

use super::line::Line;
use super::shape::{Circle, LineSegment, Shape};
use super::vector::{Point, Vector};
use crate::consts::FALLBACK_EPSILON;

/// Result of a shape-vs-shape check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionGeometry {
    /// Line along which velocities keep their component
    pub line: Line,
    /// Displacement separating the first shape from the second
    pub fallback1: Vector,
    /// Displacement separating the second shape from the first
    pub fallback2: Vector,
}

impl CollisionGeometry {
    pub fn new(line: Line, fallback1: Vector, fallback2: Vector) -> Self {
        Self {
            line,
            fallback1,
            fallback2,
        }
    }

    /// Same contact seen from the other shape
    pub fn flip(self) -> Self {
        Self {
            line: self.line,
            fallback1: self.fallback2,
            fallback2: self.fallback1,
        }
    }
}

/// What one object should do after a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Displacement to apply if the object falls back
    pub fallback: Vector,
    /// Velocity replacing the current one
    pub velocity: Vector,
}

/// Velocity and mass of one side of a collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub velocity: Vector,
    pub weight: f32,
}

/// How velocities are exchanged at contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseModel {
    /// Each object mirrors its own normal component off an immovable surface
    Reflect,
    /// 1-D elastic collision along the normal, weighted by mass
    Elastic,
}

impl ResponseModel {
    pub fn for_shapes(a: &Shape, b: &Shape) -> Self {
        match (a, b) {
            (Shape::Circle(_), Shape::Circle(_)) => ResponseModel::Elastic,
            _ => ResponseModel::Reflect,
        }
    }
}

/// Detect a collision between two shapes.
///
/// Segment vs segment has no detection algorithm and always reports no
/// collision. Shapes with a non-finite coordinate never collide.
pub fn detect(a: &Shape, b: &Shape) -> Option<CollisionGeometry> {
    if !a.is_finite() || !b.is_finite() {
        return None;
    }
    match (a, b) {
        (Shape::Circle(c1), Shape::Circle(c2)) => circle_circle(c1, c2),
        (Shape::Circle(c), Shape::Segment(s)) => circle_segment(c, s),
        (Shape::Segment(s), Shape::Circle(c)) => {
            circle_segment(c, s).map(CollisionGeometry::flip)
        }
        (Shape::Segment(_), Shape::Segment(_)) => None,
    }
}

/// Circle (first) against line segment (second)
pub fn circle_segment(circle: &Circle, segment: &LineSegment) -> Option<CollisionGeometry> {
    let a = segment.p1();
    let b = segment.p2();
    let x = circle.center();

    let ab = b - a;
    let proj = (x - a).project_on(ab);

    // Closest point of the segment (not the infinite line) to the center
    let (closest, at_endpoint) = if !proj.looks_in_same_direction(ab) {
        (a, true)
    } else if proj.modulus() < ab.modulus() {
        (a + proj, false)
    } else {
        (b, true)
    };

    if closest.distance_to(x) > circle.radius() {
        return None;
    }

    let to_center = x - closest;
    let line = if at_endpoint && !to_center.is_zero() {
        // Rounded corner: tangent to the circle at the endpoint
        Line::new(closest, x)
            .orthogonal_line()
            .parallel_through(closest)
    } else {
        segment.line()
    };

    let depth = circle.radius() - line.distance_to_point(x);
    let normal = orient_away(line.orthogonal_vector(), closest, x, circle.previous_center());
    let fallback = normal.scale_to(depth + FALLBACK_EPSILON);

    Some(CollisionGeometry::new(line, fallback, fallback.turn_around()))
}

/// Circle (first) against circle (second)
pub fn circle_circle(c1: &Circle, c2: &Circle) -> Option<CollisionGeometry> {
    let distance = c1.center().distance_to(c2.center());
    let reach = c1.radius() + c2.radius();
    if distance > reach {
        return None;
    }

    // Coincident centers have no connecting direction, separate along x
    let connecting = match c2.center() - c1.center() {
        v if v.is_zero() => Vector::new(1.0, 0.0),
        v => v,
    };

    // Only the direction of this line matters
    let line = Line::new(c1.center(), c1.center() + connecting).orthogonal_line();

    let depth = reach - distance;
    let fallback1 = connecting.turn_around().scale_to(depth + FALLBACK_EPSILON);

    Some(CollisionGeometry::new(line, fallback1, fallback1.turn_around()))
}

/// Flip `normal` so that it points from `surface` toward the circle center.
///
/// A center lying on the surface gives no side, so the center before the
/// last move is consulted; failing that the normal is kept as is.
fn orient_away(normal: Vector, surface: Point, center: Point, previous: Option<Point>) -> Vector {
    let side = [Some(center), previous]
        .into_iter()
        .flatten()
        .map(|p| normal.dot(p - surface))
        .find(|d| !crate::almost_zero(*d));

    match side {
        Some(d) if d < 0.0 => normal.turn_around(),
        _ => normal,
    }
}

/// Compute the velocity response for both sides of a detected collision
pub fn resolve(
    geometry: &CollisionGeometry,
    first: Body,
    second: Body,
    model: ResponseModel,
) -> (CollisionInfo, CollisionInfo) {
    let (v1, v2) = match model {
        ResponseModel::Reflect => (
            reflect(first.velocity, &geometry.line),
            reflect(second.velocity, &geometry.line),
        ),
        ResponseModel::Elastic => exchange(first, second, &geometry.line),
    };

    (
        CollisionInfo {
            fallback: geometry.fallback1,
            velocity: v1,
        },
        CollisionInfo {
            fallback: geometry.fallback2,
            velocity: v2,
        },
    )
}

/// Detect and resolve in one step
pub fn collide(
    a: &Shape,
    a_body: Body,
    b: &Shape,
    b_body: Body,
) -> Option<(CollisionInfo, CollisionInfo)> {
    let geometry = detect(a, b)?;
    Some(resolve(&geometry, a_body, b_body, ResponseModel::for_shapes(a, b)))
}

/// Keep the tangential component, mirror the normal one
pub fn reflect(velocity: Vector, collision_line: &Line) -> Vector {
    let normal_axis = collision_line.orthogonal_line();
    let tangential = velocity.project_on_line(collision_line);
    let normal = velocity.project_on_line(&normal_axis);
    tangential + normal.turn_around()
}

/// Elastic exchange of the normal components between two weighted bodies
fn exchange(first: Body, second: Body, collision_line: &Line) -> (Vector, Vector) {
    let axis = collision_line.orthogonal_vector();

    let t1 = first.velocity.project_on_line(collision_line);
    let t2 = second.velocity.project_on_line(collision_line);
    let v1x = signed_speed(first.velocity.project_on(axis), axis);
    let v2x = signed_speed(second.velocity.project_on(axis), axis);

    let (m1, m2) = (first.weight, second.weight);
    let total = m1 + m2;
    let v1x_new = ((m1 - m2) * v1x + 2.0 * m2 * v2x) / total;
    let v2x_new = ((m2 - m1) * v2x + 2.0 * m1 * v1x) / total;

    (t1 + axis.scale_to(v1x_new), t2 + axis.scale_to(v2x_new))
}

/// Speed along `axis`, negative when moving against it
fn signed_speed(component: Vector, axis: Vector) -> f32 {
    if component.looks_in_same_direction(axis) {
        component.modulus()
    } else {
        -component.modulus()
    }
}
