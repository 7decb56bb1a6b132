//! Game objects
//!
//! A `GameObject` pairs a shape with its velocity, movement tunables and
//! collision groups. Per-kind behavior (who reacts, who falls back, how a
//! velocity response is applied) is a `match` on `ObjectKind`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::{Body, CollisionInfo, collide};
use super::movement::{MoveContext, integrate};
use super::shape::Shape;
use super::vector::{Point, Vector};
use crate::error::{EngineError, ensure_finite};
use crate::scoreboard::Side;

/// Stable object identifier, also the iteration order within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Set of collision group tags (0..32) stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionGroups(u32);

impl CollisionGroups {
    pub const NONE: Self = Self(0);

    /// Build from tags; tags of 32 or more are ignored
    pub fn from_tags(tags: &[u8]) -> Self {
        Self(
            tags.iter()
                .filter(|&&t| t < 32)
                .fold(0, |mask, &t| mask | (1 << t)),
        )
    }

    #[inline]
    pub fn contains(self, tag: u8) -> bool {
        tag < 32 && self.0 & (1 << tag) != 0
    }

    #[inline]
    pub fn intersects(self, other: CollisionGroups) -> bool {
        self.0 & other.0 != 0
    }
}

/// What an object is, which decides how it behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Puck,
    /// Player-driven paddle
    Mallet,
    Wall,
    /// Net guarded by `owner`; a puck hitting it scores for the other side
    Goal { owner: Side },
    /// Centre line keeping mallets in their halves
    Divider,
    /// Computer-driven vertical paddle following `target`
    Racket { target: ObjectId },
}

impl ObjectKind {
    pub fn groups(self) -> CollisionGroups {
        match self {
            ObjectKind::Puck => CollisionGroups::from_tags(&[0, 3]),
            ObjectKind::Mallet => CollisionGroups::from_tags(&[0, 1]),
            ObjectKind::Wall => CollisionGroups::from_tags(&[0]),
            ObjectKind::Goal { .. } => CollisionGroups::from_tags(&[0, 3]),
            ObjectKind::Divider => CollisionGroups::from_tags(&[1]),
            ObjectKind::Racket { .. } => CollisionGroups::from_tags(&[0]),
        }
    }

    /// Never integrates and ignores velocity responses
    pub fn is_static(self) -> bool {
        matches!(self, ObjectKind::Wall | ObjectKind::Goal { .. } | ObjectKind::Divider)
    }

    pub fn reacts_to_collisions(self) -> bool {
        !matches!(self, ObjectKind::Wall | ObjectKind::Divider)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Puck => "puck",
            ObjectKind::Mallet => "mallet",
            ObjectKind::Wall => "wall",
            ObjectKind::Goal { .. } => "goal",
            ObjectKind::Divider => "divider",
            ObjectKind::Racket { .. } => "racket",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub shape: Shape,
    pub velocity: Vector,
    pub move_ctx: MoveContext,
    pub groups: CollisionGroups,
    pub weight: f32,
    /// Set when the object took part in a collision this tick
    pub in_collision: bool,
}

impl GameObject {
    fn build(
        id: ObjectId,
        kind: ObjectKind,
        shape: Shape,
        velocity: Vector,
        move_ctx: MoveContext,
        weight: f32,
    ) -> Result<Self, EngineError> {
        ensure_finite(velocity.x(), "velocity x")?;
        ensure_finite(velocity.y(), "velocity y")?;
        move_ctx.validate()?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(EngineError::InvalidSettings(format!(
                "{} weight must be positive, got {}",
                kind.name(),
                weight
            )));
        }
        Ok(Self {
            id,
            kind,
            shape,
            velocity,
            move_ctx,
            groups: kind.groups(),
            weight,
            in_collision: false,
        })
    }

    pub fn puck(
        id: ObjectId,
        center: Point,
        radius: f32,
        velocity: Vector,
        move_ctx: MoveContext,
    ) -> Result<Self, EngineError> {
        let shape = Shape::circle(center, radius)?;
        Self::build(id, ObjectKind::Puck, shape, velocity, move_ctx, 1.0)
    }

    pub fn mallet(
        id: ObjectId,
        center: Point,
        radius: f32,
        move_ctx: MoveContext,
        weight: f32,
    ) -> Result<Self, EngineError> {
        let shape = Shape::circle(center, radius)?;
        Self::build(id, ObjectKind::Mallet, shape, Vector::ZERO, move_ctx, weight)
    }

    pub fn wall(id: ObjectId, p1: Point, p2: Point) -> Result<Self, EngineError> {
        Self::fixed(id, ObjectKind::Wall, p1, p2)
    }

    pub fn goal(id: ObjectId, p1: Point, p2: Point, owner: Side) -> Result<Self, EngineError> {
        Self::fixed(id, ObjectKind::Goal { owner }, p1, p2)
    }

    pub fn divider(id: ObjectId, p1: Point, p2: Point) -> Result<Self, EngineError> {
        Self::fixed(id, ObjectKind::Divider, p1, p2)
    }

    pub fn racket(
        id: ObjectId,
        p1: Point,
        p2: Point,
        target: ObjectId,
        move_ctx: MoveContext,
    ) -> Result<Self, EngineError> {
        let shape = Shape::segment(p1, p2)?;
        let kind = ObjectKind::Racket { target };
        Self::build(id, kind, shape, Vector::ZERO, move_ctx, 1.0)
    }

    fn fixed(id: ObjectId, kind: ObjectKind, p1: Point, p2: Point) -> Result<Self, EngineError> {
        let shape = Shape::segment(p1, p2)?;
        Self::build(id, kind, shape, Vector::ZERO, MoveContext::default(), 1.0)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind.is_static()
    }

    #[inline]
    pub fn reacts_to_collisions(&self) -> bool {
        self.kind.reacts_to_collisions()
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.shape.anchor()
    }

    /// Whether a pair should be checked at all
    pub fn can_collide_with(&self, other: &GameObject) -> bool {
        self.groups.intersects(other.groups)
            && (self.reacts_to_collisions() || other.reacts_to_collisions())
    }

    /// Set the acceleration applied on every tick until replaced
    pub fn accelerate(&mut self, acceleration: Vector) {
        self.move_ctx.acceleration = acceleration;
    }

    /// Integrate velocity and move
    pub fn on_tick(&mut self) {
        if self.is_static() {
            return;
        }
        self.velocity = integrate(self.velocity, &self.move_ctx);
        self.shape.translate(self.velocity);
    }

    fn body(&self) -> Body {
        Body {
            velocity: self.velocity,
            weight: self.weight,
        }
    }

    /// Collision response for `self` (first) and `other` (second), if touching
    pub fn collision_info(&self, other: &GameObject) -> Option<(CollisionInfo, CollisionInfo)> {
        collide(&self.shape, self.body(), &other.shape, other.body())
    }

    /// Whether the fallback displacement is applied to `self` when hitting `other`
    pub fn falls_back(&self, other: &GameObject) -> bool {
        match self.kind {
            ObjectKind::Puck => true,
            ObjectKind::Mallet => other.kind != ObjectKind::Puck || other.in_collision,
            ObjectKind::Wall
            | ObjectKind::Goal { .. }
            | ObjectKind::Divider
            | ObjectKind::Racket { .. } => false,
        }
    }

    /// Apply a collision response
    pub fn on_collision(&mut self, info: CollisionInfo, fall_back: bool) {
        if fall_back {
            self.shape.translate(info.fallback);
        }
        match self.kind {
            ObjectKind::Puck | ObjectKind::Mallet => self.velocity = info.velocity,
            ObjectKind::Racket { .. } => self.velocity = Vector::new(0.0, info.velocity.y()),
            ObjectKind::Wall | ObjectKind::Goal { .. } | ObjectKind::Divider => {}
        }
    }

    /// Undo the most recent move
    pub fn rollback(&mut self) -> bool {
        self.shape.rollback()
    }
}
