//! Deterministic simulation module
//!
//! All physics and game logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by object ID)
//! - No I/O or platform dependencies

pub mod collision;
pub mod history;
pub mod line;
pub mod movement;
pub mod object;
pub mod shape;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{
    Body, CollisionGeometry, CollisionInfo, ResponseModel, collide, detect, reflect, resolve,
};
pub use history::PositionHistory;
pub use line::Line;
pub use movement::{MoveContext, integrate};
pub use object::{CollisionGroups, GameObject, ObjectId, ObjectKind};
pub use shape::{Circle, LineSegment, Shape};
pub use state::{Field, GameEvent};
pub use tick::{Command, TickInput, tick};
pub use vector::{Point, Vector};
