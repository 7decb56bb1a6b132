//! Air Hockey - rigid-body geometry and collision engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, movement, game driver)
//! - `settings`: Data-driven tunables (field size, tick rate, move contexts)
//! - `scoreboard`: Goal and match bookkeeping
//! - `error`: Construction and configuration errors

pub mod error;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use error::EngineError;
pub use scoreboard::{Scoreboard, Side};
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Tolerance for "almost zero" float comparisons
    pub const EPSILON: f32 = 1e-4;
    /// Extra separation added to every fallback vector so that a re-test
    /// after applying it reports no collision
    pub const FALLBACK_EPSILON: f32 = 1.0;
    /// Number of prior positions each shape remembers
    pub const HISTORY_CAPACITY: usize = 10;

    /// Move context defaults
    pub const DEFAULT_MAX_VELOCITY: f32 = 10.0;
    pub const DEFAULT_DAMPING: f32 = 1.2;

    /// Mallet mass, relative to a puck's 1
    pub const MALLET_WEIGHT: f32 = 100.0;
    /// Multiplier applied to an input direction to get mallet acceleration
    pub const MALLET_ACCELERATION: f32 = 2.0;

    /// Racket steering
    pub const RACKET_ACCELERATION: f32 = 1.0;
    pub const RACKET_BRAKE_DAMPING: f32 = 10.0;

    /// Goals needed to win a match
    pub const MAX_SCORE: u32 = 5;
}

/// Whether a value is within `EPSILON` of zero
#[inline]
pub fn almost_zero(value: f32) -> bool {
    almost_zero_eps(value, consts::EPSILON)
}

/// Whether a value is within `eps` of zero
#[inline]
pub fn almost_zero_eps(value: f32, eps: f32) -> bool {
    value.abs() <= eps
}
