//! Per-tick velocity integration
//!
//! Each movable object carries a `MoveContext`: speed clamps, a damping
//! coefficient and the acceleration currently requested by its controller.

use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::consts::{DEFAULT_DAMPING, DEFAULT_MAX_VELOCITY};
use crate::error::EngineError;

/// Movement tunables for one object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveContext {
    /// Speed is clamped down to this after every tick
    pub max_velocity: f32,
    /// A moving object never drops below this speed
    pub min_velocity: Option<f32>,
    /// Velocity is divided by this on ticks without acceleration (1 = no decay)
    pub damping: f32,
    /// Set by commands, persists until replaced
    #[serde(skip)]
    pub acceleration: Vector,
}

impl Default for MoveContext {
    fn default() -> Self {
        Self {
            max_velocity: DEFAULT_MAX_VELOCITY,
            min_velocity: None,
            damping: DEFAULT_DAMPING,
            acceleration: Vector::ZERO,
        }
    }
}

impl MoveContext {
    pub fn new(
        max_velocity: f32,
        min_velocity: Option<f32>,
        damping: f32,
    ) -> Result<Self, EngineError> {
        let ctx = Self {
            max_velocity,
            min_velocity,
            damping,
            acceleration: Vector::ZERO,
        };
        ctx.validate()?;
        Ok(ctx)
    }

    /// Check the clamps and damping are usable
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.max_velocity.is_finite() || self.max_velocity <= 0.0 {
            return Err(EngineError::InvalidMoveContext(format!(
                "max velocity must be positive, got {}",
                self.max_velocity
            )));
        }
        if let Some(min) = self.min_velocity {
            if !min.is_finite() || min < 0.0 || min > self.max_velocity {
                return Err(EngineError::InvalidMoveContext(format!(
                    "min velocity {} outside 0..={}",
                    min, self.max_velocity
                )));
            }
        }
        if !self.damping.is_finite() || self.damping <= 0.0 {
            return Err(EngineError::InvalidMoveContext(format!(
                "damping must be positive, got {}",
                self.damping
            )));
        }
        Ok(())
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }
}

/// Velocity after one tick under `ctx`
pub fn integrate(velocity: Vector, ctx: &MoveContext) -> Vector {
    let mut v = if ctx.acceleration.is_zero() {
        velocity * (1.0 / ctx.damping)
    } else {
        velocity + ctx.acceleration
    };

    // A resting object stays at rest; scale_to cannot give it a direction
    if let Some(min) = ctx.min_velocity {
        if !v.is_zero() && v.modulus() < min {
            v = v.scale_to(min);
        }
    }

    if v.modulus() > ctx.max_velocity {
        v = v.scale_to(ctx.max_velocity);
    }

    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector, b: Vector) -> bool {
        (a.x() - b.x()).abs() < 1e-4 && (a.y() - b.y()).abs() < 1e-4
    }

    #[test]
    fn test_damping_decays_velocity() {
        let ctx = MoveContext::new(100.0, None, 2.0).unwrap();
        let v = integrate(Vector::new(8.0, -4.0), &ctx);
        assert!(approx(v, Vector::new(4.0, -2.0)));
    }

    #[test]
    fn test_unit_damping_keeps_velocity() {
        let ctx = MoveContext::new(100.0, None, 1.0).unwrap();
        assert!(approx(integrate(Vector::new(5.0, 0.0), &ctx), Vector::new(5.0, 0.0)));
    }

    #[test]
    fn test_acceleration_replaces_damping() {
        let mut ctx = MoveContext::new(100.0, None, 2.0).unwrap();
        ctx.acceleration = Vector::new(1.0, 1.0);
        let v = integrate(Vector::new(3.0, 0.0), &ctx);
        assert!(approx(v, Vector::new(4.0, 1.0)));
    }

    #[test]
    fn test_max_velocity_clamp() {
        let mut ctx = MoveContext::new(5.0, None, 1.0).unwrap();
        ctx.acceleration = Vector::new(0.0, 10.0);
        let v = integrate(Vector::new(0.0, 0.0), &ctx);
        assert!(approx(v, Vector::new(0.0, 5.0)));
    }

    #[test]
    fn test_min_velocity_clamp() {
        let ctx = MoveContext::new(10.0, Some(2.0), 4.0).unwrap();
        let v = integrate(Vector::new(4.0, 0.0), &ctx);
        assert!(approx(v, Vector::new(2.0, 0.0)));

        // At rest there is no direction to scale along
        assert_eq!(integrate(Vector::ZERO, &ctx), Vector::ZERO);
    }

    #[test]
    fn test_validate_rejects_bad_contexts() {
        assert!(MoveContext::new(0.0, None, 1.0).is_err());
        assert!(MoveContext::new(f32::NAN, None, 1.0).is_err());
        assert!(MoveContext::new(5.0, Some(6.0), 1.0).is_err());
        assert!(MoveContext::new(5.0, Some(-1.0), 1.0).is_err());
        assert!(MoveContext::new(5.0, None, 0.0).is_err());
        assert!(matches!(
            MoveContext::new(5.0, None, -2.0),
            Err(EngineError::InvalidMoveContext(_))
        ));
        assert!(MoveContext::default().validate().is_ok());
    }

    #[test]
    fn test_acceleration_is_not_serialized() {
        let mut ctx = MoveContext::default();
        ctx.acceleration = Vector::new(1.0, 0.0);
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(!json.contains("acceleration"));
        let back: MoveContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.acceleration, Vector::ZERO);
        assert_eq!(back.max_velocity, ctx.max_velocity);

        let partial: MoveContext = serde_json::from_str(r#"{"damping": 3.0}"#).unwrap();
        assert_eq!(partial.damping, 3.0);
        assert_eq!(partial.max_velocity, DEFAULT_MAX_VELOCITY);
    }
}
